// Domain layer: page models and ports (capabilities the host environment provides).

pub mod model;
pub mod ports;
