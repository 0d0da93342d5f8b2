// Adapters layer: concrete implementations of the domain ports.

pub mod clock;
pub mod submit;
pub mod tokio_timer;

pub use clock::ManualScheduler;
pub use submit::SimulatedSubmitter;
pub use tokio_timer::TokioScheduler;
