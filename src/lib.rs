pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ManualScheduler, SimulatedSubmitter, TokioScheduler};
pub use config::toml_config::SiteConfig;
pub use crate::core::{
    carousel::{Carousel, CarouselController},
    debounce::Debouncer,
    script::VisitScript,
    session::{PageEvent, PageSession, SessionReport},
};
pub use domain::model::ReviewCard;
pub use utils::error::{Result, SiteError};
