pub mod adapt;
pub mod config;
pub mod derive;
pub mod error;
pub mod format;
pub mod grouping;
pub mod logging;
pub mod pipeline;
pub mod ranking;
pub mod registry;
pub mod sport;
pub mod standing;

pub use error::StandingsError;
pub use pipeline::{StandingsEngine, StandingsReport};
pub use sport::Sport;
pub use standing::{Standing, StandingsGroup};
