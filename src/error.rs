use thiserror::Error;

use crate::sport::Sport;

#[derive(Error, Debug)]
pub enum StandingsError {
    /// Row lacks team identity or position, or carries an unusable counter.
    #[error("Malformed standings row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Incoherent counters for {id}: played {played}, outcomes sum to {outcomes}")]
    IncoherentCounters { id: String, played: u32, outcomes: u32 },

    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    #[error("Sport registry is empty")]
    EmptyRegistry,

    #[error("No registered profile for {0}")]
    MissingProfile(Sport),

    #[error("Invalid standings payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl StandingsError {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// Structural errors abort a whole batch; row-level ones only drop the row.
    pub fn is_row_level(&self) -> bool {
        matches!(self, Self::MalformedRow { .. } | Self::IncoherentCounters { .. })
    }
}
