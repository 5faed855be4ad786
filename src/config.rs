use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ranking::RankMode;

pub const RANK_MODE_VAR: &str = "STANDINGS_RANK_MODE";
pub const ROW_POLICY_VAR: &str = "STANDINGS_ROW_POLICY";

/// What to do with a row that fails adaptation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    #[default]
    SkipAndLog,
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rank_mode: RankMode,
    pub row_policy: RowPolicy,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(RANK_MODE_VAR).ok().as_deref(),
            env::var(ROW_POLICY_VAR).ok().as_deref(),
        )
    }

    pub fn from_values(rank_mode: Option<&str>, row_policy: Option<&str>) -> Self {
        Self {
            rank_mode: rank_mode.map(parse_rank_mode).unwrap_or_default(),
            row_policy: row_policy.map(parse_row_policy).unwrap_or_default(),
        }
    }
}

/// Reads `.env.local` then `.env` into the process environment, if present.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

fn parse_rank_mode(raw: &str) -> RankMode {
    match raw.trim().to_lowercase().as_str() {
        "" | "source" | "trust" | "trust_source" => RankMode::TrustSource,
        "recompute" | "computed" | "local" => RankMode::Recompute,
        other => {
            warn!(value = other, "unknown {RANK_MODE_VAR}, using source positions");
            RankMode::TrustSource
        }
    }
}

fn parse_row_policy(raw: &str) -> RowPolicy {
    match raw.trim().to_lowercase().as_str() {
        "" | "skip" | "skip_and_log" => RowPolicy::SkipAndLog,
        "abort" | "strict" => RowPolicy::Abort,
        other => {
            warn!(value = other, "unknown {ROW_POLICY_VAR}, skipping bad rows");
            RowPolicy::SkipAndLog
        }
    }
}
