//! adapt -> derive -> group -> rank -> games behind.

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapt::adapt_with;
use crate::config::{EngineConfig, RowPolicy};
use crate::derive::{derive_missing_with, fill_games_behind};
use crate::error::StandingsError;
use crate::grouping::group_with;
use crate::ranking::{rank_bucket, Comparator, RankMode};
use crate::registry::{default_registry, SportProfile, SportRegistry};
use crate::sport::Sport;
use crate::standing::{RankOrigin, Standing, StandingsGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterMismatch {
    pub id: String,
    pub played: u32,
    pub outcomes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsReport {
    pub sport: Sport,
    pub groups: Vec<StandingsGroup>,
    pub skipped: Vec<SkippedRow>,
    /// Rows whose played count disagrees with their outcomes. Passed through as-is.
    pub incoherent: Vec<CounterMismatch>,
}

impl StandingsReport {
    pub fn empty(sport: Sport) -> Self {
        Self {
            sport,
            groups: Vec::new(),
            skipped: Vec::new(),
            incoherent: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        crate::standing::total_rows(&self.groups)
    }
}

pub fn check_counters(standing: &Standing) -> Result<(), StandingsError> {
    if standing.is_coherent() {
        return Ok(());
    }
    Err(StandingsError::IncoherentCounters {
        id: standing.id.clone(),
        played: standing.stats.played(),
        outcomes: standing.stats.outcome_sum(),
    })
}

/// Accepts a bare array, `{"standings": [...]}`, `{"data": [...]}` or null.
pub fn parse_rows_json(raw: &str) -> Result<Vec<Value>, StandingsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed)?;
    match root {
        Value::Null => Ok(Vec::new()),
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => {
            let inner = map
                .remove("standings")
                .or_else(|| map.remove("data"))
                .unwrap_or(Value::Null);
            match inner {
                Value::Null => Ok(Vec::new()),
                Value::Array(rows) => Ok(rows),
                _ => Err(payload_error("standings payload is not an array")),
            }
        }
        _ => Err(payload_error("standings payload is not an array")),
    }
}

fn payload_error(msg: &str) -> StandingsError {
    StandingsError::InvalidPayload(<serde_json::Error as serde::de::Error>::custom(msg))
}

pub struct StandingsEngine<'r> {
    registry: &'r SportRegistry,
    config: EngineConfig,
}

impl StandingsEngine<'static> {
    pub fn new(config: EngineConfig) -> Result<Self, StandingsError> {
        Ok(Self {
            registry: default_registry()?,
            config,
        })
    }
}

impl<'r> StandingsEngine<'r> {
    pub fn with_registry(
        registry: &'r SportRegistry,
        config: EngineConfig,
    ) -> Result<Self, StandingsError> {
        registry.validate()?;
        Ok(Self { registry, config })
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn normalize(
        &self,
        sport_id: &str,
        rows: &[Value],
    ) -> Result<StandingsReport, StandingsError> {
        let profile = self.registry.resolve(sport_id)?;
        let mut report = StandingsReport::empty(profile.sport);
        let mut adapted = Vec::with_capacity(rows.len());

        for (idx, raw) in rows.iter().enumerate() {
            let standing = match adapt_with(profile.adapter, idx, raw) {
                Ok(standing) => standing,
                Err(err) if err.is_row_level() && self.config.row_policy == RowPolicy::SkipAndLog => {
                    warn!(row = idx, error = %err, "skipping standings row");
                    report.skipped.push(SkippedRow {
                        row: idx,
                        reason: err.to_string(),
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Err(StandingsError::IncoherentCounters {
                id,
                played,
                outcomes,
            }) = check_counters(&standing)
            {
                warn!(%id, played, outcomes, "incoherent standings counters");
                report.incoherent.push(CounterMismatch {
                    id,
                    played,
                    outcomes,
                });
            }

            adapted.push(derive_missing_with(&standing, &profile.derived));
        }

        let groups = group_with(adapted, profile.grouping);
        report.groups = groups
            .into_iter()
            .map(|g| rank_group(g, profile, self.config.rank_mode))
            .collect();

        debug!(
            groups = report.groups.len(),
            rows = report.row_count(),
            skipped = report.skipped.len(),
            "standings normalized"
        );
        Ok(report)
    }

    pub fn normalize_json(
        &self,
        sport_id: &str,
        raw: &str,
    ) -> Result<StandingsReport, StandingsError> {
        // Fail on an unknown sport before looking at the payload.
        self.registry.resolve(sport_id)?;
        let rows = parse_rows_json(raw)?;
        self.normalize(sport_id, &rows)
    }

    /// Normalises independent `(sport, payload)` pairs in parallel.
    pub fn normalize_many(
        &self,
        requests: &[(String, String)],
    ) -> Vec<Result<StandingsReport, StandingsError>> {
        requests
            .par_iter()
            .map(|(sport, raw)| self.normalize_json(sport, raw))
            .collect()
    }
}

fn rank_group(group: StandingsGroup, profile: &SportProfile, mode: RankMode) -> StandingsGroup {
    let cmp = profile.comparator();
    let with_gb = profile.derived.games_behind;
    let mut computed = false;

    let standings = if group.standings.is_empty() {
        group.standings
    } else {
        let (rows, origin) = order_bucket(group.standings, cmp, mode, with_gb);
        computed |= origin == RankOrigin::Computed;
        rows
    };

    let divisions = group
        .divisions
        .into_iter()
        .map(|mut division| {
            let (rows, origin) = order_bucket(division.standings, cmp, mode, with_gb);
            computed |= origin == RankOrigin::Computed;
            division.standings = rows;
            division.origin = origin;
            division
        })
        .collect();

    StandingsGroup {
        standings,
        divisions,
        origin: if computed {
            RankOrigin::Computed
        } else {
            RankOrigin::Source
        },
        ..group
    }
}

fn order_bucket(
    rows: Vec<Standing>,
    cmp: Comparator,
    mode: RankMode,
    with_games_behind: bool,
) -> (Vec<Standing>, RankOrigin) {
    let (ordered, origin) = rank_bucket(rows, cmp, mode);
    if with_games_behind {
        (fill_games_behind(&ordered), origin)
    } else {
        (ordered, origin)
    }
}
