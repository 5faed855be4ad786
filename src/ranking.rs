// Ordering of standings within one bucket.
use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::derive::{self, effective_win_percentage};
use crate::registry::{standard_ranking, RankingRule};
use crate::standing::{RankOrigin, SportStats, Standing};

pub type Comparator = fn(&Standing, &Standing) -> Ordering;

// Individual ranking criteria, applied in sequence until one separates two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankCriteria {
    Points,
    WinPercentage,
    Differential,
    HeadToHead,
    TeamName,
    // Last resort so the ordering is total.
    Id,
}

pub const WIN_PERCENTAGE_CRITERIA: &[RankCriteria] = &[
    RankCriteria::WinPercentage,
    RankCriteria::Differential,
    RankCriteria::HeadToHead,
    RankCriteria::TeamName,
    RankCriteria::Id,
];

pub const POINTS_TABLE_CRITERIA: &[RankCriteria] = &[
    RankCriteria::Points,
    RankCriteria::Differential,
    RankCriteria::HeadToHead,
    RankCriteria::TeamName,
    RankCriteria::Id,
];

// Compare functions here. Higher is better unless noted.

fn compare_points(a: &Standing, b: &Standing) -> Ordering {
    // Absent points sort below any value.
    b.derived.points.cmp(&a.derived.points)
}

fn compare_win_percentage(a: &Standing, b: &Standing) -> Ordering {
    effective_win_percentage(b).total_cmp(&effective_win_percentage(a))
}

fn compare_differential(a: &Standing, b: &Standing) -> Ordering {
    tiebreak_differential(b).total_cmp(&tiebreak_differential(a))
}

fn compare_head_to_head(a: &Standing, b: &Standing) -> Ordering {
    b.head_to_head_wins.cmp(&a.head_to_head_wins)
}

// Lower is better: ascending, case-insensitive.
fn compare_team_name(a: &Standing, b: &Standing) -> Ordering {
    a.team.name.to_lowercase().cmp(&b.team.name.to_lowercase())
}

fn compare_id(a: &Standing, b: &Standing) -> Ordering {
    a.id.cmp(&b.id).then_with(|| a.team.id.cmp(&b.team.id))
}

fn criterion_fn(criteria: RankCriteria) -> Comparator {
    match criteria {
        RankCriteria::Points => compare_points,
        RankCriteria::WinPercentage => compare_win_percentage,
        RankCriteria::Differential => compare_differential,
        RankCriteria::HeadToHead => compare_head_to_head,
        RankCriteria::TeamName => compare_team_name,
        RankCriteria::Id => compare_id,
    }
}

/// Cricket ranks on net run rate; everything else on scored minus conceded.
fn tiebreak_differential(standing: &Standing) -> f64 {
    let cricket_nrr = match &standing.stats {
        SportStats::Cricket(s) => s.net_run_rate,
        _ => None,
    };
    cricket_nrr
        .or_else(|| {
            standing
                .derived
                .differential
                .or_else(|| derive::differential(&standing.stats))
                .map(|d| d as f64)
        })
        .unwrap_or(f64::NEG_INFINITY)
}

pub fn compare_by(criteria: &[RankCriteria], a: &Standing, b: &Standing) -> Ordering {
    for c in criteria {
        let ord = criterion_fn(*c)(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

pub fn compare_win_percentage_table(a: &Standing, b: &Standing) -> Ordering {
    compare_by(WIN_PERCENTAGE_CRITERIA, a, b)
}

pub fn compare_points_table(a: &Standing, b: &Standing) -> Ordering {
    compare_by(POINTS_TABLE_CRITERIA, a, b)
}

pub fn comparator_for(rule: RankingRule) -> Comparator {
    match rule {
        RankingRule::WinPercentage => compare_win_percentage_table,
        RankingRule::PointsTable => compare_points_table,
    }
}

/// Compares two rows with the standard comparator for the first row's sport.
pub fn compare(a: &Standing, b: &Standing) -> Ordering {
    comparator_for(standard_ranking(a.sport()))(a, b)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// Keep supplied positions unless absent, non-positive or duplicated.
    #[default]
    TrustSource,
    Recompute,
}

pub fn positions_usable(rows: &[Standing]) -> bool {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.iter().all(|row| row.position > 0 && seen.insert(row.position))
}

/// Orders one bucket. Source positions are kept verbatim (gaps included) when
/// usable; otherwise rows are sorted with `cmp` and renumbered 1..n.
pub fn rank_bucket(
    mut rows: Vec<Standing>,
    cmp: Comparator,
    mode: RankMode,
) -> (Vec<Standing>, RankOrigin) {
    if mode == RankMode::TrustSource && positions_usable(&rows) {
        rows.sort_by_key(|row| row.position);
        return (rows, RankOrigin::Source);
    }

    if mode == RankMode::TrustSource {
        debug!(rows = rows.len(), "source positions unusable, recomputing order");
    }
    rows.sort_by(cmp);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = i32::try_from(idx + 1).unwrap_or(i32::MAX);
    }
    (rows, RankOrigin::Computed)
}
