use serde::{Deserialize, Serialize};

use crate::sport::Sport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub slug: Option<String>,
}

/// Partition metadata. Never used in ranking math.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    pub stage: Option<String>,
    pub group_name: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
}

/// Fields that may come from the source or be computed from counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    pub win_percentage: Option<f64>,
    pub differential: Option<i64>,
    pub points: Option<u32>,
    pub streak: String,
    pub games_behind: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseballStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub runs_for: u32,
    pub runs_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketballStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CricketStats {
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub no_result: u32,
    pub net_run_rate: Option<f64>,
    // "runs/overs" display strings, kept verbatim.
    pub runs_for: Option<String>,
    pub runs_against: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandballStats {
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HockeyStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub overtime_losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmericanFootballStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u32,
    pub points_against: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RugbyStats {
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub bonus_points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolleyballStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportStats {
    Baseball(BaseballStats),
    Basketball(BasketballStats),
    Cricket(CricketStats),
    Handball(HandballStats),
    Hockey(HockeyStats),
    AmericanFootball(AmericanFootballStats),
    Rugby(RugbyStats),
    Volleyball(VolleyballStats),
}

impl SportStats {
    pub fn sport(&self) -> Sport {
        match self {
            SportStats::Baseball(_) => Sport::Baseball,
            SportStats::Basketball(_) => Sport::Basketball,
            SportStats::Cricket(_) => Sport::Cricket,
            SportStats::Handball(_) => Sport::Handball,
            SportStats::Hockey(_) => Sport::Hockey,
            SportStats::AmericanFootball(_) => Sport::AmericanFootball,
            SportStats::Rugby(_) => Sport::Rugby,
            SportStats::Volleyball(_) => Sport::Volleyball,
        }
    }

    pub fn played(&self) -> u32 {
        match self {
            SportStats::Baseball(s) => s.games_played,
            SportStats::Basketball(s) => s.games_played,
            SportStats::Cricket(s) => s.matches_played,
            SportStats::Handball(s) => s.games_played,
            SportStats::Hockey(s) => s.games_played,
            SportStats::AmericanFootball(s) => s.games_played,
            SportStats::Rugby(s) => s.games_played,
            SportStats::Volleyball(s) => s.games_played,
        }
    }

    pub fn wins(&self) -> u32 {
        match self {
            SportStats::Baseball(s) => s.wins,
            SportStats::Basketball(s) => s.wins,
            SportStats::Cricket(s) => s.wins,
            SportStats::Handball(s) => s.wins,
            SportStats::Hockey(s) => s.wins,
            SportStats::AmericanFootball(s) => s.wins,
            SportStats::Rugby(s) => s.wins,
            SportStats::Volleyball(s) => s.wins,
        }
    }

    pub fn losses(&self) -> u32 {
        match self {
            SportStats::Baseball(s) => s.losses,
            SportStats::Basketball(s) => s.losses,
            SportStats::Cricket(s) => s.losses,
            SportStats::Handball(s) => s.losses,
            SportStats::Hockey(s) => s.losses,
            SportStats::AmericanFootball(s) => s.losses,
            SportStats::Rugby(s) => s.losses,
            SportStats::Volleyball(s) => s.losses,
        }
    }

    /// Sum of every outcome counter that should add up to `played()`.
    pub fn outcome_sum(&self) -> u32 {
        let parts: Vec<u32> = match self {
            SportStats::Baseball(s) => vec![s.wins, s.losses],
            SportStats::Basketball(s) => vec![s.wins, s.losses],
            SportStats::Cricket(s) => vec![s.wins, s.losses, s.ties, s.no_result],
            SportStats::Handball(s) => vec![s.wins, s.draws, s.losses],
            SportStats::Hockey(s) => vec![s.wins, s.losses, s.overtime_losses],
            SportStats::AmericanFootball(s) => vec![s.wins, s.losses, s.ties],
            SportStats::Rugby(s) => vec![s.wins, s.draws, s.losses],
            SportStats::Volleyball(s) => vec![s.wins, s.losses],
        };
        parts.into_iter().fold(0u32, |acc, n| acc.saturating_add(n))
    }

    /// Scored and conceded totals behind the differential. Cricket reports
    /// runs as display strings, so it has none.
    pub fn scored_conceded(&self) -> Option<(u32, u32)> {
        match self {
            SportStats::Baseball(s) => Some((s.runs_for, s.runs_against)),
            SportStats::Basketball(s) => Some((s.points_for, s.points_against)),
            SportStats::Cricket(_) => None,
            SportStats::Handball(s) => Some((s.goals_for, s.goals_against)),
            SportStats::Hockey(s) => Some((s.goals_for, s.goals_against)),
            SportStats::AmericanFootball(s) => Some((s.points_for, s.points_against)),
            SportStats::Rugby(s) => Some((s.points_for, s.points_against)),
            SportStats::Volleyball(s) => Some((s.sets_won, s.sets_lost)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: String,
    /// 1-based rank. As reported by the source until a bucket is recomputed.
    pub position: i32,
    pub team: Team,
    pub grouping: Grouping,
    pub description: Option<String>,
    pub form: Option<String>,
    pub head_to_head_wins: Option<u32>,
    /// False when the row carried no played counter and `stats.played()` is a 0 default.
    #[serde(default = "played_reported_default")]
    pub played_reported: bool,
    pub derived: Derived,
    pub stats: SportStats,
}

fn played_reported_default() -> bool {
    true
}

impl Standing {
    pub fn sport(&self) -> Sport {
        self.stats.sport()
    }

    /// Played count for win percentage: the reported one, or the outcome sum
    /// when the source left it out.
    pub fn games_played(&self) -> u32 {
        if self.played_reported {
            self.stats.played()
        } else {
            self.stats.outcome_sum()
        }
    }

    /// Only checked when the source reported a played count.
    pub fn is_coherent(&self) -> bool {
        !self.played_reported || self.stats.played() == self.stats.outcome_sum()
    }
}

/// Whether a bucket's order was taken from the source or computed locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankOrigin {
    #[default]
    Source,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub standings: Vec<Standing>,
    pub origin: RankOrigin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsGroup {
    pub name: String,
    pub stage: Option<String>,
    pub group_name: Option<String>,
    pub conference: Option<String>,
    /// Rows that belong directly to this group (all rows for flat sports).
    pub standings: Vec<Standing>,
    pub divisions: Vec<Division>,
    pub origin: RankOrigin,
}

impl StandingsGroup {
    /// Row count including nested divisions.
    pub fn len(&self) -> usize {
        self.standings.len() + self.divisions.iter().map(|d| d.standings.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_all(&self) -> impl Iterator<Item = &Standing> {
        self.standings
            .iter()
            .chain(self.divisions.iter().flat_map(|d| d.standings.iter()))
    }
}

pub fn total_rows(groups: &[StandingsGroup]) -> usize {
    groups.iter().map(StandingsGroup::len).sum()
}
