//! Sport schema adapters: one raw standings row in, one typed `Standing` out.
//!
//! Rows arrive as loosely typed JSON from the hosted standings tables. Keys
//! are accepted in snake_case and camelCase, counters as integers or numeric
//! strings. Missing counters default to 0; missing identity or position is a
//! `MalformedRow`.

use serde_json::Value;

use crate::error::StandingsError;
use crate::sport::Sport;
use crate::standing::{
    AmericanFootballStats, BaseballStats, BasketballStats, CricketStats, Derived, Grouping,
    HandballStats, HockeyStats, RugbyStats, SportStats, Standing, Team, VolleyballStats,
};

const GAMES_PLAYED: &[&str] = &["games_played", "gamesPlayed", "played"];
const MATCHES_PLAYED: &[&str] = &["matches_played", "matchesPlayed", "played"];

pub type StatsAdapter = fn(&RowReader<'_>) -> Result<SportStats, StandingsError>;

pub fn stats_adapter(sport: Sport) -> StatsAdapter {
    match sport {
        Sport::Baseball => baseball_stats,
        Sport::Basketball => basketball_stats,
        Sport::Cricket => cricket_stats,
        Sport::Handball => handball_stats,
        Sport::Hockey => hockey_stats,
        Sport::AmericanFootball => american_football_stats,
        Sport::Rugby => rugby_stats,
        Sport::Volleyball => volleyball_stats,
    }
}

pub fn adapt(sport: Sport, row: usize, raw: &Value) -> Result<Standing, StandingsError> {
    adapt_with(stats_adapter(sport), row, raw)
}

pub fn adapt_with(
    adapter: StatsAdapter,
    row: usize,
    raw: &Value,
) -> Result<Standing, StandingsError> {
    let reader = RowReader::new(row, raw)?;
    let team = reader.team()?;
    let position = reader.position()?;
    let stats = adapter(&reader)?;

    let id = reader
        .opt_string(&["id", "standing_id", "standingId"])
        .unwrap_or_else(|| team.id.clone());

    let played_keys = match stats.sport() {
        Sport::Cricket => MATCHES_PLAYED,
        _ => GAMES_PLAYED,
    };
    let played_reported = pick_present(raw, played_keys).is_some();

    let conference = match stats.sport() {
        // MLB rows call the top level "league".
        Sport::Baseball => reader.opt_string(&["league", "conference"]),
        _ => reader.opt_string(&["conference"]),
    };

    Ok(Standing {
        id,
        position,
        team,
        grouping: Grouping {
            stage: reader.opt_string(&["stage"]),
            group_name: reader.opt_string(&["group_name", "groupName", "group"]),
            conference,
            division: reader.opt_string(&["division"]),
        },
        description: reader.opt_string(&["description"]),
        form: reader.opt_string(&["form"]),
        head_to_head_wins: reader.opt_counter(&["head_to_head_wins", "headToHeadWins", "h2h_wins"])?,
        played_reported,
        derived: Derived {
            win_percentage: reader
                .opt_f64(&["win_percentage", "winPercentage", "pct"])
                .and_then(normalize_fraction),
            differential: reader.opt_i64(&[
                "differential",
                "diff",
                "goal_difference",
                "goalDifference",
                "point_differential",
                "pointDifferential",
                "run_differential",
                "runDifferential",
            ]),
            points: reader.opt_counter(&["points", "pts"])?,
            streak: reader.streak(),
            games_behind: reader.games_behind(),
        },
        stats,
    })
}

fn baseball_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Baseball(BaseballStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        runs_for: row.counter(&["runs_for", "runsFor", "runs_scored", "runsScored"])?,
        runs_against: row.counter(&["runs_against", "runsAgainst", "runs_allowed", "runsAllowed"])?,
    }))
}

fn basketball_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Basketball(BasketballStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        points_for: row.counter(&["points_for", "pointsFor"])?,
        points_against: row.counter(&["points_against", "pointsAgainst"])?,
    }))
}

fn cricket_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Cricket(CricketStats {
        matches_played: row.counter(MATCHES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        ties: row.counter(&["ties", "tied"])?,
        no_result: row.counter(&["no_result", "noResult", "nr"])?,
        net_run_rate: row.opt_f64(&["net_run_rate", "netRunRate", "nrr"]),
        runs_for: row.opt_string(&["runs_for", "runsFor"]),
        runs_against: row.opt_string(&["runs_against", "runsAgainst"]),
    }))
}

fn handball_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Handball(HandballStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        draws: row.counter(&["draws", "drawn"])?,
        losses: row.counter(&["losses", "lost"])?,
        goals_for: row.counter(&["goals_for", "goalsFor"])?,
        goals_against: row.counter(&["goals_against", "goalsAgainst"])?,
    }))
}

fn hockey_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Hockey(HockeyStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        overtime_losses: row.counter(&["overtime_losses", "overtimeLosses", "ot_losses", "otl"])?,
        goals_for: row.counter(&["goals_for", "goalsFor"])?,
        goals_against: row.counter(&["goals_against", "goalsAgainst"])?,
    }))
}

fn american_football_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::AmericanFootball(AmericanFootballStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        ties: row.counter(&["ties", "tied"])?,
        points_for: row.counter(&["points_for", "pointsFor"])?,
        points_against: row.counter(&["points_against", "pointsAgainst"])?,
    }))
}

fn rugby_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Rugby(RugbyStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        draws: row.counter(&["draws", "drawn"])?,
        losses: row.counter(&["losses", "lost"])?,
        points_for: row.counter(&["points_for", "pointsFor"])?,
        points_against: row.counter(&["points_against", "pointsAgainst"])?,
        bonus_points: row.counter(&["bonus_points", "bonusPoints"])?,
    }))
}

fn volleyball_stats(row: &RowReader<'_>) -> Result<SportStats, StandingsError> {
    Ok(SportStats::Volleyball(VolleyballStats {
        games_played: row.counter(GAMES_PLAYED)?,
        wins: row.counter(&["wins", "won"])?,
        losses: row.counter(&["losses", "lost"])?,
        sets_won: row.counter(&["sets_won", "setsWon"])?,
        sets_lost: row.counter(&["sets_lost", "setsLost"])?,
    }))
}

/// Field accessors over one raw row, carrying the row index for errors.
pub struct RowReader<'a> {
    row: usize,
    value: &'a Value,
}

impl<'a> RowReader<'a> {
    pub fn new(row: usize, value: &'a Value) -> Result<Self, StandingsError> {
        if !value.is_object() {
            return Err(StandingsError::malformed(row, "row is not an object"));
        }
        Ok(Self { row, value })
    }

    fn team(&self) -> Result<Team, StandingsError> {
        let nested = self.value.get("team").filter(|v| v.is_object());
        let (id, name, logo, slug) = match nested {
            Some(team) => (
                pick_string(team, &["id"]),
                pick_string(team, &["name"]),
                pick_string(team, &["logo", "logo_url", "logoUrl"]),
                pick_string(team, &["slug"]),
            ),
            None => (
                self.opt_string(&["team_id", "teamId"]),
                self.opt_string(&["team_name", "teamName"]),
                self.opt_string(&["team_logo", "teamLogo"]),
                self.opt_string(&["team_slug", "teamSlug"]),
            ),
        };
        let id = id.ok_or_else(|| StandingsError::malformed(self.row, "missing team.id"))?;
        let name = name.ok_or_else(|| StandingsError::malformed(self.row, "missing team.name"))?;
        Ok(Team {
            id,
            name,
            logo: logo.unwrap_or_default(),
            slug,
        })
    }

    fn position(&self) -> Result<i32, StandingsError> {
        let Some(raw) = pick_present(self.value, &["position", "rank"]) else {
            return Err(StandingsError::malformed(self.row, "missing position"));
        };
        let parsed = match raw {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .map(|p| p.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .ok_or_else(|| StandingsError::malformed(self.row, format!("invalid position {raw}")))
    }

    pub fn counter(&self, keys: &[&str]) -> Result<u32, StandingsError> {
        Ok(self.opt_counter(keys)?.unwrap_or(0))
    }

    pub fn opt_counter(&self, keys: &[&str]) -> Result<Option<u32>, StandingsError> {
        let Some(raw) = pick_present(self.value, keys) else {
            return Ok(None);
        };
        let parsed = match raw {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        match parsed.and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Ok(Some(n)),
            None => Err(StandingsError::malformed(
                self.row,
                format!("invalid counter {}={raw}", keys[0]),
            )),
        }
    }

    pub fn opt_string(&self, keys: &[&str]) -> Option<String> {
        pick_string(self.value, keys)
    }

    pub fn opt_f64(&self, keys: &[&str]) -> Option<f64> {
        let raw = pick_present(self.value, keys)?;
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_number(s),
            _ => None,
        };
        parsed.filter(|f| f.is_finite())
    }

    pub fn opt_i64(&self, keys: &[&str]) -> Option<i64> {
        let raw = pick_present(self.value, keys)?;
        match raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().trim_start_matches('+').parse::<i64>().ok(),
            _ => None,
        }
    }

    fn streak(&self) -> String {
        match pick_present(self.value, &["streak"]) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(v) if v > 0 => format!("+{v}"),
                Some(v) => v.to_string(),
                None => String::new(),
            },
            _ => String::new(),
        }
    }

    fn games_behind(&self) -> Option<f64> {
        let raw = pick_present(self.value, &["games_behind", "gamesBehind", "gb"])?;
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let t = s.trim();
                // Leaders are printed as a dash.
                if matches!(t, "-" | "\u{2014}" | "\u{2013}") {
                    Some(0.0)
                } else {
                    parse_number(t)
                }
            }
            _ => None,
        };
        parsed.filter(|f| f.is_finite() && *f >= 0.0)
    }
}

fn pick_present<'v>(value: &'v Value, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            let text = match v {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => continue,
            };
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Accepts 0..=1 as-is and 1..=100 as a percentage.
fn normalize_fraction(value: f64) -> Option<f64> {
    if value < 0.0 {
        None
    } else if value <= 1.0 {
        Some(value)
    } else if value <= 100.0 {
        Some(value / 100.0)
    } else {
        None
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_end_matches('%').trim_start_matches('+');
    if s.is_empty() || s == "-" {
        return None;
    }
    s.parse::<f64>().ok()
}
