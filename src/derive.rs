//! Derived metrics: fill gaps from primitive counters, never overwrite a
//! source value. Running either pass twice gives the same result as once.

use crate::registry::{DerivedPolicy, PointsRule, SportProfile};
use crate::standing::{SportStats, Standing};

/// wins / played, 0 when nothing has been played. Clamped to [0, 1] so
/// incoherent counters can't produce a percentage above one.
pub fn win_percentage(wins: u32, played: u32) -> f64 {
    if played == 0 {
        return 0.0;
    }
    (f64::from(wins) / f64::from(played)).clamp(0.0, 1.0)
}

/// Win percentage as used for display and ranking: source value if present.
pub fn effective_win_percentage(standing: &Standing) -> f64 {
    standing
        .derived
        .win_percentage
        .unwrap_or_else(|| win_percentage(standing.stats.wins(), standing.games_played()))
}

pub fn differential(stats: &SportStats) -> Option<i64> {
    stats
        .scored_conceded()
        .map(|(scored, conceded)| i64::from(scored) - i64::from(conceded))
}

pub fn standings_points(stats: &SportStats, rule: PointsRule) -> u32 {
    let (wins, draws, ot_losses, bonus) = match stats {
        SportStats::Cricket(s) => (s.wins, s.ties.saturating_add(s.no_result), 0, 0),
        SportStats::Handball(s) => (s.wins, s.draws, 0, 0),
        SportStats::Hockey(s) => (s.wins, 0, s.overtime_losses, 0),
        SportStats::Rugby(s) => (s.wins, s.draws, 0, s.bonus_points),
        SportStats::AmericanFootball(s) => (s.wins, s.ties, 0, 0),
        SportStats::Baseball(s) => (s.wins, 0, 0, 0),
        SportStats::Basketball(s) => (s.wins, 0, 0, 0),
        SportStats::Volleyball(s) => (s.wins, 0, 0, 0),
    };
    let bonus = if rule.add_bonus { bonus } else { 0 };
    wins.saturating_mul(rule.per_win)
        .saturating_add(draws.saturating_mul(rule.per_draw))
        .saturating_add(ot_losses.saturating_mul(rule.per_overtime_loss))
        .saturating_add(bonus)
}

/// Row-local pass using the standard policy for the row's sport.
pub fn derive_missing(standing: &Standing) -> Standing {
    let profile = SportProfile::standard(standing.sport());
    derive_missing_with(standing, &profile.derived)
}

pub fn derive_missing_with(standing: &Standing, policy: &DerivedPolicy) -> Standing {
    let mut out = standing.clone();
    let stats = &standing.stats;

    if out.derived.win_percentage.is_none() {
        out.derived.win_percentage = Some(win_percentage(stats.wins(), standing.games_played()));
    }
    if out.derived.differential.is_none() {
        out.derived.differential = differential(stats);
    }
    if out.derived.points.is_none() {
        out.derived.points = policy.points.map(|rule| standings_points(stats, rule));
    }

    let streak = normalize_streak(&out.derived.streak);
    out.derived.streak = if streak.is_empty() {
        standing
            .form
            .as_deref()
            .map(streak_from_form)
            .unwrap_or_default()
    } else {
        streak
    };

    out
}

/// Group-relative pass. `rows` must already be in final order; the first row
/// is the leader.
pub fn fill_games_behind(rows: &[Standing]) -> Vec<Standing> {
    let Some(leader) = rows.first() else {
        return Vec::new();
    };
    let leader_wins = i64::from(leader.stats.wins());
    let leader_losses = i64::from(leader.stats.losses());

    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            if out.derived.games_behind.is_none() {
                out.derived.games_behind =
                    Some(games_behind(leader_wins, leader_losses, row));
            }
            out
        })
        .collect()
}

fn games_behind(leader_wins: i64, leader_losses: i64, row: &Standing) -> f64 {
    let wins = i64::from(row.stats.wins());
    let losses = i64::from(row.stats.losses());
    ((leader_wins - wins) + (losses - leader_losses)) as f64 / 2.0
}

/// Rewrites `W3`, `3W`, `Won 3`, `+3` and `-2` as `W3` / `L2`.
/// Anything else (`W1L2`, `W2, L1`, `hot`) is returned trimmed and untouched.
pub fn normalize_streak(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return match n {
            n if n > 0 => format!("W{n}"),
            n if n < 0 => format!("L{}", n.unsigned_abs()),
            _ => String::new(),
        };
    }

    match parse_streak(trimmed) {
        Some((_, 0)) => String::new(),
        Some((kind, count)) => format!("{kind}{count}"),
        None => trimmed.to_string(),
    }
}

/// Matches exactly one of `W3`, `3W` or `Won 3` (case-insensitive).
fn parse_streak(text: &str) -> Option<(char, u32)> {
    let mut words = text.split_whitespace();
    let (first, second) = (words.next()?, words.next());
    if words.next().is_some() {
        return None;
    }

    if let Some(count) = second {
        let kind = streak_word(first)?;
        return Some((kind, parse_count(count)?));
    }

    let split = first.find(|c: char| c.is_ascii_digit())?;
    let (head, tail) = first.split_at(split);
    if head.is_empty() {
        // `3W`
        let letter = tail.find(|c: char| !c.is_ascii_digit())?;
        let (digits, suffix) = tail.split_at(letter);
        return Some((streak_letter(suffix)?, parse_count(digits)?));
    }
    Some((streak_letter(head)?, parse_count(tail)?))
}

fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn streak_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let kind = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !matches!(kind, 'W' | 'L' | 'T' | 'D') {
        return None;
    }
    Some(kind)
}

fn streak_word(word: &str) -> Option<char> {
    match word.to_ascii_lowercase().as_str() {
        "w" | "won" | "win" | "wins" => Some('W'),
        "l" | "lost" | "loss" | "losses" => Some('L'),
        "t" | "tied" | "tie" | "ties" => Some('T'),
        "d" | "drew" | "draw" | "draws" => Some('D'),
        _ => None,
    }
}

/// Form strings run oldest to newest; the streak is the trailing run.
pub fn streak_from_form(form: &str) -> String {
    let results: Vec<char> = form
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| matches!(c, 'W' | 'L' | 'T' | 'D'))
        .collect();
    let Some(&last) = results.last() else {
        return String::new();
    };
    let run = results.iter().rev().take_while(|c| **c == last).count();
    format!("{last}{run}")
}
