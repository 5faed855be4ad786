//! Display helpers for the presentation layer.

pub const DEFAULT_GROUP_NAME: &str = "Standings";

/// `.750`, `1.000`.
pub fn win_percentage(value: f64) -> String {
    let clamped = value.clamp(0.0, 1.0);
    let text = format!("{clamped:.3}");
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Leaders print as a dash, halves keep one decimal.
pub fn games_behind(value: Option<f64>) -> String {
    match value {
        None => String::new(),
        Some(v) if v == 0.0 => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
    }
}

pub fn differential(value: Option<i64>) -> String {
    match value {
        Some(v) if v > 0 => format!("+{v}"),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// Splits a cricket "245/6" cell for display. The halves stay text.
pub fn split_runs_wickets(raw: &str) -> Option<(&str, &str)> {
    let (runs, wickets) = raw.trim().split_once('/')?;
    let runs = runs.trim();
    let wickets = wickets.trim();
    if runs.is_empty() || wickets.is_empty() {
        return None;
    }
    Some((runs, wickets))
}

pub fn group_title(stage: Option<&str>, group_name: Option<&str>, conference: Option<&str>) -> String {
    let parts: Vec<&str> = [stage, group_name, conference]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        DEFAULT_GROUP_NAME.to_string()
    } else {
        parts.join(" - ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_drops_leading_zero() {
        assert_eq!(win_percentage(0.75), ".750");
        assert_eq!(win_percentage(1.0), "1.000");
        assert_eq!(win_percentage(0.0), ".000");
    }

    #[test]
    fn gb_cells() {
        assert_eq!(games_behind(Some(0.0)), "-");
        assert_eq!(games_behind(Some(3.0)), "3");
        assert_eq!(games_behind(Some(2.5)), "2.5");
        assert_eq!(games_behind(None), "");
    }

    #[test]
    fn runs_wickets_split() {
        assert_eq!(split_runs_wickets("245/6"), Some(("245", "6")));
        assert_eq!(split_runs_wickets("1234 / 56.2"), Some(("1234", "56.2")));
        assert_eq!(split_runs_wickets("245"), None);
    }

    #[test]
    fn titles() {
        assert_eq!(group_title(None, None, None), "Standings");
        assert_eq!(
            group_title(Some("Regular Season"), Some("Group A"), None),
            "Regular Season - Group A"
        );
    }
}
