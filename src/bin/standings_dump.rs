use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use standings_engine::config::{self, EngineConfig};
use standings_engine::derive::effective_win_percentage;
use standings_engine::format;
use standings_engine::logging::init_tracing;
use standings_engine::ranking::RankMode;
use standings_engine::{Standing, StandingsEngine};

fn main() -> Result<()> {
    config::load_dotenv();
    init_tracing();

    let sport = parse_value_arg("sport").ok_or_else(|| anyhow!("missing --sport <id>"))?;
    let path = parse_value_arg("file")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("missing --file <path>"))?;

    let mut cfg = EngineConfig::from_env();
    if has_flag("--recompute") {
        cfg.rank_mode = RankMode::Recompute;
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let engine = StandingsEngine::new(cfg).context("standings registry invalid")?;
    let report = engine
        .normalize_json(&sport, &raw)
        .with_context(|| format!("normalize {sport} standings"))?;

    if has_flag("--json") {
        let out = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{out}");
        return Ok(());
    }

    println!("{} standings ({} rows)", report.sport.label(), report.row_count());
    for group in &report.groups {
        println!();
        println!("== {} ==", group.name);
        print_rows(&group.standings, "");
        for division in &group.divisions {
            println!("  -- {} --", division.name);
            print_rows(&division.standings, "  ");
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped rows: {}", report.skipped.len());
        for row in report.skipped.iter().take(10) {
            println!("   - row {}: {}", row.row, row.reason);
        }
    }
    if !report.incoherent.is_empty() {
        println!();
        println!("Incoherent counters: {}", report.incoherent.len());
        for item in report.incoherent.iter().take(10) {
            println!("   - {}: played {} vs outcomes {}", item.id, item.played, item.outcomes);
        }
    }

    Ok(())
}

fn print_rows(rows: &[Standing], indent: &str) {
    for row in rows {
        println!(
            "{indent}{:>3}  {:<28} {:>3} {:>3}-{:<3} {:>6} {:>6} {:>5} {:>5} {:>4}",
            row.position,
            row.team.name,
            row.games_played(),
            row.stats.wins(),
            row.stats.losses(),
            format::win_percentage(effective_win_percentage(row)),
            format::differential(row.derived.differential),
            row.derived.points.map(|p| p.to_string()).unwrap_or_default(),
            format::games_behind(row.derived.games_behind),
            row.derived.streak,
        );
    }
}

fn has_flag(flag: &str) -> bool {
    std::env::args().skip(1).any(|arg| arg == flag)
}

fn parse_value_arg(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let long = format!("--{name}");
    let prefix = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == long {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
