use std::cmp::Ordering;

use proptest::prelude::*;
use serde_json::json;

use standings_engine::adapt::adapt;
use standings_engine::derive::derive_missing;
use standings_engine::ranking::{
    compare, compare_points_table, compare_win_percentage_table, positions_usable, rank_bucket,
    RankMode,
};
use standings_engine::sport::Sport;
use standings_engine::standing::{RankOrigin, Standing};

fn basketball(name: &str, position: i32, wins: u32, played: u32, pf: u32, pa: u32) -> Standing {
    let raw = json!({
        "id": name.to_lowercase(),
        "position": position,
        "team": {"id": name.to_lowercase(), "name": name},
        "games_played": played,
        "wins": wins,
        "losses": played - wins,
        "points_for": pf,
        "points_against": pa,
    });
    derive_missing(&adapt(Sport::Basketball, 0, &raw).expect("test row should adapt"))
}

fn hockey(name: &str, wins: u32, losses: u32, otl: u32) -> Standing {
    let raw = json!({
        "position": 1,
        "team": {"id": name, "name": name},
        "games_played": wins + losses + otl,
        "wins": wins,
        "losses": losses,
        "overtime_losses": otl,
    });
    derive_missing(&adapt(Sport::Hockey, 0, &raw).expect("test row should adapt"))
}

#[test]
fn higher_win_percentage_ranks_first() {
    let a = basketball("Alpha", 0, 10, 10, 100, 90);
    let b = basketball("Beta", 0, 8, 10, 100, 90);
    assert_eq!(compare(&a, &b), Ordering::Less);
    assert_eq!(compare(&b, &a), Ordering::Greater);
}

#[test]
fn differential_breaks_win_percentage_tie() {
    let plus = basketball("Plus", 0, 5, 10, 110, 100);
    let minus = basketball("Minus", 0, 5, 10, 97, 100);
    assert_eq!(plus.derived.differential, Some(10));
    assert_eq!(minus.derived.differential, Some(-3));
    assert_eq!(compare_win_percentage_table(&plus, &minus), Ordering::Less);
}

#[test]
fn head_to_head_then_name_break_remaining_ties() {
    let mut a = basketball("zeta", 0, 5, 10, 100, 100);
    let mut b = basketball("Alpha", 0, 5, 10, 100, 100);
    // Case-insensitive name fallback.
    assert_eq!(compare(&b, &a), Ordering::Less);

    a.head_to_head_wins = Some(2);
    b.head_to_head_wins = Some(1);
    assert_eq!(compare(&a, &b), Ordering::Less);

    b.head_to_head_wins = None;
    assert_eq!(compare(&a, &b), Ordering::Less);
}

#[test]
fn zero_games_played_does_not_divide_by_zero() {
    let fresh = basketball("Fresh", 0, 0, 0, 0, 0);
    let played = basketball("Played", 0, 1, 2, 0, 0);
    assert_eq!(fresh.derived.win_percentage, Some(0.0));
    assert_eq!(compare(&played, &fresh), Ordering::Less);
}

#[test]
fn points_tables_rank_on_points_first() {
    // 13 wins + 2 OTL = 28 points beats 12 wins + 2 OTL = 26.
    let bos = hockey("Boston", 13, 5, 2);
    let tor = hockey("Toronto", 12, 6, 2);
    assert_eq!(bos.derived.points, Some(28));
    assert_eq!(compare_points_table(&bos, &tor), Ordering::Less);

    // More points outranks a better win percentage.
    let grinders = hockey("Grinders", 10, 2, 10);
    let sprinters = hockey("Sprinters", 12, 10, 0);
    assert_eq!(grinders.derived.points, Some(30));
    assert_eq!(sprinters.derived.points, Some(24));
    assert_eq!(compare(&grinders, &sprinters), Ordering::Less);
}

#[test]
fn points_ties_break_on_differential_not_win_percentage() {
    let unbeaten = json!({
        "position": 1,
        "team": {"id": "a", "name": "Unbeaten"},
        "games_played": 10, "wins": 10, "losses": 0, "overtime_losses": 0,
        "goals_for": 20, "goals_against": 30,
    });
    let scorers = json!({
        "position": 2,
        "team": {"id": "b", "name": "Scorers"},
        "games_played": 16, "wins": 9, "losses": 5, "overtime_losses": 2,
        "goals_for": 50, "goals_against": 20,
    });
    let a = derive_missing(&adapt(Sport::Hockey, 0, &unbeaten).unwrap());
    let b = derive_missing(&adapt(Sport::Hockey, 1, &scorers).unwrap());
    assert_eq!(a.derived.points, Some(20));
    assert_eq!(b.derived.points, Some(20));
    assert!(a.derived.win_percentage > b.derived.win_percentage);

    assert_eq!(compare(&b, &a), Ordering::Less);
    assert_eq!(compare_points_table(&a, &b), Ordering::Greater);
}

#[test]
fn compare_picks_family_from_sport() {
    let bos = hockey("Boston", 13, 5, 2);
    let tor = hockey("Toronto", 12, 6, 2);
    assert_eq!(compare(&bos, &tor), compare_points_table(&bos, &tor));

    let a = basketball("Alpha", 0, 10, 10, 100, 90);
    let b = basketball("Beta", 0, 8, 10, 100, 90);
    assert_eq!(compare(&b, &a), compare_win_percentage_table(&b, &a));
}

#[test]
fn usable_source_positions_are_kept_with_gaps() {
    let rows = vec![
        basketball("C", 5, 2, 10, 0, 0),
        basketball("A", 1, 8, 10, 0, 0),
        basketball("B", 3, 6, 10, 0, 0),
    ];
    assert!(positions_usable(&rows));
    let (ordered, origin) = rank_bucket(rows, compare_win_percentage_table, RankMode::TrustSource);
    assert_eq!(origin, RankOrigin::Source);
    let positions: Vec<i32> = ordered.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 3, 5]);
}

#[test]
fn duplicate_or_missing_positions_trigger_recompute() {
    let rows = vec![
        basketball("Low", 1, 2, 10, 0, 0),
        basketball("High", 1, 9, 10, 0, 0),
        basketball("Mid", 0, 5, 10, 0, 0),
    ];
    assert!(!positions_usable(&rows));
    let (ordered, origin) = rank_bucket(rows, compare_win_percentage_table, RankMode::TrustSource);
    assert_eq!(origin, RankOrigin::Computed);
    let names: Vec<&str> = ordered.iter().map(|s| s.team.name.as_str()).collect();
    assert_eq!(names, vec!["High", "Mid", "Low"]);
    let positions: Vec<i32> = ordered.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn recompute_mode_ignores_valid_source_positions() {
    let rows = vec![
        basketball("Worse", 1, 2, 10, 0, 0),
        basketball("Better", 2, 9, 10, 0, 0),
    ];
    let (ordered, origin) = rank_bucket(rows, compare_win_percentage_table, RankMode::Recompute);
    assert_eq!(origin, RankOrigin::Computed);
    assert_eq!(ordered[0].team.name, "Better");
    assert_eq!(ordered[0].position, 1);
}

fn arb_standing() -> impl Strategy<Value = Standing> {
    (0u32..12, 0u32..12, 0u32..60, 0u32..60, prop::option::of(0u32..4), 0u8..4).prop_map(
        |(wins, losses, pf, pa, h2h, name)| {
            let name = ["Ajax", "ajax", "Bravo", "Cobra"][name as usize];
            let mut raw = json!({
                "position": 1,
                "team": {"id": format!("{name}-{wins}-{losses}"), "name": name},
                "games_played": wins + losses,
                "wins": wins,
                "losses": losses,
                "points_for": pf,
                "points_against": pa,
            });
            if let Some(h2h) = h2h {
                raw["head_to_head_wins"] = json!(h2h);
            }
            derive_missing(&adapt(Sport::Basketball, 0, &raw).expect("generated row should adapt"))
        },
    )
}

fn arb_hockey() -> impl Strategy<Value = Standing> {
    (0u32..10, 0u32..10, 0u32..4, prop::option::of(0u32..30)).prop_map(
        |(wins, losses, otl, points)| {
            let mut raw = json!({
                "position": 1,
                "team": {"id": format!("h{wins}{losses}{otl}"), "name": "Club"},
                "games_played": wins + losses + otl,
                "wins": wins,
                "losses": losses,
                "overtime_losses": otl,
            });
            if let Some(points) = points {
                raw["points"] = json!(points);
            }
            derive_missing(&adapt(Sport::Hockey, 0, &raw).expect("generated row should adapt"))
        },
    )
}

proptest! {
    #[test]
    fn win_percentage_comparator_is_transitive(
        a in arb_standing(),
        b in arb_standing(),
        c in arb_standing(),
    ) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn points_comparator_is_transitive(
        a in arb_hockey(),
        b in arb_hockey(),
        c in arb_hockey(),
    ) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn recompute_assigns_dense_unique_positions(
        rows in prop::collection::vec(arb_standing(), 1..20)
    ) {
        let n = rows.len();
        let (ordered, _) = rank_bucket(rows, compare_win_percentage_table, RankMode::Recompute);
        let positions: Vec<i32> = ordered.iter().map(|s| s.position).collect();
        let expected: Vec<i32> = (1..=n as i32).collect();
        prop_assert_eq!(positions, expected);
        for pair in ordered.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }
}
