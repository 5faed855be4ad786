use proptest::prelude::*;
use serde_json::json;

use standings_engine::adapt::adapt;
use standings_engine::grouping::{group, group_with};
use standings_engine::registry::GroupingDepth;
use standings_engine::sport::Sport;
use standings_engine::standing::{Standing, total_rows};

fn row(sport: Sport, id: &str, stage: Option<&str>, group_name: Option<&str>) -> Standing {
    let raw = json!({
        "id": id,
        "position": 1,
        "team": {"id": id, "name": id},
        "stage": stage,
        "group_name": group_name,
    });
    adapt(sport, 0, &raw).expect("test row should adapt")
}

fn nested_row(id: &str, conference: &str, division: Option<&str>) -> Standing {
    let raw = json!({
        "id": id,
        "position": 1,
        "team": {"id": id, "name": id},
        "conference": conference,
        "division": division,
    });
    adapt(Sport::AmericanFootball, 0, &raw).expect("test row should adapt")
}

#[test]
fn empty_input_yields_no_groups() {
    assert!(group(&[]).is_empty());
    assert!(group_with(Vec::new(), GroupingDepth::ConferenceDivision).is_empty());
}

#[test]
fn groups_keep_first_seen_order() {
    let rows = vec![
        row(Sport::Handball, "a", Some("Regular Season"), Some("Group B")),
        row(Sport::Handball, "b", Some("Playoffs"), None),
        row(Sport::Handball, "c", Some("Regular Season"), Some("Group A")),
        row(Sport::Handball, "d", Some("Regular Season"), Some("Group B")),
    ];
    let groups = group(&rows);
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Regular Season - Group B", "Playoffs", "Regular Season - Group A"]
    );
    let first_ids: Vec<&str> = groups[0].standings.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(first_ids, vec!["a", "d"]);
}

#[test]
fn rows_without_metadata_share_default_group() {
    let rows = vec![
        row(Sport::Rugby, "a", None, None),
        row(Sport::Rugby, "b", None, None),
    ];
    let groups = group(&rows);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Standings");
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn conference_division_nesting() {
    let rows = vec![
        nested_row("kc", "AFC", Some("AFC West")),
        nested_row("det", "NFC", Some("NFC North")),
        nested_row("buf", "AFC", Some("AFC East")),
        nested_row("lv", "AFC", Some("AFC West")),
        nested_row("wild", "AFC", None),
    ];
    let groups = group(&rows);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "AFC");
    assert_eq!(groups[0].conference.as_deref(), Some("AFC"));

    let divisions: Vec<&str> = groups[0].divisions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(divisions, vec!["AFC West", "AFC East"]);
    assert_eq!(groups[0].divisions[0].standings.len(), 2);
    assert_eq!(groups[0].standings.len(), 1);
    assert_eq!(groups[0].len(), 4);
    assert_eq!(groups[1].divisions[0].name, "NFC North");
}

#[test]
fn flat_sports_ignore_conference_and_division() {
    let raw = json!({
        "position": 1,
        "team": {"id": "x", "name": "X"},
        "conference": "East",
        "division": "Atlantic",
    });
    let standing = adapt(Sport::Volleyball, 0, &raw).expect("row should adapt");
    let groups = group(&[standing]);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].divisions.is_empty());
    assert_eq!(groups[0].conference, None);
}

fn label(idx: u8) -> Option<&'static str> {
    match idx {
        0 => None,
        1 => Some("A"),
        2 => Some("B"),
        _ => Some("C"),
    }
}

proptest! {
    #[test]
    fn grouping_is_a_partition(
        keys in prop::collection::vec((0u8..4, 0u8..4, 0u8..3, 0u8..3), 0..40)
    ) {
        let rows: Vec<Standing> = keys
            .iter()
            .enumerate()
            .map(|(idx, (stage, grp, conf, div))| {
                let raw = json!({
                    "id": format!("r{idx}"),
                    "position": idx + 1,
                    "team": {"id": format!("t{idx}"), "name": format!("Team {idx}")},
                    "stage": label(*stage),
                    "group_name": label(*grp),
                    "conference": label(*conf),
                    "division": label(*div),
                });
                adapt(Sport::Basketball, idx, &raw).expect("generated row should adapt")
            })
            .collect();

        let groups = group(&rows);
        prop_assert_eq!(total_rows(&groups), rows.len());

        let mut seen: Vec<String> = groups
            .iter()
            .flat_map(|g| g.iter_all().map(|s| s.id.clone()))
            .collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), rows.len());
        prop_assert!(groups.iter().all(|g| !g.is_empty()));
    }
}
