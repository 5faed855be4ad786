//! Grouping & stage resolver.
//!
//! Buckets standings by stage + group name (+ conference and division for
//! sports that nest). Group keys keep first-seen input order, never
//! alphabetical, so a source listing "Regular Season" before "Playoffs"
//! renders that way.

use std::collections::HashMap;

use crate::format::group_title;
use crate::registry::{GroupingDepth, SportProfile};
use crate::standing::{Division, RankOrigin, Standing, StandingsGroup};

type GroupKey = (Option<String>, Option<String>, Option<String>);

/// Groups with the standard depth for the rows' sport.
pub fn group(standings: &[Standing]) -> Vec<StandingsGroup> {
    let Some(first) = standings.first() else {
        return Vec::new();
    };
    let depth = SportProfile::standard(first.sport()).grouping;
    group_with(standings.to_vec(), depth)
}

pub fn group_with(standings: Vec<Standing>, depth: GroupingDepth) -> Vec<StandingsGroup> {
    let nested = depth == GroupingDepth::ConferenceDivision;
    let mut groups: Vec<StandingsGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for standing in standings {
        let g = &standing.grouping;
        let key: GroupKey = (
            g.stage.clone(),
            g.group_name.clone(),
            if nested { g.conference.clone() } else { None },
        );
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            let (stage, group_name, conference) = key;
            groups.push(StandingsGroup {
                name: group_title(stage.as_deref(), group_name.as_deref(), conference.as_deref()),
                stage,
                group_name,
                conference,
                standings: Vec::new(),
                divisions: Vec::new(),
                origin: RankOrigin::Source,
            });
            groups.len() - 1
        });
        let target = &mut groups[slot];

        let division = if nested { g.division.clone() } else { None };
        match division {
            Some(name) => match target.divisions.iter_mut().find(|d| d.name == name) {
                Some(existing) => existing.standings.push(standing),
                None => target.divisions.push(Division {
                    name,
                    standings: vec![standing],
                    origin: RankOrigin::Source,
                }),
            },
            None => target.standings.push(standing),
        }
    }

    groups
}
