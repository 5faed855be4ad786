use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::adapt::{stats_adapter, StatsAdapter};
use crate::error::StandingsError;
use crate::ranking::{comparator_for, Comparator};
use crate::sport::Sport;

/// Primary ranking key a sport's tables are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingRule {
    WinPercentage,
    PointsTable,
}

pub fn standard_ranking(sport: Sport) -> RankingRule {
    match sport {
        Sport::Baseball | Sport::Basketball | Sport::AmericanFootball => RankingRule::WinPercentage,
        Sport::Cricket | Sport::Handball | Sport::Hockey | Sport::Rugby | Sport::Volleyball => {
            RankingRule::PointsTable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingDepth {
    Flat,
    ConferenceDivision,
}

/// Standings points per outcome. "Draw" covers draws, ties and no-results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsRule {
    pub per_win: u32,
    pub per_draw: u32,
    pub per_overtime_loss: u32,
    pub add_bonus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedPolicy {
    pub points: Option<PointsRule>,
    pub games_behind: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SportProfile {
    pub sport: Sport,
    pub adapter: StatsAdapter,
    pub ranking: RankingRule,
    pub grouping: GroupingDepth,
    pub derived: DerivedPolicy,
}

impl SportProfile {
    pub fn standard(sport: Sport) -> Self {
        let (grouping, derived) = match sport {
            Sport::Baseball | Sport::Basketball => (
                GroupingDepth::ConferenceDivision,
                DerivedPolicy {
                    points: None,
                    games_behind: true,
                },
            ),
            Sport::AmericanFootball => (
                GroupingDepth::ConferenceDivision,
                DerivedPolicy {
                    points: None,
                    games_behind: false,
                },
            ),
            Sport::Hockey => (
                GroupingDepth::ConferenceDivision,
                DerivedPolicy {
                    points: Some(PointsRule {
                        per_win: 2,
                        per_draw: 0,
                        per_overtime_loss: 1,
                        add_bonus: false,
                    }),
                    games_behind: false,
                },
            ),
            Sport::Handball => (
                GroupingDepth::Flat,
                DerivedPolicy {
                    points: Some(PointsRule {
                        per_win: 2,
                        per_draw: 1,
                        per_overtime_loss: 0,
                        add_bonus: false,
                    }),
                    games_behind: false,
                },
            ),
            Sport::Rugby => (
                GroupingDepth::Flat,
                DerivedPolicy {
                    points: Some(PointsRule {
                        per_win: 4,
                        per_draw: 2,
                        per_overtime_loss: 0,
                        add_bonus: true,
                    }),
                    games_behind: false,
                },
            ),
            Sport::Cricket => (
                GroupingDepth::Flat,
                DerivedPolicy {
                    points: Some(PointsRule {
                        per_win: 2,
                        per_draw: 1,
                        per_overtime_loss: 0,
                        add_bonus: false,
                    }),
                    games_behind: false,
                },
            ),
            // Set-score dependent points can't be rebuilt from totals.
            Sport::Volleyball => (
                GroupingDepth::Flat,
                DerivedPolicy {
                    points: None,
                    games_behind: false,
                },
            ),
        };
        Self {
            sport,
            adapter: stats_adapter(sport),
            ranking: standard_ranking(sport),
            grouping,
            derived,
        }
    }

    pub fn comparator(&self) -> Comparator {
        comparator_for(self.ranking)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SportRegistry {
    profiles: HashMap<Sport, SportProfile>,
}

impl SportRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for sport in Sport::ALL {
            registry.register(SportProfile::standard(sport));
        }
        registry
    }

    pub fn register(&mut self, profile: SportProfile) -> Option<SportProfile> {
        self.profiles.insert(profile.sport, profile)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn validate(&self) -> Result<(), StandingsError> {
        if self.profiles.is_empty() {
            return Err(StandingsError::EmptyRegistry);
        }
        Ok(())
    }

    /// Like `validate`, but every known sport must have a profile.
    pub fn validate_complete(&self) -> Result<(), StandingsError> {
        self.validate()?;
        match Sport::ALL.iter().find(|s| !self.profiles.contains_key(*s)) {
            Some(missing) => Err(StandingsError::MissingProfile(*missing)),
            None => Ok(()),
        }
    }

    pub fn profile(&self, sport: Sport) -> Result<&SportProfile, StandingsError> {
        self.validate()?;
        self.profiles
            .get(&sport)
            .ok_or(StandingsError::MissingProfile(sport))
    }

    pub fn resolve(&self, sport_id: &str) -> Result<&SportProfile, StandingsError> {
        let sport: Sport = sport_id.parse()?;
        self.profile(sport)
    }
}

static REGISTRY: OnceCell<SportRegistry> = OnceCell::new();

pub fn default_registry() -> Result<&'static SportRegistry, StandingsError> {
    REGISTRY.get_or_try_init(|| {
        let registry = SportRegistry::standard();
        registry.validate_complete()?;
        Ok(registry)
    })
}
