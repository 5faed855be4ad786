use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StandingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Baseball,
    Basketball,
    Cricket,
    Handball,
    Hockey,
    AmericanFootball,
    Rugby,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 8] = [
        Sport::Baseball,
        Sport::Basketball,
        Sport::Cricket,
        Sport::Handball,
        Sport::Hockey,
        Sport::AmericanFootball,
        Sport::Rugby,
        Sport::Volleyball,
    ];

    /// Canonical identifier, the same string `from_str` accepts first.
    pub fn id(self) -> &'static str {
        match self {
            Sport::Baseball => "baseball",
            Sport::Basketball => "basketball",
            Sport::Cricket => "cricket",
            Sport::Handball => "handball",
            Sport::Hockey => "hockey",
            Sport::AmericanFootball => "american-football",
            Sport::Rugby => "rugby",
            Sport::Volleyball => "volleyball",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sport::Baseball => "Baseball",
            Sport::Basketball => "Basketball",
            Sport::Cricket => "Cricket",
            Sport::Handball => "Handball",
            Sport::Hockey => "Hockey",
            Sport::AmericanFootball => "American Football",
            Sport::Rugby => "Rugby",
            Sport::Volleyball => "Volleyball",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Sport {
    type Err = StandingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim().to_lowercase().replace(['_', ' '], "-");
        let sport = match s.as_str() {
            "baseball" | "mlb" => Sport::Baseball,
            "basketball" | "nba" => Sport::Basketball,
            "cricket" => Sport::Cricket,
            "handball" => Sport::Handball,
            "hockey" | "ice-hockey" | "nhl" => Sport::Hockey,
            "american-football" | "football-us" | "nfl" => Sport::AmericanFootball,
            "rugby" => Sport::Rugby,
            "volleyball" => Sport::Volleyball,
            _ => return Err(StandingsError::UnknownSport(raw.to_string())),
        };
        Ok(sport)
    }
}
