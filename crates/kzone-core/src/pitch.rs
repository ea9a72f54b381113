//! Classified pitch records and the situation attributes they carry

use std::{fmt, str::FromStr};

use crate::zone::Zone;

/// At-bat events that count as a strikeout.
pub const STRIKEOUT_EVENTS: [&str; 4] = [
    "strikeout",
    "strikeout_swinging",
    "strikeout_looking",
    "strikeout_double_play",
];

/// Batter stance or pitcher throwing hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown hand {value:?} (expected \"L\" or \"R\")")]
pub struct UnknownHandError {
    pub value: String,
}

impl Hand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Hand::Left => "L",
            Hand::Right => "R",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hand {
    type Err = UnknownHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(Hand::Left),
            "R" | "r" => Ok(Hand::Right),
            other => Err(UnknownHandError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Batter stance against pitcher hand, displayed as `{stance}-{throws}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{stance}-{throws}")]
pub struct Matchup {
    pub stance: Hand,
    pub throws: Hand,
}

/// Ball-strike count before the pitch, displayed as `{balls}-{strikes}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{balls}-{strikes}")]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

/// Identifies the at-bat a pitch belongs to.
///
/// Ordering follows field order, so sorting by this key orders at-bats by
/// game, then pitcher, batter and at-bat number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtBatKey {
    /// Game identifier (the game date)
    pub game: String,
    pub pitcher: u32,
    pub batter: u32,
    pub at_bat_number: u32,
}

/// A single pitch whose plate location has been classified into a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchRecord {
    pub at_bat: AtBatKey,
    /// 1-based pitch number within the at-bat
    pub pitch_number: u32,
    /// Pitch type code (e.g. `FF`, `SL`)
    pub pitch_type: String,
    pub plate_x: f64,
    pub plate_z: f64,
    pub matchup: Matchup,
    pub count: Count,
    /// Outcome type: `S` (strike), `B` (ball) or `X` (in play)
    pub outcome_type: String,
    /// Outcome description (e.g. `called_strike`, `swinging_strike`)
    pub description: String,
    /// At-bat event, present on the last pitch of an at-bat
    pub event: Option<String>,
    pub zone: Zone,
}

impl PitchRecord {
    /// The `{pitch_type}-{zone}` token recorded in pattern tables.
    #[must_use]
    pub fn outcome_token(&self) -> String {
        format!("{}-{}", self.pitch_type, self.zone)
    }

    #[must_use]
    pub fn is_strikeout(&self) -> bool {
        self.event
            .as_deref()
            .is_some_and(|event| STRIKEOUT_EVENTS.contains(&event))
    }
}
