//! Context keys at decreasing specificity
//!
//! Every pitch is bucketed under several keys describing the situation it was
//! thrown in:
//!
//! | Granularity | Format | Example |
//! |---|---|---|
//! | full context | `{stance}-{throws}\|{balls}-{strikes}\|{sequence}\|p{i}` | `R-L\|1-1\|FF-SL\|p3` |
//! | first pitch | `{stance}-{throws}\|{balls}-{strikes}` (first pitch only) | `R-L\|0-0` |
//! | count | `{balls}-{strikes}` | `1-1` |
//! | matchup | `{stance}-{throws}` | `R-L` |
//!
//! `sequence` is the hyphen-joined list of the most recent preceding pitch
//! types, or `first` for the first pitch of an at-bat.
//!
//! # Examples
//!
//! ```
//! use kzone_analysis::context::{ContextKeyBuilder, Situation};
//! use kzone_core::{Count, Hand, Matchup};
//!
//! let situation = Situation {
//!     matchup: Matchup { stance: Hand::Right, throws: Hand::Left },
//!     count: Count { balls: 1, strikes: 1 },
//!     previous_pitch_types: vec!["CH", "FF", "SL"],
//! };
//! let keys = ContextKeyBuilder::default().keys(&situation);
//! assert_eq!(keys.full, "R-L|1-1|FF-SL|p4");
//! assert_eq!(keys.first_pitch, None);
//! assert_eq!(keys.count, "1-1");
//! assert_eq!(keys.matchup, "R-L");
//! ```

use std::fmt;

use kzone_core::{Count, Matchup};

use crate::{config::DEFAULT_SEQUENCE_WINDOW, sequence::AtBat};

/// Sequence token used in the full context key of a first pitch
pub const FIRST_PITCH_SEQUENCE: &str = "first";

/// The granularities a pattern table can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    FullContext,
    FirstPitch,
    Count,
    Matchup,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Granularity::FullContext => "full context",
            Granularity::FirstPitch => "first pitch",
            Granularity::Count => "count",
            Granularity::Matchup => "matchup",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

/// The situation a pitch is thrown in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Situation<'a> {
    pub matchup: Matchup,
    pub count: Count,
    /// Pitch types already thrown in this at-bat, oldest first
    pub previous_pitch_types: Vec<&'a str>,
}

impl<'a> Situation<'a> {
    /// The situation of the pitch at `index` (0-based) in an at-bat.
    #[must_use]
    pub fn from_at_bat(at_bat: &'a AtBat, index: usize) -> Self {
        let pitches = at_bat.pitches();
        let pitch = &pitches[index];
        Self {
            matchup: pitch.matchup,
            count: pitch.count,
            previous_pitch_types: pitches[..index]
                .iter()
                .map(|p| p.pitch_type.as_str())
                .collect(),
        }
    }

    /// 1-based position of the pitch within its at-bat
    #[must_use]
    pub fn position(&self) -> usize {
        self.previous_pitch_types.len() + 1
    }

    #[must_use]
    pub fn is_first_pitch(&self) -> bool {
        self.previous_pitch_types.is_empty()
    }
}

/// Keys of one situation at every granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextKeys {
    pub full: String,
    /// Present only for the first pitch of an at-bat
    pub first_pitch: Option<String>,
    pub count: String,
    pub matchup: String,
}

impl ContextKeys {
    #[must_use]
    pub fn get(&self, granularity: Granularity) -> Option<&str> {
        match granularity {
            Granularity::FullContext => Some(&self.full),
            Granularity::FirstPitch => self.first_pitch.as_deref(),
            Granularity::Count => Some(&self.count),
            Granularity::Matchup => Some(&self.matchup),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextKeyBuilder {
    sequence_window: usize,
}

impl Default for ContextKeyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_WINDOW)
    }
}

impl ContextKeyBuilder {
    #[must_use]
    pub const fn new(sequence_window: usize) -> Self {
        Self { sequence_window }
    }

    #[must_use]
    pub const fn sequence_window(&self) -> usize {
        self.sequence_window
    }

    #[must_use]
    pub fn keys(&self, situation: &Situation<'_>) -> ContextKeys {
        let matchup = situation.matchup.to_string();
        let count = situation.count.to_string();
        let matchup_count = format!("{matchup}|{count}");
        let full = format!(
            "{matchup_count}|{}|p{}",
            self.sequence_token(&situation.previous_pitch_types),
            situation.position()
        );
        ContextKeys {
            full,
            first_pitch: situation.is_first_pitch().then_some(matchup_count),
            count,
            matchup,
        }
    }

    fn sequence_token(&self, previous: &[&str]) -> String {
        if previous.is_empty() {
            return FIRST_PITCH_SEQUENCE.to_owned();
        }
        let start = previous.len().saturating_sub(self.sequence_window);
        previous[start..].join("-")
    }
}
