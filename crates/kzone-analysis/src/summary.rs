//! Corpus summary reported after a build

use chrono::NaiveDate;
use kzone_stats::tally::Tally;

use crate::sequence::AtBat;

/// What went into a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusSummary {
    pub at_bats: u64,
    pub pitches: u64,
    /// Earliest game date; games whose identifier is not a date are ignored
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Pitches classified into zones 1-9
    pub strike_zone_pitches: u64,
    /// Pitches classified into zones 10-25
    pub ball_zone_pitches: u64,
    pub pitch_types: Tally<String>,
    /// `{stance}-{throws}` → pitches
    pub matchups: Tally<String>,
}

impl CorpusSummary {
    #[must_use]
    pub fn from_at_bats(at_bats: &[AtBat]) -> Self {
        let mut summary = Self::default();
        for at_bat in at_bats {
            summary.at_bats += 1;
            if let Ok(date) = at_bat.key().game.parse::<NaiveDate>() {
                summary.first_date = Some(summary.first_date.map_or(date, |d| d.min(date)));
                summary.last_date = Some(summary.last_date.map_or(date, |d| d.max(date)));
            }
            for pitch in at_bat.pitches() {
                summary.pitches += 1;
                if pitch.zone.is_strike() {
                    summary.strike_zone_pitches += 1;
                } else {
                    summary.ball_zone_pitches += 1;
                }
                summary.pitch_types.add(pitch.pitch_type.clone());
                summary.matchups.add(pitch.matchup.to_string());
            }
        }
        summary
    }

    /// Average number of pitches per at-bat
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_at_bat_length(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            self.pitches as f64 / self.at_bats as f64
        }
    }

    /// Share of pitches thrown into the strike zone
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn strike_zone_rate(&self) -> f64 {
        if self.pitches == 0 {
            0.0
        } else {
            self.strike_zone_pitches as f64 / self.pitches as f64
        }
    }
}
