//! Turning raw corpus rows into classified pitch records
//!
//! A row is kept only if every field the model needs is present and its
//! plate location classifies into a zone. Dropped rows are not reported one by
//! one; they are tallied by [`DropReason`] in [`NormalizeStats`].

use kzone_core::{AtBatKey, Count, Hand, Matchup, PitchRecord, StrikeZone};
use serde::Serialize;
use tracing::debug;

use crate::corpus::RawPitchRow;

/// Why a row was left out of the normalized corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DropReason {
    /// A required field is missing or unusable
    #[display("incomplete record")]
    IncompleteRecord,
    /// The plate location could not be classified into a zone
    #[display("unclassifiable location")]
    UnclassifiableLocation,
}

/// Row counts of one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub total_rows: u64,
    pub kept: u64,
    pub incomplete: u64,
    pub unclassifiable: u64,
}

impl NormalizeStats {
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.incomplete + self.unclassifiable
    }

    /// Fraction of rows dropped, `0.0` for an empty input.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn drop_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.dropped() as f64 / self.total_rows as f64
        }
    }

    fn record(&mut self, result: Result<(), DropReason>) {
        self.total_rows += 1;
        match result {
            Ok(()) => self.kept += 1,
            Err(DropReason::IncompleteRecord) => self.incomplete += 1,
            Err(DropReason::UnclassifiableLocation) => self.unclassifiable += 1,
        }
    }
}

/// Normalizes all rows, returning the kept records in input order.
pub fn normalize_rows<'a, I>(rows: I, strike_zone: &StrikeZone) -> (Vec<PitchRecord>, NormalizeStats)
where
    I: IntoIterator<Item = &'a RawPitchRow>,
{
    let mut records = vec![];
    let mut stats = NormalizeStats::default();
    for (index, row) in rows.into_iter().enumerate() {
        match normalize_row(row, strike_zone) {
            Ok(record) => {
                records.push(record);
                stats.record(Ok(()));
            }
            Err(reason) => {
                debug!("dropping row {index}: {reason}");
                stats.record(Err(reason));
            }
        }
    }
    (records, stats)
}

/// Validates one row, coerces its fields and classifies its zone.
///
/// Required: game, pitcher, batter, at-bat number, pitch number, pitch type,
/// stance, pitcher hand, ball and strike counts, outcome type and
/// description. A pitch number that is present but not numeric becomes 1.
pub fn normalize_row(row: &RawPitchRow, strike_zone: &StrikeZone) -> Result<PitchRecord, DropReason> {
    let incomplete = || DropReason::IncompleteRecord;

    let at_bat = AtBatKey {
        game: required(row.game_date.as_ref()).ok_or_else(incomplete)?.to_owned(),
        pitcher: parse_integer(row.pitcher.as_ref()).ok_or_else(incomplete)?,
        batter: parse_integer(row.batter.as_ref()).ok_or_else(incomplete)?,
        at_bat_number: parse_integer(row.at_bat_number.as_ref()).ok_or_else(incomplete)?,
    };
    let pitch_number = required(row.pitch_number.as_ref())
        .map(coerce_pitch_number)
        .ok_or_else(incomplete)?;
    let pitch_type = required(row.pitch_type.as_ref()).ok_or_else(incomplete)?;
    let description = required(row.description.as_ref()).ok_or_else(incomplete)?;
    let outcome_type = required(row.outcome_type.as_ref()).ok_or_else(incomplete)?;
    let matchup = Matchup {
        stance: parse_hand(row.stand.as_ref()).ok_or_else(incomplete)?,
        throws: parse_hand(row.p_throws.as_ref()).ok_or_else(incomplete)?,
    };
    let count = Count {
        balls: parse_integer(row.balls.as_ref()).ok_or_else(incomplete)?,
        strikes: parse_integer(row.strikes.as_ref()).ok_or_else(incomplete)?,
    };

    let zone = strike_zone.classify(row.plate_x, row.plate_z);
    let (Some(plate_x), Some(plate_z), Some(zone)) = (row.plate_x, row.plate_z, zone) else {
        return Err(DropReason::UnclassifiableLocation);
    };

    Ok(PitchRecord {
        at_bat,
        pitch_number,
        pitch_type: pitch_type.to_owned(),
        plate_x,
        plate_z,
        matchup,
        count,
        outcome_type: outcome_type.to_owned(),
        description: description.to_owned(),
        event: required(row.events.as_ref()).map(str::to_owned),
        zone,
    })
}

fn required(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_hand(value: Option<&String>) -> Option<Hand> {
    required(value)?.parse().ok()
}

/// Parses a non-negative integer column. Integral floats like `"2.0"` are
/// accepted; fractional, negative or out-of-range values are not.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_integer<T>(value: Option<&String>) -> Option<T>
where
    T: TryFrom<u32>,
{
    let value = required(value)?;
    let n = match value.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            let n = value.parse::<f64>().ok()?;
            if !(n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX)) {
                return None;
            }
            n as u32
        }
    };
    T::try_from(n).ok()
}

/// Integer pitch numbers parse as-is, numeric text like `"3.0"` is
/// truncated, anything else becomes 1.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_pitch_number(value: &str) -> u32 {
    if let Ok(n) = value.parse::<u32>() {
        return n;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX) => n as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawPitchRow {
        RawPitchRow {
            game_date: Some("2024-04-01".to_owned()),
            pitcher: Some("100".to_owned()),
            batter: Some("200".to_owned()),
            at_bat_number: Some("7".to_owned()),
            pitch_number: Some("2".to_owned()),
            pitch_type: Some("SL".to_owned()),
            plate_x: Some(0.0),
            plate_z: Some(2.5),
            stand: Some("L".to_owned()),
            p_throws: Some("R".to_owned()),
            balls: Some("1".to_owned()),
            strikes: Some("2".to_owned()),
            outcome_type: Some("S".to_owned()),
            description: Some("swinging_strike".to_owned()),
            events: Some("strikeout".to_owned()),
        }
    }

    #[test]
    fn test_complete_row() {
        let record = normalize_row(&row(), &StrikeZone::default()).unwrap();
        assert_eq!(record.pitch_number, 2);
        assert_eq!(record.zone.get(), 5);
        assert_eq!(record.matchup.to_string(), "L-R");
        assert_eq!(record.count.to_string(), "1-2");
        assert_eq!(record.at_bat.at_bat_number, 7);
        assert!(record.is_strikeout());
    }

    #[test]
    fn test_missing_required_fields() {
        let strike_zone = StrikeZone::default();
        let cases: [fn(&mut RawPitchRow); 12] = [
            |r| r.pitch_type = None,
            |r| r.description = Some("  ".to_owned()),
            |r| r.stand = None,
            |r| r.p_throws = Some("S".to_owned()),
            |r| r.outcome_type = None,
            |r| r.balls = None,
            |r| r.strikes = None,
            |r| r.pitch_number = None,
            |r| r.game_date = None,
            |r| r.pitcher = None,
            |r| r.batter = None,
            |r| r.at_bat_number = None,
        ];
        for mutate in cases {
            let mut raw = row();
            mutate(&mut raw);
            assert_eq!(
                normalize_row(&raw, &strike_zone),
                Err(DropReason::IncompleteRecord),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_missing_location() {
        let strike_zone = StrikeZone::default();
        let mut raw = row();
        raw.plate_z = None;
        assert_eq!(
            normalize_row(&raw, &strike_zone),
            Err(DropReason::UnclassifiableLocation)
        );
        let mut raw = row();
        raw.plate_x = Some(f64::NAN);
        assert_eq!(
            normalize_row(&raw, &strike_zone),
            Err(DropReason::UnclassifiableLocation)
        );
    }

    #[test]
    fn test_float_formatted_integer_columns() {
        let mut raw = row();
        raw.pitcher = Some("100.0".to_owned());
        raw.at_bat_number = Some("7.0".to_owned());
        raw.balls = Some("1.0".to_owned());
        raw.strikes = Some(" 2.0".to_owned());
        let record = normalize_row(&raw, &StrikeZone::default()).unwrap();
        assert_eq!(record.at_bat.pitcher, 100);
        assert_eq!(record.at_bat.at_bat_number, 7);
        assert_eq!(record.count.to_string(), "1-2");
        assert_eq!(record, normalize_row(&row(), &StrikeZone::default()).unwrap());

        let strike_zone = StrikeZone::default();
        let cases: [fn(&mut RawPitchRow); 5] = [
            |r| r.balls = Some("1.5".to_owned()),
            |r| r.strikes = Some("-1".to_owned()),
            |r| r.strikes = Some("300".to_owned()),
            |r| r.batter = Some("abc".to_owned()),
            |r| r.pitcher = Some("inf".to_owned()),
        ];
        for mutate in cases {
            let mut raw = row();
            mutate(&mut raw);
            assert_eq!(
                normalize_row(&raw, &strike_zone),
                Err(DropReason::IncompleteRecord),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_pitch_number_coercion() {
        assert_eq!(coerce_pitch_number("4"), 4);
        assert_eq!(coerce_pitch_number("3.0"), 3);
        assert_eq!(coerce_pitch_number("abc"), 1);
        assert_eq!(coerce_pitch_number("-2"), 1);
        assert_eq!(coerce_pitch_number("NaN"), 1);

        let mut raw = row();
        raw.pitch_number = Some("n/a".to_owned());
        let record = normalize_row(&raw, &StrikeZone::default()).unwrap();
        assert_eq!(record.pitch_number, 1);
    }

    #[test]
    fn test_stats() {
        let mut incomplete = row();
        incomplete.pitch_type = None;
        let mut unclassifiable = row();
        unclassifiable.plate_x = None;
        let rows = [row(), incomplete, unclassifiable, row()];

        let (records, stats) = normalize_rows(&rows, &StrikeZone::default());
        assert_eq!(records.len(), 2);
        assert_eq!(
            stats,
            NormalizeStats {
                total_rows: 4,
                kept: 2,
                incomplete: 1,
                unclassifiable: 1,
            }
        );
        assert_eq!(stats.dropped(), 2);
        assert!((stats.drop_rate() - 0.5).abs() < f64::EPSILON);
        assert!(NormalizeStats::default().drop_rate().abs() < f64::EPSILON);
    }
}
