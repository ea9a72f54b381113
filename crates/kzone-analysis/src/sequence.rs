//! Grouping pitch records into at-bats

use std::collections::BTreeMap;

use kzone_core::{AtBatKey, PitchRecord};

/// The pitches of one at-bat, ordered by pitch number.
///
/// Never empty. Pitch numbers may have gaps left by filtering; duplicate pitch
/// numbers keep their input order.
#[derive(Debug, Clone, PartialEq)]
pub struct AtBat {
    key: AtBatKey,
    pitches: Vec<PitchRecord>,
}

impl AtBat {
    /// Builds an at-bat from pitches sharing `key`, sorting them by pitch
    /// number.
    ///
    /// Returns `None` if `pitches` is empty.
    #[must_use]
    pub fn new(key: AtBatKey, mut pitches: Vec<PitchRecord>) -> Option<Self> {
        if pitches.is_empty() {
            return None;
        }
        debug_assert!(pitches.iter().all(|p| p.at_bat == key));
        pitches.sort_by_key(|p| p.pitch_number);
        Some(Self { key, pitches })
    }

    #[must_use]
    pub fn key(&self) -> &AtBatKey {
        &self.key
    }

    #[must_use]
    pub fn pitches(&self) -> &[PitchRecord] {
        &self.pitches
    }

    #[must_use]
    pub fn pitch_count(&self) -> usize {
        self.pitches.len()
    }

    #[must_use]
    pub fn last_pitch(&self) -> &PitchRecord {
        &self.pitches[self.pitches.len() - 1]
    }

    /// Whether the at-bat ended with a strikeout event on its last pitch.
    #[must_use]
    pub fn ends_in_strikeout(&self) -> bool {
        self.last_pitch().is_strikeout()
    }
}

/// Groups records by (game, pitcher, batter, at-bat number).
///
/// At-bats are returned in ascending key order, so the result does not depend
/// on the order of `records` except for pitches sharing a pitch number.
#[must_use]
pub fn sequence_at_bats(records: Vec<PitchRecord>) -> Vec<AtBat> {
    let mut groups = BTreeMap::<AtBatKey, Vec<PitchRecord>>::new();
    for record in records {
        groups.entry(record.at_bat.clone()).or_default().push(record);
    }
    groups
        .into_iter()
        .filter_map(|(key, pitches)| AtBat::new(key, pitches))
        .collect()
}

/// Keeps only at-bats that end in a strikeout, returning how many were
/// removed.
pub fn retain_strikeouts(at_bats: &mut Vec<AtBat>) -> usize {
    let before = at_bats.len();
    at_bats.retain(AtBat::ends_in_strikeout);
    before - at_bats.len()
}

#[cfg(test)]
mod tests {
    use kzone_core::{Count, Hand, Matchup, Zone};

    use super::*;

    fn pitch(at_bat_number: u32, pitch_number: u32, pitch_type: &str) -> PitchRecord {
        PitchRecord {
            at_bat: AtBatKey {
                game: "2024-04-01".to_owned(),
                pitcher: 1,
                batter: 2,
                at_bat_number,
            },
            pitch_number,
            pitch_type: pitch_type.to_owned(),
            plate_x: 0.0,
            plate_z: 2.5,
            matchup: Matchup {
                stance: Hand::Right,
                throws: Hand::Right,
            },
            count: Count {
                balls: 0,
                strikes: 0,
            },
            outcome_type: "S".to_owned(),
            description: "called_strike".to_owned(),
            event: None,
            zone: Zone::new(5).unwrap(),
        }
    }

    fn pitch_types(at_bat: &AtBat) -> Vec<&str> {
        at_bat
            .pitches()
            .iter()
            .map(|p| p.pitch_type.as_str())
            .collect()
    }

    #[test]
    fn test_groups_and_sorts() {
        let records = vec![
            pitch(2, 2, "SL"),
            pitch(1, 3, "CH"),
            pitch(1, 1, "FF"),
            pitch(2, 1, "FF"),
            pitch(1, 2, "SL"),
        ];
        let at_bats = sequence_at_bats(records);
        assert_eq!(at_bats.len(), 2);
        assert_eq!(at_bats[0].key().at_bat_number, 1);
        assert_eq!(pitch_types(&at_bats[0]), ["FF", "SL", "CH"]);
        assert_eq!(pitch_types(&at_bats[1]), ["FF", "SL"]);
    }

    #[test]
    fn test_batter_is_part_of_key() {
        let mut other_batter = pitch(1, 1, "SL");
        other_batter.at_bat.batter = 3;
        let at_bats = sequence_at_bats(vec![pitch(1, 1, "FF"), other_batter]);
        assert_eq!(at_bats.len(), 2);
        assert!(at_bats.iter().all(|ab| ab.pitch_count() == 1));
    }

    #[test]
    fn test_gaps_and_duplicates_pass_through() {
        let records = vec![
            pitch(1, 5, "CU"),
            pitch(1, 2, "SL"),
            pitch(1, 2, "CH"),
            pitch(1, 1, "FF"),
        ];
        let at_bats = sequence_at_bats(records);
        assert_eq!(at_bats.len(), 1);
        assert_eq!(pitch_types(&at_bats[0]), ["FF", "SL", "CH", "CU"]);
    }

    #[test]
    fn test_empty() {
        assert!(sequence_at_bats(vec![]).is_empty());
        let key = pitch(1, 1, "FF").at_bat;
        assert!(AtBat::new(key, vec![]).is_none());
    }

    #[test]
    fn test_retain_strikeouts() {
        let mut last = pitch(1, 2, "SL");
        last.event = Some("strikeout_swinging".to_owned());
        let mut walk = pitch(2, 4, "FF");
        walk.event = Some("walk".to_owned());
        let mut at_bats = sequence_at_bats(vec![pitch(1, 1, "FF"), last, walk, pitch(3, 1, "CH")]);

        assert_eq!(retain_strikeouts(&mut at_bats), 2);
        assert_eq!(at_bats.len(), 1);
        assert_eq!(at_bats[0].key().at_bat_number, 1);
    }
}
