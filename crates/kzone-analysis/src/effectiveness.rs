//! Usage-normalized effectiveness scores
//!
//! Raw first-pitch zone counts are dominated by common pitch types. To remove
//! that bias, each pitch type's zone distribution on first pitches is divided
//! by how often the type is thrown overall:
//!
//! ```text
//! effectiveness(type, zone) = (first_pitch_count(type, zone) / first_pitch_count(type))
//!                             / max(global_frequency(type), floor)
//! ```
//!
//! A score above 1 means the type goes to that zone more often than its
//! overall usage would predict. This is a relative-usage signal computed from
//! strikeout at-bats only, not a measured success rate.

use std::collections::{BTreeMap, btree_map};

use kzone_core::{PitchRecord, Zone};
use kzone_stats::tally::Tally;
use serde::{Deserialize, Serialize};

/// Pitch type → fraction of all pitches in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchTypeFrequency {
    shares: BTreeMap<String, f64>,
}

impl PitchTypeFrequency {
    #[must_use]
    pub fn from_tally(pitch_types: &Tally<String>) -> Self {
        Self {
            shares: pitch_types
                .shares()
                .map(|(pitch_type, share)| (pitch_type.clone(), share))
                .collect(),
        }
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PitchRecord>,
    {
        let tally = records
            .into_iter()
            .map(|record| record.pitch_type.clone())
            .collect::<Tally<_>>();
        Self::from_tally(&tally)
    }

    #[must_use]
    pub fn get(&self, pitch_type: &str) -> Option<f64> {
        self.shares.get(pitch_type).copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, f64> {
        self.shares.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Pitch type → (zone → effectiveness score).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivenessTable {
    scores: BTreeMap<String, BTreeMap<Zone, f64>>,
}

impl EffectivenessTable {
    /// Scores every (pitch type, zone) pair seen on a first pitch.
    ///
    /// A pitch type missing from `frequency` is treated as having frequency
    /// `floor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use kzone_analysis::effectiveness::{EffectivenessTable, PitchTypeFrequency};
    /// use kzone_core::Zone;
    /// use kzone_stats::tally::Tally;
    ///
    /// let zone1 = Zone::new(1).unwrap();
    /// let zone5 = Zone::new(5).unwrap();
    /// let tally = [zone5, zone1, zone1].into_iter().collect::<Tally<_>>();
    /// let first_pitch_zones = BTreeMap::from([("FF".to_owned(), tally)]);
    /// let frequency = PitchTypeFrequency::from_tally(&["FF".to_owned()].into_iter().collect());
    ///
    /// let table = EffectivenessTable::compute(&first_pitch_zones, &frequency, 0.01);
    /// let score = table.get("FF", zone1).unwrap();
    /// assert!((score - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute(
        first_pitch_zones: &BTreeMap<String, Tally<Zone>>,
        frequency: &PitchTypeFrequency,
        floor: f64,
    ) -> Self {
        let mut scores = BTreeMap::new();
        for (pitch_type, zones) in first_pitch_zones {
            let total = zones.total();
            if total == 0 {
                continue;
            }
            let base = frequency.get(pitch_type).unwrap_or(floor).max(floor);
            let by_zone = zones
                .iter()
                .map(|(&zone, &count)| (zone, (count as f64 / total as f64) / base))
                .collect::<BTreeMap<_, _>>();
            scores.insert(pitch_type.clone(), by_zone);
        }
        Self { scores }
    }

    #[must_use]
    pub fn get(&self, pitch_type: &str, zone: Zone) -> Option<f64> {
        self.scores.get(pitch_type)?.get(&zone).copied()
    }

    #[must_use]
    pub fn zones(&self, pitch_type: &str) -> Option<&BTreeMap<Zone, f64>> {
        self.scores.get(pitch_type)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeMap<Zone, f64>> {
        self.scores.iter()
    }

    /// Number of scored pitch types
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
