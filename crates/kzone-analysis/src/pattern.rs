//! Multi-granularity pattern tables
//!
//! A single pass over the at-bats fills four [`PatternTable`]s, one per
//! [`Granularity`](crate::context::Granularity), plus the per-pitch-type tally of first-pitch zones that
//! the effectiveness scorer works from. Each pitch adds exactly one count to
//! the full-context, count and matchup tables; first pitches also add one
//! count to the first-pitch table and the zone tally.
//!
//! # Examples
//!
//! ```no_run
//! use kzone_analysis::{
//!     context::ContextKeyBuilder, pattern::PatternAggregator, sequence::AtBat,
//! };
//!
//! let at_bats: Vec<AtBat> = vec![]; // from sequence::sequence_at_bats
//! let mut aggregator = PatternAggregator::new(ContextKeyBuilder::default());
//! for at_bat in &at_bats {
//!     aggregator.add_at_bat(at_bat);
//! }
//! let tables = aggregator.finish();
//! if let Some(outcomes) = tables.first_pitch.get("R-R|0-0") {
//!     println!("{:?}", outcomes.most_common());
//! }
//! ```

use std::collections::{BTreeMap, btree_map};

use kzone_core::{PitchRecord, Zone};
use kzone_stats::tally::Tally;
use serde::{Deserialize, Serialize};

use crate::{
    context::{ContextKeyBuilder, ContextKeys, Situation},
    sequence::AtBat,
};

/// Context key → (`{pitch_type}-{zone}` token → count).
///
/// Serialized as a plain nested map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternTable {
    entries: BTreeMap<String, Tally<String>>,
}

impl PatternTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, outcome: &str) {
        if let Some(outcomes) = self.entries.get_mut(key) {
            outcomes.add(outcome.to_owned());
        } else {
            let mut outcomes = Tally::new();
            outcomes.add(outcome.to_owned());
            self.entries.insert(key.to_owned(), outcomes);
        }
    }

    /// Outcome counts observed under `key`, `None` if the key was never seen.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tally<String>> {
        self.entries.get(key)
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Tally<String>> {
        self.entries.iter()
    }

    /// Sum of all counts across all keys
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.values().map(Tally::total).sum()
    }
}

impl<'a> IntoIterator for &'a PatternTable {
    type Item = (&'a String, &'a Tally<String>);
    type IntoIter = btree_map::Iter<'a, String, Tally<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Everything one aggregation pass produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternTables {
    pub full_context: PatternTable,
    pub first_pitch: PatternTable,
    pub count: PatternTable,
    pub matchup: PatternTable,
    /// Pitch type → zones it was thrown into on first pitches
    pub first_pitch_zones: BTreeMap<String, Tally<Zone>>,
    pub at_bat_count: u64,
    pub pitch_count: u64,
}

#[derive(Debug, Clone)]
pub struct PatternAggregator {
    key_builder: ContextKeyBuilder,
    tables: PatternTables,
}

impl PatternAggregator {
    #[must_use]
    pub fn new(key_builder: ContextKeyBuilder) -> Self {
        Self {
            key_builder,
            tables: PatternTables::default(),
        }
    }

    /// Adds every pitch of `at_bat`, in pitch order.
    pub fn add_at_bat(&mut self, at_bat: &AtBat) {
        for (index, pitch) in at_bat.pitches().iter().enumerate() {
            let situation = Situation::from_at_bat(at_bat, index);
            let keys = self.key_builder.keys(&situation);
            self.add_pitch(pitch, &keys);
        }
        self.tables.at_bat_count += 1;
    }

    fn add_pitch(&mut self, pitch: &PitchRecord, keys: &ContextKeys) {
        let outcome = pitch.outcome_token();
        let tables = &mut self.tables;

        tables.full_context.record(&keys.full, &outcome);
        if let Some(first_pitch_key) = &keys.first_pitch {
            tables.first_pitch.record(first_pitch_key, &outcome);
            tables
                .first_pitch_zones
                .entry(pitch.pitch_type.clone())
                .or_default()
                .add(pitch.zone);
        }
        tables.count.record(&keys.count, &outcome);
        tables.matchup.record(&keys.matchup, &outcome);
        tables.pitch_count += 1;
    }

    #[must_use]
    pub fn finish(self) -> PatternTables {
        self.tables
    }
}
