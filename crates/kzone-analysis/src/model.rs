//! The serialized lookup model
//!
//! A [`ModelDocument`] is the only artifact a build produces. It serializes to
//! a single JSON object:
//!
//! ```text
//! {
//!   "encoders": {
//!     "pitch_types": [...], "descriptions": [...],
//!     "pitch_encoder": {...}, "desc_encoder": {...},
//!     "pitch_frequencies": {...}
//!   },
//!   "patterns": {...},              // full context
//!   "first_pitch_patterns": {...},
//!   "count_patterns": {...},
//!   "matchup_patterns": {...},
//!   "optimal_zones": {...}          // pitch type -> zone -> score
//! }
//! ```
//!
//! Every map is ordered, so the same corpus always yields byte-identical
//! output. Any top-level entry may be absent when reading a document; it then
//! reads as empty.
//!
//! # Lookup
//!
//! Consumers query the pattern tables from most to least specific and use the
//! first one that knows the situation. [`ModelDocument::lookup`] implements
//! that fallback chain.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use kzone_core::PitchRecord;
use kzone_stats::tally::Tally;
use serde::{Deserialize, Serialize};

use crate::{
    context::{ContextKeys, Granularity},
    effectiveness::{EffectivenessTable, PitchTypeFrequency},
    encoder::CategoryEncoder,
    pattern::{PatternTable, PatternTables},
};

/// Categorical vocabularies of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encoders {
    /// Sorted distinct pitch types
    pub pitch_types: Vec<String>,
    /// Sorted distinct outcome descriptions
    pub descriptions: Vec<String>,
    pub pitch_encoder: BTreeMap<String, u32>,
    pub desc_encoder: BTreeMap<String, u32>,
    pub pitch_frequencies: PitchTypeFrequency,
}

impl Encoders {
    #[must_use]
    pub fn from_records(records: &[&PitchRecord], pitch_frequencies: PitchTypeFrequency) -> Self {
        let pitch = CategoryEncoder::fit(records.iter().map(|r| r.pitch_type.as_str()));
        let desc = CategoryEncoder::fit(records.iter().map(|r| r.description.as_str()));
        Self {
            pitch_types: pitch.classes().to_vec(),
            descriptions: desc.classes().to_vec(),
            pitch_encoder: pitch.codes(),
            desc_encoder: desc.codes(),
            pitch_frequencies,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDocument {
    pub encoders: Encoders,
    /// Full context key → outcome counts
    pub patterns: PatternTable,
    pub first_pitch_patterns: PatternTable,
    pub count_patterns: PatternTable,
    pub matchup_patterns: PatternTable,
    pub optimal_zones: EffectivenessTable,
}

/// The entry a lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch<'a> {
    /// Table the entry was found in
    pub granularity: Granularity,
    pub key: &'a str,
    pub outcomes: &'a Tally<String>,
}

impl PatternMatch<'_> {
    /// The most frequent outcome token, ties broken by token order.
    #[must_use]
    pub fn best(&self) -> Option<(&str, u64)> {
        self.outcomes
            .most_common()
            .first()
            .map(|&(token, count)| (token.as_str(), count))
    }
}

impl ModelDocument {
    #[must_use]
    pub fn new(
        tables: PatternTables,
        encoders: Encoders,
        optimal_zones: EffectivenessTable,
    ) -> Self {
        Self {
            encoders,
            patterns: tables.full_context,
            first_pitch_patterns: tables.first_pitch,
            count_patterns: tables.count,
            matchup_patterns: tables.matchup,
            optimal_zones,
        }
    }

    #[must_use]
    pub fn table(&self, granularity: Granularity) -> &PatternTable {
        match granularity {
            Granularity::FullContext => &self.patterns,
            Granularity::FirstPitch => &self.first_pitch_patterns,
            Granularity::Count => &self.count_patterns,
            Granularity::Matchup => &self.matchup_patterns,
        }
    }

    /// Tables queried for any pitch, most specific first.
    #[must_use]
    pub fn fallback_chain(&self) -> [(Granularity, &PatternTable); 3] {
        [
            (Granularity::FullContext, &self.patterns),
            (Granularity::Count, &self.count_patterns),
            (Granularity::Matchup, &self.matchup_patterns),
        ]
    }

    /// Finds the most specific entry that exists for `keys`.
    ///
    /// The first-pitch table is tried before the fallback chain when `keys`
    /// describe a first pitch. `None` means no recommendation is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use kzone_analysis::{
    ///     context::{ContextKeyBuilder, Granularity, Situation},
    ///     model::ModelDocument,
    /// };
    /// use kzone_core::{Count, Hand, Matchup};
    ///
    /// let mut model = ModelDocument::default();
    /// model.count_patterns.record("0-2", "SL-14");
    ///
    /// let situation = Situation {
    ///     matchup: Matchup { stance: Hand::Left, throws: Hand::Right },
    ///     count: Count { balls: 0, strikes: 2 },
    ///     previous_pitch_types: vec!["FF", "FF"],
    /// };
    /// let keys = ContextKeyBuilder::default().keys(&situation);
    /// let found = model.lookup(&keys).unwrap();
    /// assert_eq!(found.granularity, Granularity::Count);
    /// assert_eq!(found.best(), Some(("SL-14", 1)));
    /// ```
    #[must_use]
    pub fn lookup<'a>(&'a self, keys: &'a ContextKeys) -> Option<PatternMatch<'a>> {
        let first_pitch = keys
            .first_pitch
            .as_deref()
            .map(|key| (Granularity::FirstPitch, &self.first_pitch_patterns, key));
        let chain = self
            .fallback_chain()
            .into_iter()
            .filter_map(|(granularity, table)| Some((granularity, table, keys.get(granularity)?)));

        first_pitch
            .into_iter()
            .chain(chain)
            .find_map(|(granularity, table, key)| {
                let outcomes = table.get(key)?;
                Some(PatternMatch {
                    granularity,
                    key,
                    outcomes,
                })
            })
    }

    /// Whether the model holds no pattern at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.first_pitch_patterns.is_empty()
            && self.count_patterns.is_empty()
            && self.matchup_patterns.is_empty()
    }

    /// Writes the document as pretty-printed JSON.
    pub fn to_writer<W>(&self, writer: W) -> serde_json::Result<()>
    where
        W: Write,
    {
        serde_json::to_writer_pretty(writer, self)
    }

    pub fn from_reader<R>(reader: R) -> serde_json::Result<Self>
    where
        R: Read,
    {
        serde_json::from_reader(reader)
    }
}
