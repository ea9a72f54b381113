//! Building the strikeout pitch-pattern lookup model
//!
//! This crate turns a corpus of pitch-by-pitch records from strikeout at-bats
//! into a [`model::ModelDocument`]: pattern tables keyed by game situation at
//! several granularities, plus usage-normalized first-pitch zone scores.
//!
//! # Overview
//!
//! 1. **Read the corpus** ([`corpus::read_corpus`]): load CSV rows as
//!    [`corpus::RawPitchRow`]s
//! 2. **Normalize** ([`normalize::normalize_rows`]): drop incomplete rows,
//!    coerce fields and classify plate locations into zones
//! 3. **Sequence** ([`sequence::sequence_at_bats`]): group pitches into
//!    ordered at-bats
//! 4. **Aggregate** ([`pattern::PatternAggregator`]): count
//!    `{pitch_type}-{zone}` outcomes under each [`context::ContextKeys`]
//! 5. **Score** ([`effectiveness::EffectivenessTable`]): divide first-pitch
//!    zone shares by pitch-type usage
//! 6. **Assemble** ([`model::ModelDocument`]): encoders, tables and scores in
//!    one serializable document
//!
//! [`build::build_model`] runs steps 2-6 with a [`config::BuildConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use kzone_analysis::{build::build_model, config::BuildConfig, corpus::read_corpus};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let corpus = read_corpus("strikeouts.csv")?;
//! let build = build_model(&corpus, &BuildConfig::default())?;
//! build.document.to_writer(std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod config;
pub mod context;
pub mod corpus;
pub mod effectiveness;
pub mod encoder;
pub mod model;
pub mod normalize;
pub mod pattern;
pub mod sequence;
pub mod summary;
