//! The model build pass
//!
//! [`build_model`] runs the whole pipeline over a loaded corpus:
//!
//! 1. normalize rows and classify zones ([`crate::normalize`])
//! 2. group pitches into at-bats, optionally keeping strikeouts only
//!    ([`crate::sequence`])
//! 3. fill the pattern tables ([`crate::pattern`])
//! 4. score first-pitch zones against pitch-type usage
//!    ([`crate::effectiveness`])
//! 5. fit the categorical encoders and assemble the [`ModelDocument`]

use kzone_core::PitchRecord;
use tracing::{info, warn};

use crate::{
    config::{BuildConfig, ConfigError},
    context::ContextKeyBuilder,
    corpus::Corpus,
    effectiveness::{EffectivenessTable, PitchTypeFrequency},
    model::{Encoders, ModelDocument},
    normalize::{NormalizeStats, normalize_rows},
    pattern::PatternAggregator,
    sequence::{retain_strikeouts, sequence_at_bats},
    summary::CorpusSummary,
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BuildError {
    #[display("invalid build configuration: {_0}")]
    Config(ConfigError),
    #[display(
        "no usable pitch records in corpus ({} rows read, {} incomplete, {} with unclassifiable location)",
        stats.total_rows,
        stats.incomplete,
        stats.unclassifiable
    )]
    EmptyCorpus { stats: NormalizeStats },
}

/// Output of a successful build.
#[derive(Debug, Clone)]
pub struct ModelBuild {
    pub document: ModelDocument,
    pub normalize_stats: NormalizeStats,
    /// At-bats discarded for not ending in a strikeout
    pub non_strikeout_at_bats: usize,
    pub summary: CorpusSummary,
}

/// Builds the lookup model from `corpus`.
///
/// Rows the CSV reader could not decode count as incomplete records. Fails
/// with [`BuildError::EmptyCorpus`] if no pitch survives normalization and
/// the optional strikeout filter.
pub fn build_model(corpus: &Corpus, config: &BuildConfig) -> Result<ModelBuild, BuildError> {
    config.validate().map_err(BuildError::Config)?;

    let (records, mut stats) = normalize_rows(&corpus.rows, &config.strike_zone);
    stats.total_rows += corpus.unreadable_rows;
    stats.incomplete += corpus.unreadable_rows;
    report_drops(&stats);
    if records.is_empty() {
        return Err(BuildError::EmptyCorpus { stats });
    }

    let mut at_bats = sequence_at_bats(records);
    let non_strikeout_at_bats = if config.strikeouts_only {
        let removed = retain_strikeouts(&mut at_bats);
        if removed > 0 {
            info!("Discarded {removed} at-bats not ending in a strikeout");
        }
        removed
    } else {
        0
    };
    if at_bats.is_empty() {
        return Err(BuildError::EmptyCorpus { stats });
    }
    info!("Sequenced {} at-bats", at_bats.len());

    let mut aggregator = PatternAggregator::new(ContextKeyBuilder::new(config.sequence_window));
    for at_bat in &at_bats {
        aggregator.add_at_bat(at_bat);
    }
    let tables = aggregator.finish();
    info!(
        "Aggregated {} pitches into {} full context, {} first pitch, {} count and {} matchup keys",
        tables.pitch_count,
        tables.full_context.len(),
        tables.first_pitch.len(),
        tables.count.len(),
        tables.matchup.len(),
    );

    let pitches = at_bats
        .iter()
        .flat_map(|at_bat| at_bat.pitches())
        .collect::<Vec<&PitchRecord>>();
    let frequency = PitchTypeFrequency::from_records(pitches.iter().copied());
    let optimal_zones =
        EffectivenessTable::compute(&tables.first_pitch_zones, &frequency, config.frequency_floor);
    info!("Scored first-pitch zones of {} pitch types", optimal_zones.len());

    let encoders = Encoders::from_records(&pitches, frequency);
    let summary = CorpusSummary::from_at_bats(&at_bats);
    let document = ModelDocument::new(tables, encoders, optimal_zones);

    Ok(ModelBuild {
        document,
        normalize_stats: stats,
        non_strikeout_at_bats,
        summary,
    })
}

fn report_drops(stats: &NormalizeStats) {
    if stats.dropped() == 0 {
        info!("Normalized {} rows, none dropped", stats.total_rows);
        return;
    }
    warn!(
        "Dropped {} of {} rows ({:.1}%): {} incomplete, {} with unclassifiable location",
        stats.dropped(),
        stats.total_rows,
        stats.drop_rate() * 100.0,
        stats.incomplete,
        stats.unclassifiable,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawPitchRow;

    fn row(at_bat_number: u32, pitch_number: u32, pitch_type: &str, event: Option<&str>) -> RawPitchRow {
        RawPitchRow {
            game_date: Some("2024-04-01".to_owned()),
            pitcher: Some("1".to_owned()),
            batter: Some("2".to_owned()),
            at_bat_number: Some(at_bat_number.to_string()),
            pitch_number: Some(pitch_number.to_string()),
            pitch_type: Some(pitch_type.to_owned()),
            plate_x: Some(0.0),
            plate_z: Some(2.5),
            stand: Some("R".to_owned()),
            p_throws: Some("R".to_owned()),
            balls: Some("0".to_owned()),
            strikes: Some((pitch_number - 1).to_string()),
            outcome_type: Some("S".to_owned()),
            description: Some("called_strike".to_owned()),
            events: event.map(str::to_owned),
        }
    }

    #[test]
    fn test_unreadable_rows_count_as_incomplete() {
        let corpus = Corpus {
            rows: vec![row(1, 1, "FF", None)],
            unreadable_rows: 2,
        };
        let build = build_model(&corpus, &BuildConfig::default()).unwrap();
        assert_eq!(build.normalize_stats.total_rows, 3);
        assert_eq!(build.normalize_stats.incomplete, 2);
        assert_eq!(build.normalize_stats.kept, 1);
    }

    #[test]
    fn test_empty_corpus() {
        let mut incomplete = row(1, 1, "FF", None);
        incomplete.description = None;
        let corpus = Corpus {
            rows: vec![incomplete],
            unreadable_rows: 0,
        };
        let err = build_model(&corpus, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCorpus { stats } if stats.incomplete == 1));

        let err = build_model(&Corpus::default(), &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCorpus { .. }));
    }

    #[test]
    fn test_strikeouts_only() {
        let corpus = Corpus {
            rows: vec![
                row(1, 1, "FF", None),
                row(1, 2, "FF", None),
                row(1, 3, "SL", Some("strikeout")),
                row(2, 1, "CH", Some("field_out")),
            ],
            unreadable_rows: 0,
        };

        let build = build_model(&corpus, &BuildConfig::default()).unwrap();
        assert_eq!(build.non_strikeout_at_bats, 0);
        assert_eq!(build.summary.at_bats, 2);

        let config = BuildConfig {
            strikeouts_only: true,
            ..BuildConfig::default()
        };
        let build = build_model(&corpus, &config).unwrap();
        assert_eq!(build.non_strikeout_at_bats, 1);
        assert_eq!(build.summary.at_bats, 1);
        assert_eq!(build.document.encoders.pitch_types, ["FF", "SL"]);

        let only_walks = Corpus {
            rows: vec![row(2, 1, "CH", Some("walk"))],
            unreadable_rows: 0,
        };
        let err = build_model(&only_walks, &config).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCorpus { .. }));
    }

    #[test]
    fn test_invalid_config() {
        let config = BuildConfig {
            sequence_window: 0,
            ..BuildConfig::default()
        };
        let err = build_model(&Corpus::default(), &config).unwrap_err();
        assert_eq!(err, BuildError::Config(ConfigError::ZeroSequenceWindow));
    }
}
