//! Build configuration flags shared by all subcommands

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use kzone_analysis::config::BuildConfig;
use kzone_core::StrikeZone;

use crate::util;

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ConfigArg {
    /// Path to a build configuration JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Strike zone edges in feet as LEFT,RIGHT,BOTTOM,TOP
    #[arg(long, value_name = "L,R,B,T", value_parser = parse_strike_zone, allow_hyphen_values = true)]
    pub strike_zone: Option<StrikeZone>,

    /// Number of preceding pitch types kept in full context keys
    #[arg(long)]
    pub sequence_window: Option<usize>,

    /// Lower bound for pitch-type frequencies in effectiveness scores
    #[arg(long)]
    pub frequency_floor: Option<f64>,

    /// Discard at-bats whose last pitch is not a strikeout
    #[arg(long)]
    pub strikeouts_only: bool,
}

impl ConfigArg {
    /// Reads the configuration file if given, then applies flag overrides.
    pub fn load(&self) -> anyhow::Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<BuildConfig, _>("build configuration", path)?,
            None => BuildConfig::default(),
        };
        if let Some(strike_zone) = self.strike_zone {
            config.strike_zone = strike_zone;
        }
        if let Some(sequence_window) = self.sequence_window {
            config.sequence_window = sequence_window;
        }
        if let Some(frequency_floor) = self.frequency_floor {
            config.frequency_floor = frequency_floor;
        }
        config.strikeouts_only |= self.strikeouts_only;
        config
            .validate()
            .context("Invalid build configuration")?;
        Ok(config)
    }
}

fn parse_strike_zone(s: &str) -> Result<StrikeZone, String> {
    let edges = s
        .split(',')
        .map(|edge| {
            edge.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid edge {edge:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let [left, right, bottom, top] = edges[..] else {
        return Err(format!("expected 4 comma-separated edges, got {}", edges.len()));
    };
    StrikeZone::new(left, right, bottom, top).map_err(|e| e.to_string())
}
