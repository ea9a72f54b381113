//! Model build command
//!
//! Reads a pitch corpus, builds the lookup model and writes it as JSON. A
//! short report of what went into the model is printed to stderr so it never
//! mixes with a model written to stdout.

use std::{fmt, path::PathBuf};

use anyhow::Context as _;
use clap::Args;
use kzone_analysis::{
    build::{ModelBuild, build_model},
    corpus::read_corpus,
    model::ModelDocument,
};
use tracing::info;

use super::config::ConfigArg;
use crate::util::Output;

const HISTOGRAM_WIDTH: u64 = 40;

#[derive(Debug, Clone, Args)]
pub(crate) struct BuildArg {
    /// Path to the pitch corpus CSV file
    corpus: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &BuildArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;

    info!("Reading corpus {}", arg.corpus.display());
    let corpus = read_corpus(&arg.corpus).context("Failed to load pitch corpus")?;
    info!("Read {} rows", corpus.rows.len());

    let build = build_model(&corpus, &config).context("Failed to build model")?;
    print_report(&build);

    Output::save_json(&build.document, arg.output.clone())?;
    if let Some(path) = &arg.output {
        info!("Model saved to {}", path.display());
    }
    Ok(())
}

fn print_report(build: &ModelBuild) {
    let stats = &build.normalize_stats;
    let summary = &build.summary;

    eprintln!("Corpus");
    eprintln!("------");
    eprintln!("  {:<28} {:>10}", "Rows read", stats.total_rows);
    eprintln!("  {:<28} {:>10}", "Incomplete", stats.incomplete);
    eprintln!("  {:<28} {:>10}", "Unclassifiable location", stats.unclassifiable);
    eprintln!("  {:<28} {:>9.1}%", "Drop rate", stats.drop_rate() * 100.0);
    if build.non_strikeout_at_bats > 0 {
        eprintln!(
            "  {:<28} {:>10}",
            "Non-strikeout at-bats", build.non_strikeout_at_bats
        );
    }
    eprintln!("  {:<28} {:>10}", "At-bats", summary.at_bats);
    eprintln!("  {:<28} {:>10}", "Pitches", summary.pitches);
    eprintln!(
        "  {:<28} {:>10.2}",
        "Pitches per at-bat",
        summary.mean_at_bat_length()
    );
    eprintln!(
        "  {:<28} {:>9.1}%",
        "In strike zone",
        summary.strike_zone_rate() * 100.0
    );
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        eprintln!("  {:<28} {first} .. {last}", "Games");
    }
    eprintln!();

    eprintln!("Pitch types");
    eprintln!("-----------");
    print_histogram(summary.pitch_types.most_common().into_iter());
    eprintln!();

    eprintln!("Matchups");
    eprintln!("--------");
    print_histogram(summary.matchups.iter().map(|(matchup, &count)| (matchup, count)));
    eprintln!();

    print_table_sizes(&build.document);
}

fn print_table_sizes(document: &ModelDocument) {
    eprintln!("Pattern tables");
    eprintln!("--------------");
    eprintln!("  {:<28} {:>10} {:>10}", "Table", "Keys", "Pitches");
    let tables = [
        ("patterns", &document.patterns),
        ("first_pitch_patterns", &document.first_pitch_patterns),
        ("count_patterns", &document.count_patterns),
        ("matchup_patterns", &document.matchup_patterns),
    ];
    for (name, table) in tables {
        eprintln!("  {:<28} {:>10} {:>10}", name, table.len(), table.total());
    }
    eprintln!(
        "  {:<28} {:>10}",
        "optimal_zones",
        document.optimal_zones.len()
    );
}

fn print_histogram<I, S>(data: I)
where
    I: Iterator<Item = (S, u64)>,
    S: fmt::Display,
{
    let data = data.collect::<Vec<_>>();
    let max_count = data.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    for (label, count) in &data {
        let bar_width = usize::try_from(count * HISTOGRAM_WIDTH / max_count).unwrap_or(0);
        eprintln!("  {:>8} | {:<8} {}", label, count, "#".repeat(bar_width));
    }
}
