//! Reading the pitch corpus table
//!
//! The corpus is a CSV file with one row per pitch and a header row using
//! Statcast column names. Only the columns in [`RawPitchRow`] are read; any
//! other analytic columns are ignored. Empty or malformed cells read as
//! missing values and are dealt with by the normalizer.
//!
//! ```text
//! game_date,pitcher,batter,at_bat_number,pitch_number,pitch_type,plate_x,plate_z,stand,p_throws,balls,strikes,type,description,events
//! 2024-04-01,543037,660271,12,1,FF,0.12,2.61,R,R,0,0,S,called_strike,
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

/// Column names the normalizer reads.
pub const EXPECTED_COLUMNS: [&str; 15] = [
    "game_date",
    "pitcher",
    "batter",
    "at_bat_number",
    "pitch_number",
    "pitch_type",
    "plate_x",
    "plate_z",
    "stand",
    "p_throws",
    "balls",
    "strikes",
    "type",
    "description",
    "events",
];

/// One row of the corpus as stored, before any validation.
///
/// Integer columns are kept as text: exports of columns with missing values
/// write them as floats (`2.0`), and the normalizer coerces them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPitchRow {
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub pitcher: Option<String>,
    #[serde(default)]
    pub batter: Option<String>,
    #[serde(default)]
    pub at_bat_number: Option<String>,
    #[serde(default)]
    pub pitch_number: Option<String>,
    #[serde(default)]
    pub pitch_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub plate_x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub plate_z: Option<f64>,
    #[serde(default)]
    pub stand: Option<String>,
    #[serde(default)]
    pub p_throws: Option<String>,
    #[serde(default)]
    pub balls: Option<String>,
    #[serde(default)]
    pub strikes: Option<String>,
    #[serde(default, rename = "type")]
    pub outcome_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub events: Option<String>,
}

/// The rows of a corpus file loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub rows: Vec<RawPitchRow>,
    /// Rows the CSV reader could not decode (e.g. wrong field count)
    pub unreadable_rows: u64,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CorpusError {
    #[display("failed to open corpus file {}", path.display())]
    Open { path: PathBuf, source: csv::Error },
    #[display("failed to read header row of corpus file {}", path.display())]
    Header { path: PathBuf, source: csv::Error },
}

/// Loads a corpus CSV file.
///
/// Fails only if the file cannot be opened or has no readable header row.
/// Rows that cannot be decoded are counted in [`Corpus::unreadable_rows`]
/// and skipped.
pub fn read_corpus<P>(path: P) -> Result<Corpus, CorpusError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CorpusError::Open {
            path: path.to_owned(),
            source,
        })?;

    let headers = reader.headers().map_err(|source| CorpusError::Header {
        path: path.to_owned(),
        source,
    })?;
    let missing = EXPECTED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        warn!(
            "corpus {} has no column(s) {}; affected fields read as missing",
            path.display(),
            missing.join(", ")
        );
    }

    let mut corpus = Corpus::default();
    for result in reader.deserialize::<RawPitchRow>() {
        match result {
            Ok(row) => corpus.rows.push(row),
            Err(err) => {
                corpus.unreadable_rows += 1;
                debug!("skipping unreadable corpus row: {err}");
            }
        }
    }
    Ok(corpus)
}
