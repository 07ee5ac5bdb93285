// Result Normalizer - smallfile JSON / CSV -> canonical output model

use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants::{AGGREGATE_ROW_PREFIXES, RSPTIME_BUCKETS, RSPTIME_CSV, RSPTIME_SUBDIR};
use crate::domain::aliases;
use crate::domain::{ResponseTimeSample, SmallfileOutputParams, SmallfileOutputResults};
use crate::error::{AppError, Result};

/// Document written by smallfile_cli.py --output-json
#[derive(Debug, Clone, Deserialize)]
pub struct ResultDocument {
    pub params: SmallfileOutputParams,
    pub results: SmallfileOutputResults,
}

pub fn parse_result_document(json: &str) -> Result<ResultDocument> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_result_document(path: &Path) -> Result<ResultDocument> {
    let json = std::fs::read_to_string(path)?;
    parse_result_document(&json)
}

/// Bucket width in whole seconds: the run split into ~120 windows, never
/// narrower than one second.
pub fn time_interval_secs(elapsed_secs: f64) -> u64 {
    // `as` saturates: negative and NaN become 0
    ((elapsed_secs / RSPTIME_BUCKETS).floor() as u64).max(1)
}

/// Start timestamp truncated to whole seconds
pub fn start_time_secs(start_time: f64) -> i64 {
    start_time.trunc() as i64
}

/// Directory holding the response-time files for a run rooted at `top`
pub fn rsptime_dir(top: &str) -> PathBuf {
    Path::new(top).join(RSPTIME_SUBDIR)
}

/// Summary rows injected by the post-processor (per-host, cluster-wide,
/// time-windowed) rather than individual host:thread samples
pub fn is_aggregate_row(identity: &str) -> bool {
    AGGREGATE_ROW_PREFIXES
        .iter()
        .any(|prefix| identity.starts_with(prefix))
}

struct ColumnIndex {
    host_thread: usize,
    samples: usize,
    min: usize,
    max: usize,
    mean: usize,
    pctdev: usize,
    pctile50: usize,
    pctile90: usize,
    pctile95: usize,
    pctile99: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |field: &str| -> Result<usize> {
            let column = aliases::rsptime_column(field);
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| {
                    AppError::Parse(format!(
                        "{} is missing column '{}'",
                        RSPTIME_CSV, column
                    ))
                })
        };

        Ok(Self {
            host_thread: find("host_thread")?,
            samples: find("samples")?,
            min: find("min")?,
            max: find("max")?,
            mean: find("mean")?,
            pctdev: find("pctdev")?,
            pctile50: find("pctile50")?,
            pctile90: find("pctile90")?,
            pctile95: find("pctile95")?,
            pctile99: find("pctile99")?,
        })
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, row: &str) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| AppError::Parse(format!("row '{}' has no column #{}", row, index)))
}

fn number<T: std::str::FromStr>(record: &csv::StringRecord, index: usize, row: &str) -> Result<T> {
    let raw = field(record, index, row)?;
    raw.parse()
        .map_err(|_| AppError::Parse(format!("row '{}': '{}' is not a number", row, raw)))
}

/// Parse stats-rsptimes.csv, dropping aggregate rows
///
/// Columns are matched through the alias table; extra columns are ignored,
/// a missing one is an error.
pub fn parse_rsptimes_csv<R: Read>(reader: R) -> Result<Vec<ResponseTimeSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut samples = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let identity = field(&record, columns.host_thread, "")?.to_string();

        if is_aggregate_row(&identity) {
            continue;
        }

        samples.push(ResponseTimeSample {
            samples: number(&record, columns.samples, &identity)?,
            min: number(&record, columns.min, &identity)?,
            max: number(&record, columns.max, &identity)?,
            mean: number(&record, columns.mean, &identity)?,
            pctdev: number(&record, columns.pctdev, &identity)?,
            pctile50: number(&record, columns.pctile50, &identity)?,
            pctile90: number(&record, columns.pctile90, &identity)?,
            pctile95: number(&record, columns.pctile95, &identity)?,
            pctile99: number(&record, columns.pctile99, &identity)?,
            host_thread: identity,
        });
    }

    debug!(samples = samples.len(), "Parsed response-time statistics");
    Ok(samples)
}

pub fn read_rsptimes(dir: &Path) -> Result<Vec<ResponseTimeSample>> {
    let file = std::fs::File::open(dir.join(RSPTIME_CSV))?;
    parse_rsptimes_csv(file)
}
