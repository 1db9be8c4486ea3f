use std::fs;
use std::path::Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::dataset::{DatasetError, SubjectIndex, TrialKey};
use crate::exg::{Column, Recording};
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Zero-based line holding the column names. OpenBCI exports start with a
    /// four-line `%` metadata block.
    pub header_row: usize,
}
impl Default for ReadOptions {
    fn default() -> Self {
        Self { header_row: 4 }
    }
}
/// Anything that can produce the recording stored at a path.
pub trait RecordingSource {
    fn load(&self, path: &Path) -> Result<Recording, DatasetError>;
}
/// Reads OpenBCI CSV exports from disk.
#[derive(Clone, Debug, Default)]
pub struct CsvSource {
    pub options: ReadOptions,
}
impl CsvSource {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }
}
impl RecordingSource for CsvSource {
    fn load(&self, path: &Path) -> Result<Recording, DatasetError> {
        read_recording(path, &self.options)
    }
}
pub fn load_trial<S: RecordingSource>(
    source: &S,
    index: &SubjectIndex,
    key: &TrialKey,
    trial: usize,
) -> Result<Recording, DatasetError> {
    let path = index.trial_path(key, trial)?;
    debug!("loading {key} trial {trial} from {}", path.display());
    source.load(&path)
}
pub fn read_recording(path: &Path, options: &ReadOptions) -> Result<Recording, DatasetError> {
    let text = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    let body = skip_lines(&text, options.header_row).ok_or_else(|| DatasetError::MissingHeader {
        path: path.to_path_buf(),
        line: options.header_row,
    })?;
    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();
    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(csv_error)?;
    let columns = (0..headers.len())
        .map(|index| typed_column(&records, index))
        .collect();
    debug!(
        "{}: {} rows x {} columns",
        path.display(),
        records.len(),
        headers.len()
    );
    Ok(Recording::from_columns(headers, columns)?)
}
fn skip_lines(text: &str, lines: usize) -> Option<&str> {
    let mut rest = text;
    for _ in 0..lines {
        let end = rest.find('\n')?;
        rest = &rest[end + 1..];
    }
    if rest.trim().is_empty() {
        None
    } else {
        Some(rest)
    }
}
/// Numeric when every field parses as `f64`, text otherwise. Blank fields read as NaN.
fn typed_column(records: &[StringRecord], index: usize) -> Column {
    let field = |record: &StringRecord| record.get(index).unwrap_or("").to_string();
    let numbers: Option<Vec<f64>> = records
        .iter()
        .map(|record| parse_number(record.get(index).unwrap_or("")))
        .collect();
    match numbers {
        Some(values) => Column::Numeric(values),
        None => Column::Text(records.iter().map(field).collect()),
    }
}
fn parse_number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        Some(f64::NAN)
    } else {
        field.parse().ok()
    }
}
