use chrono::{NaiveDateTime, Timelike};
use crate::exg::ExgError;
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
/// One column of a recording.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}
impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Column::Numeric(values) => Some(values),
            Column::Text(_) => None,
        }
    }
    fn tail(&self, from: usize) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(values[from..].to_vec()),
            Column::Text(values) => Column::Text(values[from..].to_vec()),
        }
    }
}
/// A trial as loaded from disk: rows are samples, the last column is the board timestamp.
///
/// Columns are addressed by position, matching the board's fixed export layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    headers: Vec<String>,
    columns: Vec<Column>, // column -> rows
    rows: usize,
}
impl Recording {
    pub fn from_columns(headers: Vec<String>, columns: Vec<Column>) -> Result<Self, ExgError> {
        let rows = columns.first().ok_or(ExgError::NoColumns)?.len();
        for (column, values) in columns.iter().enumerate() {
            if values.len() != rows {
                return Err(ExgError::RaggedColumn {
                    column,
                    expected: rows,
                    actual: values.len(),
                });
            }
        }
        let mut headers = headers;
        headers.resize_with(columns.len(), String::new);
        Ok(Self {
            headers,
            columns,
            rows,
        })
    }
    pub fn row_count(&self) -> usize {
        self.rows
    }
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }
    pub fn duration_seconds(&self, sample_rate_hz: f64) -> f64 {
        self.rows as f64 / sample_rate_hz
    }
    /// Drops every row before `mark`.
    ///
    /// `mark == 0` always succeeds, so trimming an already trimmed recording at zero is a no-op.
    pub fn trim(&self, mark: usize) -> Result<Recording, ExgError> {
        if mark == 0 {
            return Ok(self.clone());
        }
        if mark >= self.rows {
            return Err(ExgError::MarkOutOfRange {
                mark,
                rows: self.rows,
            });
        }
        Ok(Recording {
            headers: self.headers.clone(),
            columns: self.columns.iter().map(|c| c.tail(mark)).collect(),
            rows: self.rows - mark,
        })
    }
    /// Sub-second part of the trailing timestamp column, in seconds with microsecond resolution.
    pub fn clock_fractions(&self) -> Result<Vec<f64>, ExgError> {
        let column = self.columns.last().ok_or(ExgError::NoColumns)?;
        match column {
            Column::Numeric(values) => Ok(values
                .iter()
                .map(|v| micros_to_secs(((v * 1e6).round() as i64).rem_euclid(1_000_000) as u32))
                .collect()),
            Column::Text(values) => values
                .iter()
                .enumerate()
                .map(|(row, value)| {
                    parse_timestamp(value)
                        .map(|dt| micros_to_secs((dt.nanosecond() % 1_000_000_000) / 1_000))
                        .ok_or_else(|| ExgError::Timestamp {
                            row,
                            value: value.clone(),
                        })
                })
                .collect(),
        }
    }
}
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
}
fn micros_to_secs(micros: u32) -> f64 {
    micros as f64 / 1_000_000.0
}
