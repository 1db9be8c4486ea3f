use thiserror::Error;
#[derive(Debug, Error)]
pub enum ExgError {
    #[error("sample rate must be greater than zero, got {0}")]
    InvalidSampleRate(f64),
    #[error("search window [{start_secs}, {end_secs}) s is empty, reversed or negative")]
    EmptyWindow { start_secs: f64, end_secs: f64 },
    #[error("search window covers samples {first}..{last} but the recording has {len}")]
    WindowOutOfRange { first: usize, last: usize, len: usize },
    #[error("slope window must hold at least 2 samples, got {0}")]
    DegenerateWindow(usize),
    #[error("slope window x values have zero variance")]
    ZeroVariance,
    #[error("length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("no settled clock window found in [{start_secs}, {end_secs}) s")]
    StartNotFound { start_secs: f64, end_secs: f64 },
    #[error("trim mark {mark} outside recording of {rows} rows")]
    MarkOutOfRange { mark: usize, rows: usize },
    #[error("column {column} has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: usize,
        expected: usize,
        actual: usize,
    },
    #[error("recording has no columns")]
    NoColumns,
    #[error("unknown board `{0}` and no explicit channel list")]
    UnknownBoard(String),
    #[error("channel selection is empty")]
    NoChannels,
    #[error("channel column {index} outside recording of {columns} columns")]
    ChannelOutOfRange { index: usize, columns: usize },
    #[error("channel row {row} outside array of {rows} channels")]
    ChannelRowOutOfRange { row: usize, rows: usize },
    #[error("column {0} is not numeric")]
    NonNumericColumn(usize),
    #[error("failed to parse timestamp `{value}` at row {row}")]
    Timestamp { row: usize, value: String },
    #[error("session `{0}` not found in protocol")]
    UnknownSession(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ExgError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ExgError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ExgError {
    fn from(value: image::ImageError) -> Self {
        ExgError::Plot(value.to_string())
    }
}
