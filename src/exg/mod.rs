// src/exg/mod.rs
pub mod channels;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod protocol;
pub mod recording;
pub mod slope;
pub mod start;
pub use channels::{select_channels, BoardTable, ChannelSelection, CYTON_CHANNELS, GANGLION_CHANNELS};
pub use error::ExgError;
pub use pipeline::{CorrectedTrial, MissingStartPolicy, TrialProcessor};
pub use plot::{render_session_markers_png, render_start_search_png, PlotStyle};
pub use protocol::{SessionProtocol, SessionTiming};
pub use recording::{Column, Recording};
pub use slope::least_squares_slope;
pub use start::{find_start, SearchWindow, StartCorrection, StartSearch};
