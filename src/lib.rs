//! Start-time correction for OpenBCI EXG recordings.
//!
//! The board's sample clock runs unevenly for the first seconds of every recording. This
//! crate finds the sample where the clock settles, trims everything before it and hands
//! back channel-major arrays ready for analysis.
pub mod config;
pub mod dataset;
pub mod exg;
pub use config::{load_config, ConfigError, ProcessingConfig};
pub use dataset::{DatasetError, SubjectIndex, TrialKey, TrialStarts};
pub use exg::{
    find_start, select_channels, ExgError, Recording, StartCorrection, StartSearch,
    TrialProcessor,
};
