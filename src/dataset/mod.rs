// src/dataset/mod.rs
pub mod error;
pub mod layout;
pub mod reader;
pub mod trial_starts;
pub use error::DatasetError;
pub use layout::{parse_folder_name, FolderInfo, LayoutOptions, SubjectIndex, TrialKey};
pub use reader::{load_trial, read_recording, CsvSource, ReadOptions, RecordingSource};
pub use trial_starts::TrialStarts;
