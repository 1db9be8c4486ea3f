// src/config.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::dataset::{LayoutOptions, ReadOptions};
use crate::exg::{
    BoardTable, ChannelSelection, MissingStartPolicy, SearchWindow, StartSearch, TrialProcessor,
};
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}
/// Everything needed to correct a batch of trials. Every field has a default, so a
/// config file only lists what differs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub sample_rate_hz: f64,
    pub search: SearchWindow,
    pub slope_len: usize,
    pub threshold: f64,
    pub board: String,
    /// Explicit EXG columns; overrides `board` when present.
    pub channels: Option<Vec<usize>>,
    /// Extra board layouts on top of Ganglion and Cyton.
    pub boards: BTreeMap<String, Vec<usize>>,
    pub on_missing_start: MissingStartPolicy,
    pub layout: LayoutOptions,
    pub read: ReadOptions,
}
impl Default for ProcessingConfig {
    fn default() -> Self {
        let search = StartSearch::default();
        Self {
            sample_rate_hz: search.sample_rate_hz,
            search: search.window,
            slope_len: search.slope_len,
            threshold: search.threshold,
            board: "Ganglion".to_string(),
            channels: None,
            boards: BTreeMap::new(),
            on_missing_start: MissingStartPolicy::default(),
            layout: LayoutOptions::default(),
            read: ReadOptions::default(),
        }
    }
}
impl ProcessingConfig {
    pub fn start_search(&self) -> StartSearch {
        StartSearch {
            window: self.search,
            sample_rate_hz: self.sample_rate_hz,
            slope_len: self.slope_len,
            threshold: self.threshold,
        }
    }
    pub fn channel_selection(&self) -> ChannelSelection {
        match &self.channels {
            Some(columns) => ChannelSelection::Columns(columns.clone()),
            None => ChannelSelection::Board(self.board.clone()),
        }
    }
    pub fn board_table(&self) -> BoardTable {
        let mut table = BoardTable::default();
        for (name, channels) in &self.boards {
            table.register(name, channels.clone());
        }
        table
    }
    pub fn processor(&self) -> TrialProcessor {
        TrialProcessor::new(self.start_search(), self.channel_selection())
            .with_boards(self.board_table())
            .with_missing_start(self.on_missing_start)
    }
}
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProcessingConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn empty_config_uses_defaults() {
        let config: ProcessingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProcessingConfig::default());
        assert_eq!(config.start_search(), StartSearch::default());
        assert_eq!(
            config.channel_selection(),
            ChannelSelection::Board("Ganglion".into())
        );
    }
    #[test]
    fn partial_config_overrides_fields() {
        let config: ProcessingConfig = serde_json::from_str(
            r#"{
                "sample_rate_hz": 250.0,
                "search": {"start_secs": 0.5, "end_secs": 2.0},
                "board": "Daisy",
                "boards": {"Daisy": [1, 2, 3]},
                "on_missing_start": "abort",
                "layout": {"prefix": "Rec_"}
            }"#,
        )
        .unwrap();
        let search = config.start_search();
        assert_eq!(search.sample_rate_hz, 250.0);
        assert_eq!(search.window, SearchWindow::new(0.5, 2.0));
        assert_eq!(search.slope_len, 100);
        assert_eq!(config.layout.delimiter, "-");
        assert_eq!(config.on_missing_start, MissingStartPolicy::Abort);
        let columns = config
            .channel_selection()
            .resolve(&config.board_table())
            .unwrap();
        assert_eq!(columns, vec![1, 2, 3]);
    }
    #[test]
    fn explicit_channels_win_over_board() {
        let config: ProcessingConfig =
            serde_json::from_str(r#"{"board": "Cyton", "channels": [2, 4]}"#).unwrap();
        assert_eq!(config.channel_selection(), ChannelSelection::Columns(vec![2, 4]));
    }
    #[test]
    fn missing_file_is_io_error() {
        let err = load_config("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
