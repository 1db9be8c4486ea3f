//! Board layouts and channel extraction.
//!
//! OpenBCI exports put the sample index in column 0 and the EXG channels right after it:
//! - Ganglion: 4 EXG channels, columns 1..=4.
//! - Cyton: 8 EXG channels, columns 1..=8.
//!
//! Columns are addressed by position. A recording whose layout differs from the board's
//! export silently yields the wrong columns, so pass an explicit list for custom exports.
use std::collections::BTreeMap;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use crate::exg::{ExgError, Recording};
/// EXG columns of a Ganglion export.
pub const GANGLION_CHANNELS: [usize; 4] = [1, 2, 3, 4];
/// EXG columns of a Cyton export.
pub const CYTON_CHANNELS: [usize; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
/// Board name to EXG column lookup. Names are matched case-insensitively.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardTable {
    boards: BTreeMap<String, Vec<usize>>,
}
impl BoardTable {
    pub fn empty() -> Self {
        Self {
            boards: BTreeMap::new(),
        }
    }
    pub fn register(&mut self, name: &str, channels: Vec<usize>) {
        self.boards.insert(name.to_lowercase(), channels);
    }
    pub fn channels_for(&self, board: &str) -> Result<&[usize], ExgError> {
        self.boards
            .get(&board.to_lowercase())
            .map(Vec::as_slice)
            .ok_or_else(|| ExgError::UnknownBoard(board.to_string()))
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(String::as_str)
    }
}
impl Default for BoardTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register("Ganglion", GANGLION_CHANNELS.to_vec());
        table.register("Cyton", CYTON_CHANNELS.to_vec());
        // Older recording notes spell the 8-channel board this way.
        table.register("Cython", CYTON_CHANNELS.to_vec());
        table
    }
}
/// Which columns become channels. An explicit list overrides the board default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSelection {
    Board(String),
    Columns(Vec<usize>),
}
impl ChannelSelection {
    pub fn resolve(&self, boards: &BoardTable) -> Result<Vec<usize>, ExgError> {
        let columns = match self {
            ChannelSelection::Board(name) => boards.channels_for(name)?.to_vec(),
            ChannelSelection::Columns(columns) => columns.clone(),
        };
        if columns.is_empty() {
            return Err(ExgError::NoChannels);
        }
        Ok(columns)
    }
}
impl Default for ChannelSelection {
    fn default() -> Self {
        ChannelSelection::Board("Ganglion".to_string())
    }
}
/// Channel-major copy of the selected columns: row `k` holds every sample of the `k`-th column.
pub fn select_channels(
    recording: &Recording,
    selection: &ChannelSelection,
    boards: &BoardTable,
) -> Result<Array2<f64>, ExgError> {
    let columns = selection.resolve(boards)?;
    let mut out = Array2::<f64>::zeros((columns.len(), recording.row_count()));
    for (row, &index) in columns.iter().enumerate() {
        let values = recording
            .column(index)
            .ok_or(ExgError::ChannelOutOfRange {
                index,
                columns: recording.column_count(),
            })?
            .as_numeric()
            .ok_or(ExgError::NonNumericColumn(index))?;
        out.row_mut(row).assign(&ArrayView1::from(values));
    }
    Ok(out)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::exg::recording::tests::ganglion_recording;
    #[test]
    fn ganglion_selection_is_channel_major() {
        let recording = ganglion_recording(25);
        let channels = select_channels(
            &recording,
            &ChannelSelection::Board("Ganglion".into()),
            &BoardTable::default(),
        )
        .unwrap();
        assert_eq!(channels.shape(), &[4, 25]);
        assert_eq!(channels[[0, 0]], 100.0);
        assert_eq!(channels[[3, 24]], 424.0);
    }
    #[test]
    fn explicit_columns_override_board_and_keep_order() {
        let recording = ganglion_recording(5);
        let channels = select_channels(
            &recording,
            &ChannelSelection::Columns(vec![3, 1]),
            &BoardTable::default(),
        )
        .unwrap();
        assert_eq!(channels.shape(), &[2, 5]);
        assert_eq!(channels[[0, 2]], 302.0);
        assert_eq!(channels[[1, 2]], 102.0);
    }
    #[test]
    fn default_table_lists_known_boards() {
        let table = BoardTable::default();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["cyton", "cython", "ganglion"]);
        assert_eq!(BoardTable::empty().names().count(), 0);
    }
    #[test]
    fn board_names_are_case_insensitive() {
        let boards = BoardTable::default();
        assert_eq!(boards.channels_for("cython").unwrap(), &CYTON_CHANNELS);
        assert_eq!(boards.channels_for("CYTON").unwrap().len(), 8);
        assert_eq!(boards.channels_for("ganglion").unwrap(), &GANGLION_CHANNELS);
    }
    #[test]
    fn unknown_board_without_columns_fails() {
        let recording = ganglion_recording(5);
        let err = select_channels(
            &recording,
            &ChannelSelection::Board("Daisy".into()),
            &BoardTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExgError::UnknownBoard(name) if name == "Daisy"));
    }
    #[test]
    fn custom_board_can_be_registered() {
        let mut boards = BoardTable::default();
        boards.register("Daisy", vec![2, 4]);
        let recording = ganglion_recording(5);
        let channels =
            select_channels(&recording, &ChannelSelection::Board("Daisy".into()), &boards)
                .unwrap();
        assert_eq!(channels.shape(), &[2, 5]);
    }
    #[test]
    fn cyton_layout_on_ganglion_export_is_out_of_range() {
        let recording = ganglion_recording(5);
        let err = select_channels(
            &recording,
            &ChannelSelection::Board("Cyton".into()),
            &BoardTable::default(),
        )
        .unwrap_err();
        // Column 5 is the timestamp text, the first bad column hit.
        assert!(matches!(err, ExgError::NonNumericColumn(5)));
        let err = select_channels(
            &recording,
            &ChannelSelection::Columns(vec![9]),
            &BoardTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExgError::ChannelOutOfRange { index: 9, columns: 6 }));
    }
    #[test]
    fn empty_column_list_is_rejected() {
        let recording = ganglion_recording(5);
        let err = select_channels(
            &recording,
            &ChannelSelection::Columns(vec![]),
            &BoardTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExgError::NoChannels));
    }
}
