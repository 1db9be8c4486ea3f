use log::{info, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use crate::exg::channels::{select_channels, BoardTable, ChannelSelection};
use crate::exg::start::{StartCorrection, StartSearch};
use crate::exg::{ExgError, Recording};
/// What to do when no settled clock window exists in the search range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStartPolicy {
    /// Trim at the first sample of the search range.
    #[default]
    SearchStart,
    /// Leave the recording untouched.
    KeepAll,
    Abort,
}
/// A trial after start correction.
#[derive(Clone, Debug)]
pub struct CorrectedTrial {
    pub correction: StartCorrection,
    /// Rows actually removed from the front of the recording.
    pub trimmed_rows: usize,
    pub recording: Recording,
    pub channels: Array2<f64>, // channels x samples
}
/// Start search, trim and channel extraction for one trial at a time.
#[derive(Clone, Debug, Default)]
pub struct TrialProcessor {
    pub search: StartSearch,
    pub selection: ChannelSelection,
    pub boards: BoardTable,
    pub on_missing_start: MissingStartPolicy,
}
impl TrialProcessor {
    pub fn new(search: StartSearch, selection: ChannelSelection) -> Self {
        Self {
            search,
            selection,
            ..Self::default()
        }
    }
    pub fn with_boards(mut self, boards: BoardTable) -> Self {
        self.boards = boards;
        self
    }
    pub fn with_missing_start(mut self, policy: MissingStartPolicy) -> Self {
        self.on_missing_start = policy;
        self
    }
    pub fn process(&self, recording: &Recording) -> Result<CorrectedTrial, ExgError> {
        let clock = recording.clock_fractions()?;
        let correction = self.search.run(&clock)?;
        let fs = self.search.sample_rate_hz;
        let trim_at = if correction.found {
            info!(
                "clock settled at sample {} ({:.4} s)",
                correction.mark,
                correction.mark_seconds(fs)
            );
            correction.mark
        } else {
            let window = self.search.window;
            match self.on_missing_start {
                MissingStartPolicy::SearchStart => {
                    warn!(
                        "no settled clock in [{}, {}) s, trimming at search start",
                        window.start_secs, window.end_secs
                    );
                    correction.mark
                }
                MissingStartPolicy::KeepAll => {
                    warn!(
                        "no settled clock in [{}, {}) s, keeping all samples",
                        window.start_secs, window.end_secs
                    );
                    0
                }
                MissingStartPolicy::Abort => {
                    return Err(ExgError::StartNotFound {
                        start_secs: window.start_secs,
                        end_secs: window.end_secs,
                    })
                }
            }
        };
        let corrected = recording.trim(trim_at)?;
        let channels = select_channels(&corrected, &self.selection, &self.boards)?;
        Ok(CorrectedTrial {
            correction,
            trimmed_rows: trim_at,
            recording: corrected,
            channels,
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;
    use crate::dataset::layout::tests::ScratchDir;
    use crate::dataset::{load_trial, CsvSource, LayoutOptions, SubjectIndex, TrialKey};
    use crate::exg::recording::Column;
    use crate::exg::start::SearchWindow;
    /// Ganglion export whose clock runs at half speed until `knee` samples.
    fn drifting_recording(rows: usize, fs: f64, knee: usize) -> Recording {
        let mut columns = vec![Column::Numeric((0..rows).map(|n| n as f64).collect())];
        for ch in 1..=4 {
            columns.push(Column::Numeric(
                (0..rows).map(|n| (ch * n) as f64).collect(),
            ));
        }
        let knee_secs = knee as f64 / fs;
        columns.push(Column::Numeric(
            (0..rows)
                .map(|n| {
                    let t = n as f64 / fs;
                    let wall = if n < knee { 0.5 * t } else { t - 0.5 * knee_secs };
                    1_614_939_320.0 + wall
                })
                .collect(),
        ));
        Recording::from_columns(vec![], columns).unwrap()
    }
    fn processor(fs: f64) -> TrialProcessor {
        TrialProcessor::new(
            StartSearch {
                window: SearchWindow::new(1.0, 3.0),
                sample_rate_hz: fs,
                slope_len: 20,
                threshold: 1e-3,
            },
            ChannelSelection::Board("Ganglion".into()),
        )
    }
    #[test]
    fn trims_before_settled_clock() {
        let fs = 200.0;
        let recording = drifting_recording(1000, fs, 400);
        let trial = processor(fs).process(&recording).unwrap();
        assert!(trial.correction.found);
        let mark = trial.correction.mark;
        assert!((380..=400).contains(&mark), "mark {mark}");
        assert_eq!(trial.trimmed_rows, mark);
        assert_eq!(trial.recording.row_count(), 1000 - mark);
        assert_eq!(trial.channels.shape(), &[4, 1000 - mark]);
        assert_eq!(trial.channels[[1, 0]], (2 * mark) as f64);
    }
    #[test]
    fn missing_start_policies() {
        let fs = 200.0;
        // Clock never settles inside [1, 3) s.
        let recording = drifting_recording(1000, fs, 900);
        let trial = processor(fs).process(&recording).unwrap();
        assert!(!trial.correction.found);
        assert_eq!(trial.trimmed_rows, 200);
        let kept = processor(fs)
            .with_missing_start(MissingStartPolicy::KeepAll)
            .process(&recording)
            .unwrap();
        assert_eq!(kept.recording.row_count(), 1000);
        let err = processor(fs)
            .with_missing_start(MissingStartPolicy::Abort)
            .process(&recording)
            .unwrap_err();
        assert!(matches!(err, ExgError::StartNotFound { .. }));
    }
    #[test]
    fn corrects_ganglion_export_from_disk() {
        let fs = 1600.0;
        let knee = 4000;
        let mut text = String::from(
            "%OpenBCI Raw EXG Data\n%Number of channels = 4\n%Sample Rate = 1600 Hz\n%Board = Ganglion\n",
        );
        text.push_str("Sample Index, EXG Channel 0, EXG Channel 1, EXG Channel 2, EXG Channel 3, Timestamp (Formatted)\n");
        for n in 0..6000usize {
            let t = n as f64 / fs;
            let wall = if n < knee { 0.5 * t } else { t - 1.25 };
            let micros = (wall * 1e6).round() as u64;
            let _ = writeln!(
                text,
                "{n}, {:.2}, {:.2}, {:.2}, {:.2}, 2021-03-05 10:15:{:02}.{:06}",
                n as f64 * 0.1,
                -(n as f64),
                1.0,
                2.0,
                20 + micros / 1_000_000,
                micros % 1_000_000
            );
        }
        let scratch = ScratchDir::new("pipeline-e2e");
        let folder = scratch.0.join("OpenBCISession_A01-S1-01");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("OpenBCI-RAW-2021-03-05_10-15-20.txt"), text).unwrap();
        let index = SubjectIndex::scan(&scratch.0, &LayoutOptions::default()).unwrap();
        let key = TrialKey::new("A01", "S1", 1);
        let recording = load_trial(&CsvSource::default(), &index, &key, 0).unwrap();
        let trial = TrialProcessor::default().process(&recording).unwrap();
        assert!(trial.correction.found);
        let window_secs = 100.0 / fs;
        assert!((trial.correction.mark_seconds(fs) - 2.5).abs() <= window_secs);
        assert_eq!(trial.channels.nrows(), 4);
        assert_eq!(trial.channels.ncols(), 6000 - trial.correction.mark);
    }
}
