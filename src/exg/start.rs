use log::debug;
use serde::{Deserialize, Serialize};
use crate::exg::slope::least_squares_slope;
use crate::exg::ExgError;
/// Half-open search range `[start_secs, end_secs)` in recording time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start_secs: f64,
    pub end_secs: f64,
}
impl SearchWindow {
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }
    /// Sample bounds `(floor(start * fs), floor(end * fs))`.
    pub fn sample_bounds(&self, sample_rate_hz: f64) -> (usize, usize) {
        (
            (self.start_secs * sample_rate_hz).floor() as usize,
            (self.end_secs * sample_rate_hz).floor() as usize,
        )
    }
    fn validate(&self) -> Result<(), ExgError> {
        let ordered = self.start_secs < self.end_secs;
        if !ordered || self.start_secs < 0.0 || !self.end_secs.is_finite() {
            return Err(ExgError::EmptyWindow {
                start_secs: self.start_secs,
                end_secs: self.end_secs,
            });
        }
        Ok(())
    }
}
impl Default for SearchWindow {
    fn default() -> Self {
        // The unstable clock of the reference boards settles within the first few seconds.
        Self::new(1.75, 3.25)
    }
}
/// Parameters of the settled-clock search.
#[derive(Clone, Debug, PartialEq)]
pub struct StartSearch {
    pub window: SearchWindow,
    pub sample_rate_hz: f64,
    /// Samples per local slope estimate.
    pub slope_len: usize,
    /// Accept a window once `1 - slope` drops below this.
    pub threshold: f64,
}
impl Default for StartSearch {
    fn default() -> Self {
        Self {
            window: SearchWindow::default(),
            sample_rate_hz: 1600.0,
            slope_len: 100,
            threshold: 1e-3,
        }
    }
}
/// Outcome of one start search.
#[derive(Clone, Debug, PartialEq)]
pub struct StartCorrection {
    /// First sample of the search range (`N0`).
    pub first_sample: usize,
    /// One slope per window offset, aligned with `first_sample + offset`.
    pub slopes: Vec<f64>,
    /// First trustworthy sample, or `first_sample` when nothing settled.
    pub mark: usize,
    pub found: bool,
}
impl StartCorrection {
    pub fn mark_seconds(&self, sample_rate_hz: f64) -> f64 {
        self.mark as f64 / sample_rate_hz
    }
}
impl StartSearch {
    pub fn validate(&self) -> Result<(), ExgError> {
        if self.sample_rate_hz <= 0.0 || !self.sample_rate_hz.is_finite() {
            return Err(ExgError::InvalidSampleRate(self.sample_rate_hz));
        }
        if self.slope_len < 2 {
            return Err(ExgError::DegenerateWindow(self.slope_len));
        }
        self.window.validate()
    }
    /// Slides a `slope_len` window across the search range of `timestamps` and marks the
    /// first window whose clock slope is within `threshold` of one.
    ///
    /// `timestamps` holds the sub-second part of the board's wall clock, one value per
    /// sample. The acceptance test is `(1 - slope) < threshold`, so slopes above one are
    /// accepted as well.
    pub fn run(&self, timestamps: &[f64]) -> Result<StartCorrection, ExgError> {
        self.validate()?;
        let fs = self.sample_rate_hz;
        let (first, last) = self.window.sample_bounds(fs);
        if last > timestamps.len() {
            return Err(ExgError::WindowOutOfRange {
                first,
                last,
                len: timestamps.len(),
            });
        }
        let times: Vec<f64> = (first..last).map(|n| n as f64 / fs).collect();
        let clock = &timestamps[first..last];
        let positions = times.len().saturating_sub(self.slope_len);
        let mut slopes = Vec::with_capacity(positions);
        let mut mark = first;
        let mut found = false;
        for offset in 0..positions {
            let end = offset + self.slope_len;
            let slope = least_squares_slope(&times[offset..end], &clock[offset..end])?;
            slopes.push(slope);
            if !found && (1.0 - slope) < self.threshold {
                debug!("clock settled at sample {} (slope {slope:.6})", first + offset);
                mark = first + offset;
                found = true;
            }
        }
        Ok(StartCorrection {
            first_sample: first,
            slopes,
            mark,
            found,
        })
    }
}
pub fn find_start(timestamps: &[f64], search: &StartSearch) -> Result<StartCorrection, ExgError> {
    search.run(timestamps)
}
