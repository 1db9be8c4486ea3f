use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::ConfigError;
use crate::exg::ExgError;
/// Movement sequence of one experiment session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTiming {
    /// Duration of every movement, in seconds.
    #[serde(rename = "dur")]
    pub durations: Vec<f64>,
    /// Movement names, parallel to `durations`.
    #[serde(rename = "act", default)]
    pub actions: Vec<String>,
}
/// Session name to movement sequence, e.g. `{"S1": {"dur": [5, 5], "act": ["rest", "grip"]}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionProtocol {
    sessions: BTreeMap<String, SessionTiming>,
}
impl SessionProtocol {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
    pub fn insert(&mut self, session: &str, timing: SessionTiming) {
        self.sessions.insert(session.to_string(), timing);
    }
    pub fn session(&self, session: &str) -> Result<&SessionTiming, ExgError> {
        self.sessions
            .get(session)
            .ok_or_else(|| ExgError::UnknownSession(session.to_string()))
    }
    /// Movement boundaries in seconds: the first movement starts at `time_start`, every
    /// following boundary adds one duration.
    pub fn marker_times(&self, session: &str, time_start: f64) -> Result<Vec<f64>, ExgError> {
        let timing = self.session(session)?;
        let mut times = Vec::with_capacity(timing.durations.len() + 1);
        let mut now = time_start;
        times.push(now);
        for duration in &timing.durations {
            now += duration;
            times.push(now);
        }
        Ok(times)
    }
}
