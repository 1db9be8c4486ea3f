use std::collections::BTreeMap;
use crate::dataset::{DatasetError, SubjectIndex, TrialKey};
/// Movement start time of every trial, seconds after the corrected recording start.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialStarts {
    starts: BTreeMap<TrialKey, Vec<f64>>,
}
impl TrialStarts {
    /// One zeroed slot per trial file in `index`.
    pub fn from_index(index: &SubjectIndex) -> Self {
        let starts = index
            .keys()
            .map(|key| {
                let trials = index.trials(key).map_or(0, <[_]>::len);
                (key.clone(), vec![0.0; trials])
            })
            .collect();
        Self { starts }
    }
    pub fn insert(&mut self, key: &TrialKey, trial: usize, start_secs: f64) -> Result<(), DatasetError> {
        let slot = self
            .slots_mut(key)?
            .get_mut(trial)
            .ok_or_else(|| DatasetError::UnknownTrial {
                key: key.to_string(),
                trial,
            })?;
        *slot = start_secs;
        Ok(())
    }
    pub fn get(&self, key: &TrialKey, trial: usize) -> Option<f64> {
        self.starts.get(key).and_then(|s| s.get(trial)).copied()
    }
    pub fn trials(&self, key: &TrialKey) -> Option<&[f64]> {
        self.starts.get(key).map(Vec::as_slice)
    }
    fn slots_mut(&mut self, key: &TrialKey) -> Result<&mut Vec<f64>, DatasetError> {
        if !self.starts.keys().any(|k| k.subject == key.subject) {
            return Err(DatasetError::UnknownSubject(key.subject.clone()));
        }
        self.starts
            .get_mut(key)
            .ok_or_else(|| DatasetError::UnknownSessionDay {
                subject: key.subject.clone(),
                session_day: key.session_day(),
            })
    }
}
