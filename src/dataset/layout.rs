//! Recording folders on disk.
//!
//! Every trial folder is named `<prefix><subject><delim><session><delim><day>`, e.g.
//! `OpenBCISession_A01-S1-02`, and holds one export file per trial.
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::dataset::DatasetError;
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub prefix: String,
    pub delimiter: String,
}
impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            prefix: "OpenBCISession_".to_string(),
            delimiter: "-".to_string(),
        }
    }
}
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderInfo {
    pub subject: String,
    pub session: String,
    pub day: u32,
}
pub fn parse_folder_name(name: &str, options: &LayoutOptions) -> Result<FolderInfo, DatasetError> {
    let bad_name = || DatasetError::FolderName(name.to_string());
    let rest = name.strip_prefix(options.prefix.as_str()).unwrap_or(name);
    let parts: Vec<&str> = rest.split(options.delimiter.as_str()).collect();
    if parts.len() < 3 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(bad_name());
    }
    let day = parts[2].trim().parse::<u32>().map_err(|_| bad_name())?;
    Ok(FolderInfo {
        subject: parts[0].to_string(),
        session: parts[1].to_string(),
        day,
    })
}
/// Identifies the trials one subject recorded in one session on one day.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrialKey {
    pub subject: String,
    pub session: String,
    pub day: u32,
}
impl TrialKey {
    pub fn new(subject: &str, session: &str, day: u32) -> Self {
        Self {
            subject: subject.to_string(),
            session: session.to_string(),
            day,
        }
    }
    /// `S1-02` style label used in folder names.
    pub fn session_day(&self) -> String {
        format!("{}-{:02}", self.session, self.day)
    }
}
impl From<FolderInfo> for TrialKey {
    fn from(info: FolderInfo) -> Self {
        Self {
            subject: info.subject,
            session: info.session,
            day: info.day,
        }
    }
}
impl fmt::Display for TrialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.session_day())
    }
}
/// Trial files found under a recordings root.
#[derive(Clone, Debug, PartialEq)]
pub struct SubjectIndex {
    root: PathBuf,
    subjects: Vec<String>,
    sessions: Vec<String>,
    trials: BTreeMap<TrialKey, Vec<PathBuf>>, // paths relative to root
}
impl SubjectIndex {
    /// Lists every trial folder under `root`.
    ///
    /// Folders and files are visited in name order, so trial numbers are stable across
    /// machines. Empty folders still contribute their subject and session codes.
    pub fn scan<P: AsRef<Path>>(root: P, options: &LayoutOptions) -> Result<Self, DatasetError> {
        let root = root.as_ref().to_path_buf();
        let mut index = Self {
            root: root.clone(),
            subjects: Vec::new(),
            sessions: Vec::new(),
            trials: BTreeMap::new(),
        };
        for folder in sorted_entries(&root)? {
            let path = root.join(&folder);
            if !path.is_dir() {
                debug!("skipping non-directory {}", path.display());
                continue;
            }
            let info = parse_folder_name(&folder, options)?;
            if !index.subjects.contains(&info.subject) {
                index.subjects.push(info.subject.clone());
            }
            if !index.sessions.contains(&info.session) {
                index.sessions.push(info.session.clone());
            }
            let files = sorted_entries(&path)?;
            if files.is_empty() {
                debug!("{} holds no trials", path.display());
                continue;
            }
            let relative = files.into_iter().map(|file| Path::new(&folder).join(file));
            index.trials.entry(info.into()).or_default().extend(relative);
        }
        Ok(index)
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }
    pub fn sessions(&self) -> &[String] {
        &self.sessions
    }
    pub fn keys(&self) -> impl Iterator<Item = &TrialKey> {
        self.trials.keys()
    }
    pub fn trials(&self, key: &TrialKey) -> Option<&[PathBuf]> {
        self.trials.get(key).map(Vec::as_slice)
    }
    pub fn trial_count(&self) -> usize {
        self.trials.values().map(Vec::len).sum()
    }
    /// Full path of the `trial`-th file recorded under `key`.
    pub fn trial_path(&self, key: &TrialKey, trial: usize) -> Result<PathBuf, DatasetError> {
        let file = self
            .trials
            .get(key)
            .and_then(|files| files.get(trial))
            .ok_or_else(|| DatasetError::UnknownTrial {
                key: key.to_string(),
                trial,
            })?;
        Ok(self.root.join(file))
    }
}
fn sorted_entries(dir: &Path) -> Result<Vec<String>, DatasetError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
