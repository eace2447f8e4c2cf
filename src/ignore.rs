//! Action sequences the user never wants recommended.
//!
//! The file holds one JSON-encoded action per line; a blank line ends a
//! sequence. Utterances whose full action sequence is listed are dropped
//! from the log before mining.

use crate::action::{fingerprint, ActionToken};
use crate::chain::LogEntry;
use crate::error::{Error, Result};
use ahash::AHashSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    fingerprints: AHashSet<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, actions: &[ActionToken]) {
        self.fingerprints.insert(fingerprint(actions));
    }

    pub fn contains(&self, actions: &[ActionToken]) -> bool {
        self.fingerprints.contains(&fingerprint(actions))
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut list = IgnoreList::new();
        let mut current: Vec<ActionToken> = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    list.insert(&current);
                    current.clear();
                }
                continue;
            }
            let action = serde_json::from_str(line).map_err(|e| Error::Parse { line: i + 1, message: e.to_string() })?;
            current.push(action);
        }
        if !current.is_empty() {
            list.insert(&current);
        }
        Ok(list)
    }

    /// A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "ignore list not found, nothing ignored");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Drops ignored utterances; recording-start markers always stay.
    pub fn filter(&self, log: Vec<LogEntry>) -> Vec<LogEntry> {
        if self.is_empty() {
            return log;
        }
        log.into_iter()
            .filter(|entry| entry.as_utterance().map_or(true, |u| !self.contains(&u.actions)))
            .collect()
    }
}
