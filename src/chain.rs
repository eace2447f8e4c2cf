use crate::action::{fingerprint, ActionToken};
use serde::{Deserialize, Serialize};

/// One dictated phrase and the actions it executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub phrase: String,
    pub actions: Vec<ActionToken>,
}

impl Utterance {
    pub fn new(phrase: &str, actions: Vec<ActionToken>) -> Self {
        Self { phrase: phrase.to_string(), actions }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Utterance(Utterance),
    /// A new capture session begins here; windows never span it.
    RecordingStart,
}

impl LogEntry {
    pub fn as_utterance(&self) -> Option<&Utterance> {
        match self {
            LogEntry::Utterance(u) => Some(u),
            LogEntry::RecordingStart => None,
        }
    }
}

impl From<Utterance> for LogEntry {
    fn from(u: Utterance) -> Self {
        LogEntry::Utterance(u)
    }
}

/// A contiguous window of utterances treated as one candidate command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceChain {
    /// Space-joined dictated words, or a template name for abstract chains
    pub name: String,
    pub actions: Vec<ActionToken>,
    pub start_index: usize,
    /// Last log position folded into the chain
    pub end_index: usize,
}

impl UtteranceChain {
    pub fn new(name: &str, actions: Vec<ActionToken>, start_index: usize, end_index: usize) -> Self {
        Self { name: name.to_string(), actions, start_index, end_index }
    }

    pub fn starting_at(start_index: usize) -> Self {
        Self { name: String::new(), actions: Vec::new(), start_index, end_index: start_index }
    }

    pub fn append(&mut self, utterance: &Utterance, index: usize) {
        if !self.name.is_empty() {
            self.name.push(' ');
        }
        self.name.push_str(&utterance.phrase);
        self.actions.extend(utterance.actions.iter().cloned());
        self.end_index = index;
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.name.is_empty()
    }

    pub fn words(&self) -> Vec<&str> {
        self.name.split(' ').collect()
    }

    pub fn word_count(&self) -> usize {
        self.name.split(' ').count()
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.actions)
    }

    /// Same name and log span, different action list.
    pub fn with_actions(&self, actions: Vec<ActionToken>) -> Self {
        Self { name: self.name.clone(), actions, start_index: self.start_index, end_index: self.end_index }
    }

    pub fn with_name_and_actions(&self, name: String, actions: Vec<ActionToken>) -> Self {
        Self { name, actions, start_index: self.start_index, end_index: self.end_index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_joins_phrases_and_tracks_end() {
        let mut chain = UtteranceChain::starting_at(3);
        assert!(chain.is_empty());
        chain.append(&Utterance::new("copy all", vec![ActionToken::new("key", vec!["ctrl-a".into()])]), 3);
        chain.append(&Utterance::new("air", vec![ActionToken::new("key", vec!["a".into()])]), 4);
        assert_eq!(chain.name, "copy all air");
        assert_eq!(chain.word_count(), 3);
        assert_eq!(chain.actions.len(), 2);
        assert_eq!(chain.start_index, 3);
        assert_eq!(chain.end_index, 4);
    }
}
