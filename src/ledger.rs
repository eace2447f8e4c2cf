//! Per-fingerprint usage statistics gathered over one mining run.
//!
//! A physical usage shows up in every sliding window that contains it. A
//! record only counts a chain whose end index lies strictly past the last
//! one it counted, so each log position is counted at most once per
//! fingerprint.

use crate::action::ActionToken;
use crate::chain::UtteranceChain;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum UsageKind {
    Concrete,
    /// Fingerprints of the concrete chains that instantiated the template
    Abstract { instantiations: AHashSet<String> },
}

#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub fingerprint: String,
    pub actions: Vec<ActionToken>,
    /// Name of the chain that first produced this record
    pub sample_name: String,
    pub times_used: usize,
    pub total_words_dictated: usize,
    /// `Some` exactly when `times_used > 0`
    pub last_counted_end_index: Option<usize>,
    pub kind: UsageKind,
}

impl UsageRecord {
    fn new(fingerprint: String, chain: &UtteranceChain, kind: UsageKind) -> Self {
        Self {
            fingerprint,
            actions: chain.actions.clone(),
            sample_name: chain.name.clone(),
            times_used: 0,
            total_words_dictated: 0,
            last_counted_end_index: None,
            kind,
        }
    }

    pub fn concrete(chain: &UtteranceChain) -> Self {
        Self::new(chain.fingerprint(), chain, UsageKind::Concrete)
    }

    pub fn abstract_from(chain: &UtteranceChain) -> Self {
        Self::new(chain.fingerprint(), chain, UsageKind::Abstract { instantiations: AHashSet::new() })
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, UsageKind::Abstract { .. })
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// `None` until the record has been counted at least once.
    pub fn average_words_dictated(&self) -> Option<f64> {
        if self.times_used == 0 {
            return None;
        }
        Some(self.total_words_dictated as f64 / self.times_used as f64)
    }

    /// Distinct concrete instantiations; `None` for concrete records.
    pub fn instantiation_count(&self) -> Option<usize> {
        match &self.kind {
            UsageKind::Concrete => None,
            UsageKind::Abstract { instantiations } => Some(instantiations.len()),
        }
    }

    pub fn should_count(&self, end_index: usize) -> bool {
        self.last_counted_end_index.map_or(true, |last| end_index > last)
    }

    fn count(&mut self, chain: &UtteranceChain) {
        self.times_used += 1;
        self.last_counted_end_index = Some(chain.end_index);
        self.total_words_dictated += chain.word_count();
    }

    /// Counts a concrete usage. Returns whether the counters moved.
    pub fn record_concrete(&mut self, chain: &UtteranceChain) -> bool {
        if !self.should_count(chain.end_index) {
            return false;
        }
        self.count(chain);
        true
    }

    /// Counts an abstract usage instantiated by the concrete chain with
    /// fingerprint `instantiation`.
    pub fn record_abstract(&mut self, chain: &UtteranceChain, instantiation: String) -> bool {
        if !self.should_count(chain.end_index) {
            return false;
        }
        if let UsageKind::Abstract { instantiations } = &mut self.kind {
            instantiations.insert(instantiation);
        }
        self.count(chain);
        true
    }
}

/// Thresholds of the recommendation predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Average words dictated must be at least this
    pub min_average_words: f64,
    /// Times used must exceed this
    pub times_used_above: usize,
    /// Abstract records need more instantiations than this
    pub abstract_instantiations_above: usize,
    /// and an average word count above this
    pub abstract_average_words_above: f64,
    /// Actions per word must stay below this unless the command is used
    /// often enough to outweigh its length
    pub max_actions_per_word: f64,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            min_average_words: 2.0,
            times_used_above: 1,
            abstract_instantiations_above: 2,
            abstract_average_words_above: 2.0,
            max_actions_per_word: 2.0,
        }
    }
}

impl RecommendationPolicy {
    pub fn accepts(&self, record: &UsageRecord) -> bool {
        let Some(average_words) = record.average_words_dictated() else {
            return false;
        };
        if average_words < self.min_average_words || record.times_used <= self.times_used_above {
            return false;
        }
        if let Some(instantiations) = record.instantiation_count() {
            if instantiations <= self.abstract_instantiations_above || average_words <= self.abstract_average_words_above {
                return false;
            }
        }
        let actions = record.action_count() as f64;
        actions / average_words < self.max_actions_per_word
            || actions * (record.times_used as f64).sqrt() > average_words
    }
}

#[derive(Debug, Default)]
pub struct UsageLedger {
    records: AHashMap<String, UsageRecord>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, fingerprint: &str) -> Option<&UsageRecord> {
        self.records.get(fingerprint)
    }

    pub fn records(&self) -> impl Iterator<Item = &UsageRecord> {
        self.records.values()
    }

    pub fn record_concrete(&mut self, chain: &UtteranceChain) -> bool {
        let fingerprint = chain.fingerprint();
        self.records
            .entry(fingerprint)
            .or_insert_with(|| UsageRecord::concrete(chain))
            .record_concrete(chain)
    }

    pub fn record_abstract(&mut self, abstract_chain: &UtteranceChain, instantiation: &UtteranceChain) -> bool {
        let fingerprint = abstract_chain.fingerprint();
        self.records
            .entry(fingerprint)
            .or_insert_with(|| UsageRecord::abstract_from(abstract_chain))
            .record_abstract(abstract_chain, instantiation.fingerprint())
    }

    /// Records satisfying `predicate`, in no particular order.
    pub fn select<P>(&self, predicate: P) -> Vec<&UsageRecord>
    where
        P: Fn(&UsageRecord) -> bool,
    {
        self.records.values().filter(|r| predicate(r)).collect()
    }

    /// Accepted records, most used first; ties ordered by fingerprint.
    pub fn recommendations(&self, policy: &RecommendationPolicy) -> Vec<&UsageRecord> {
        let mut accepted = self.select(|r| policy.accepts(r));
        accepted.sort_by(|a, b| b.times_used.cmp(&a.times_used).then_with(|| a.fingerprint.cmp(&b.fingerprint)));
        accepted
    }
}
