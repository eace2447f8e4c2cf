//! Derives parameterized ("abstract") commands from a canonical chain.
//!
//! Two generalizations exist: every `repeat` count becomes a number capture,
//! and a phrase the user dictated that also appears inside inserted text
//! becomes a free-form text capture replayed with its original case and
//! separator. Candidates from different inserts of one chain are produced
//! independently and never combined.

use crate::action::{ActionToken, Capture, FORMATTED_INSERT_ACTION, REPEAT_ACTION};
use crate::chain::UtteranceChain;
use crate::phrase::{match_prose, ProseMatch};
use crate::separation::TextDecomposition;
use tracing::trace;

pub const DEFAULT_MAX_PROSE_SIZE: usize = 10;

pub fn should_generalize_repeats(chain: &UtteranceChain) -> bool {
    chain.actions.len() > 2 && chain.actions.iter().any(ActionToken::is_repeat)
}

/// Replaces every repeat count with its own number capture and appends one
/// placeholder per capture to the chain's name.
pub fn generalize_repeats(chain: &UtteranceChain) -> Option<UtteranceChain> {
    if !should_generalize_repeats(chain) {
        return None;
    }
    let mut name = chain.name.clone();
    let mut instance = 0;
    let mut actions = Vec::with_capacity(chain.actions.len());
    for action in &chain.actions {
        if action.is_repeat() {
            instance += 1;
            let capture = Capture::repeat_count(instance);
            name.push(' ');
            name.push_str(&capture.placeholder());
            actions.push(ActionToken::new(REPEAT_ACTION, vec![capture.into()]));
        } else {
            actions.push(action.clone());
        }
    }
    Some(chain.with_name_and_actions(name, actions))
}

/// Position and text of an `insert` action in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertSite<'a> {
    pub index: usize,
    pub text: &'a str,
}

pub fn insert_sites(chain: &UtteranceChain) -> Vec<InsertSite<'_>> {
    chain
        .actions
        .iter()
        .enumerate()
        .filter_map(|(index, action)| action.inserted_text().map(|text| InsertSite { index, text }))
        .collect()
}

/// A dictated phrase found inside one insert, with the chain name it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseCandidate {
    pub name: String,
    pub prose: ProseMatch,
}

pub fn template_name(words: &[&str], start: usize, size: usize) -> String {
    let placeholder = Capture::prose().placeholder();
    words[..start]
        .iter()
        .copied()
        .chain(std::iter::once(placeholder.as_str()))
        .chain(words[start + size..].iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// For every starting word, grows the phrase one word at a time and stops at
/// the first length that is not usable.
pub fn prose_candidates(words: &[&str], text: &str, max_prose_size: usize) -> Vec<ProseCandidate> {
    let decomposition = TextDecomposition::new(text);
    let mut candidates = Vec::new();
    for start in 0..words.len() {
        let limit = max_prose_size.min(words.len() - start + 1);
        for size in 1..limit {
            let phrase = words[start..start + size].join(" ");
            match match_prose(&decomposition, &phrase) {
                Ok(prose) => candidates.push(ProseCandidate { name: template_name(words, start, size), prose }),
                Err(rejection) => {
                    trace!(%phrase, %rejection, "phrase rejected");
                    break;
                }
            }
        }
    }
    candidates
}

/// Splices the captured prose into the chain in place of the insert at
/// `site_index`. `None` when nothing but the capture would remain.
pub fn splice_prose(chain: &UtteranceChain, site_index: usize, candidate: &ProseCandidate) -> Option<UtteranceChain> {
    let prose = &candidate.prose;
    let mut actions = Vec::with_capacity(chain.actions.len() + 2);
    actions.extend_from_slice(&chain.actions[..site_index]);
    if !prose.text_before.is_empty() {
        actions.push(ActionToken::insert(&prose.text_before));
    }
    actions.push(ActionToken::new(
        FORMATTED_INSERT_ACTION,
        vec![
            Capture::prose().into(),
            prose.case_template.as_str().into(),
            prose.first_separator.as_str().into(),
        ],
    ));
    if !prose.text_after.is_empty() {
        actions.push(ActionToken::insert(&prose.text_after));
    }
    actions.extend_from_slice(&chain.actions[site_index + 1..]);
    if actions.len() <= 1 {
        return None;
    }
    Some(chain.with_name_and_actions(candidate.name.clone(), actions))
}

pub fn generalize_prose(chain: &UtteranceChain, max_prose_size: usize) -> Vec<UtteranceChain> {
    let words = chain.words();
    let mut out = Vec::new();
    for site in insert_sites(chain) {
        for candidate in prose_candidates(&words, site.text, max_prose_size) {
            if let Some(abstracted) = splice_prose(chain, site.index, &candidate) {
                out.push(abstracted);
            }
        }
    }
    out
}

/// All abstract chains for a canonical chain: the repeat generalization
/// first, then prose generalizations in insert order.
pub fn abstractions(chain: &UtteranceChain, max_prose_size: usize) -> Vec<UtteranceChain> {
    let mut out: Vec<UtteranceChain> = generalize_repeats(chain).into_iter().collect();
    out.extend(generalize_prose(chain, max_prose_size));
    out
}
