use crate::action::ActionToken;
use crate::chain::UtteranceChain;
use itertools::Itertools;

/// Merges runs of consecutive `insert` actions into one insert of the
/// concatenated text. Empty inserts vanish.
pub fn collapse_inserts(actions: &[ActionToken]) -> Vec<ActionToken> {
    let mut out = Vec::with_capacity(actions.len());
    let mut pending = String::new();
    for action in actions {
        match action.inserted_text() {
            Some(text) => pending.push_str(text),
            None => {
                if !pending.is_empty() {
                    out.push(ActionToken::insert(&pending));
                    pending.clear();
                }
                out.push(action.clone());
            }
        }
    }
    if !pending.is_empty() {
        out.push(ActionToken::insert(&pending));
    }
    out
}

/// Replaces each run of 2+ structurally equal actions with the action
/// followed by `repeat(run length - 1)`. Literal repeats that end up next to
/// each other are summed into one, so the result is stable under another pass.
pub fn collapse_repeats(actions: &[ActionToken]) -> Vec<ActionToken> {
    let mut out: Vec<ActionToken> = Vec::with_capacity(actions.len());
    for (count, action) in actions.iter().dedup_with_count() {
        match action.literal_repeat() {
            Some(extra) => push_repeat(&mut out, extra.saturating_mul(count as i64)),
            None => {
                out.push(action.clone());
                if count > 1 {
                    push_repeat(&mut out, count as i64 - 1);
                }
            }
        }
    }
    out
}

fn push_repeat(out: &mut Vec<ActionToken>, extra: i64) {
    if let Some(last) = out.last_mut() {
        if let Some(previous) = last.literal_repeat() {
            *last = ActionToken::repeat(previous.saturating_add(extra));
            return;
        }
    }
    out.push(ActionToken::repeat(extra));
}

/// Insert collapse first, then repeat collapse. Name and log span are kept.
pub fn canonicalize(chain: &UtteranceChain) -> UtteranceChain {
    let merged = collapse_inserts(&chain.actions);
    chain.with_actions(collapse_repeats(&merged))
}
