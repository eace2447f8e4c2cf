use crate::abstraction::abstractions;
use crate::canonical::canonicalize;
use crate::chain::{LogEntry, UtteranceChain};
use crate::config::MiningConfig;
use crate::ledger::{UsageLedger, UsageRecord};
use tracing::{debug, info};

/// Records one canonical chain and every abstraction derived from it.
pub fn observe(chain: &UtteranceChain, max_prose_size: usize, ledger: &mut UsageLedger) {
    ledger.record_concrete(chain);
    for abstracted in abstractions(chain, max_prose_size) {
        ledger.record_abstract(&abstracted, chain);
    }
}

/// Grows a window from `start` one utterance at a time, up to
/// `max_chain_length` entries, stopping at a recording-start marker.
pub fn observe_windows_from(log: &[LogEntry], start: usize, config: &MiningConfig, ledger: &mut UsageLedger) {
    let mut chain = UtteranceChain::starting_at(start);
    let target = log.len().min(start.saturating_add(config.max_chain_length));
    for (index, entry) in log.iter().enumerate().take(target).skip(start) {
        let Some(utterance) = entry.as_utterance() else {
            break;
        };
        chain.append(utterance, index);
        observe(&canonicalize(&chain), config.max_prose_size_to_consider, ledger);
    }
}

pub fn mine(log: &[LogEntry], config: &MiningConfig) -> UsageLedger {
    let mut ledger = UsageLedger::new();
    for start in 0..log.len() {
        observe_windows_from(log, start, config, &mut ledger);
        debug!(start, total = log.len(), records = ledger.len(), "windows processed");
    }
    info!(entries = log.len(), records = ledger.len(), "mining complete");
    ledger
}

/// Mines the log and returns the accepted records, most used first.
pub fn recommend(log: &[LogEntry], config: &MiningConfig) -> Vec<UsageRecord> {
    let ledger = mine(log, config);
    let accepted: Vec<UsageRecord> = ledger.recommendations(&config.policy).into_iter().cloned().collect();
    info!(accepted = accepted.len(), considered = ledger.len(), "recommendations selected");
    accepted
}
