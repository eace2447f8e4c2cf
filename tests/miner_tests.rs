use chainscope::action::{fingerprint, ActionToken};
use chainscope::chain::{LogEntry, Utterance};
use chainscope::config::MiningConfig;
use chainscope::miner::{mine, recommend};

fn key(k: &str) -> ActionToken {
    ActionToken::new("key", vec![k.into()])
}

fn rain() -> LogEntry {
    Utterance::new("rain", vec![key("down")]).into()
}

fn copy_all() -> LogEntry {
    Utterance::new("copy all", vec![key("ctrl-a"), key("ctrl-c")]).into()
}

fn air() -> LogEntry {
    Utterance::new("air", vec![key("a")]).into()
}

fn config(max_chain_length: usize) -> MiningConfig {
    MiningConfig::default().with_max_chain_length(max_chain_length)
}

#[test]
fn simple_log_yields_every_contiguous_window() {
    chainscope::logging::init_test();
    let log = vec![rain(), copy_all(), air()];
    let ledger = mine(&log, &config(100));

    let expected = [
        vec![key("down")],
        vec![key("ctrl-a"), key("ctrl-c")],
        vec![key("a")],
        vec![key("down"), key("ctrl-a"), key("ctrl-c")],
        vec![key("ctrl-a"), key("ctrl-c"), key("a")],
        vec![key("down"), key("ctrl-a"), key("ctrl-c"), key("a")],
    ];
    assert_eq!(ledger.len(), expected.len());
    for actions in &expected {
        let record = ledger.get(&fingerprint(actions)).expect("window recorded");
        assert_eq!(record.times_used, 1);
    }
    let whole = ledger.get(&fingerprint(&expected[5])).expect("whole log");
    assert_eq!(whole.sample_name, "rain copy all air");
    assert_eq!(whole.total_words_dictated, 4);
}

#[test]
fn recording_start_breaks_windows() {
    let log = vec![rain(), copy_all(), LogEntry::RecordingStart, air()];
    let ledger = mine(&log, &config(100));
    assert_eq!(ledger.len(), 4);
    assert!(ledger.get(&fingerprint(&[key("ctrl-a"), key("ctrl-c"), key("a")])).is_none());
    assert!(ledger.get(&fingerprint(&[key("down"), key("ctrl-a"), key("ctrl-c")])).is_some());
}

#[test]
fn max_chain_length_caps_window_size() {
    let log = vec![rain(), copy_all(), air()];
    let ledger = mine(&log, &config(1));
    assert_eq!(ledger.len(), 3);
    let ledger = mine(&log, &config(2));
    assert_eq!(ledger.len(), 5);
}

#[test]
fn each_log_position_counts_once() {
    let log = vec![air(), air(), air()];
    let ledger = mine(&log, &config(100));
    assert_eq!(ledger.get(&fingerprint(&[key("a")])).map(|r| r.times_used), Some(3));
    let twice = ledger.get(&fingerprint(&[key("a"), ActionToken::repeat(1)])).expect("pairs");
    assert_eq!(twice.times_used, 2);
    let thrice = ledger.get(&fingerprint(&[key("a"), ActionToken::repeat(2)])).expect("triple");
    assert_eq!(thrice.times_used, 1);
}

#[test]
fn empty_log_mines_nothing() {
    assert!(mine(&[], &MiningConfig::default()).is_empty());
    assert!(mine(&[LogEntry::RecordingStart], &MiningConfig::default()).is_empty());
}

#[test]
fn dictated_text_becomes_abstract_command() {
    let log: Vec<LogEntry> = ["alpha", "bravo", "charlie", "delta"]
        .iter()
        .flat_map(|word| {
            [
                Utterance::new(&format!("note {word} here"), vec![key("ctrl-n"), ActionToken::insert(word)]).into(),
                air(),
            ]
        })
        .collect();
    let recommended = recommend(&log, &config(1));
    let template = recommended
        .iter()
        .find(|r| r.is_abstract())
        .expect("abstract recommendation");
    assert_eq!(template.sample_name, "note <user.text> here");
    assert_eq!(template.times_used, 4);
    assert_eq!(template.instantiation_count(), Some(4));
    assert!(recommended.iter().all(|r| r.times_used > 1));
}
