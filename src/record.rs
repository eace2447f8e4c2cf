//! Decodes the action log: one JSON object per line, either an utterance
//!
//! ```json
//! {"phrase": "copy all", "actions": [{"name": "key", "arguments": ["ctrl-a"]}, {"name": "key", "arguments": ["ctrl-c"]}]}
//! ```
//!
//! or a recording-start marker `{"recording_start": true}`. Other keys on a
//! line (timestamps and the like) are ignored; the engine only uses order.

use crate::chain::{LogEntry, Utterance};
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const MARKER_KEY: &str = "recording_start";

/// Blank lines decode to `None`.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<LogEntry>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parse_error = |message: String| Error::Parse { line: line_number, message };
    let value: Value = serde_json::from_str(trimmed).map_err(|e| parse_error(e.to_string()))?;
    let Value::Object(map) = &value else {
        return Err(parse_error("expected a JSON object".into()));
    };
    if let Some(marker) = map.get(MARKER_KEY) {
        return match marker {
            Value::Bool(true) => Ok(Some(LogEntry::RecordingStart)),
            other => Err(parse_error(format!("{MARKER_KEY} must be true, found {other}"))),
        };
    }
    let utterance: Utterance = serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
    Ok(Some(LogEntry::Utterance(utterance)))
}

/// Decodes lines in parallel; entries keep their line order.
pub fn parse_lines<S>(lines: &[S]) -> Result<Vec<LogEntry>>
where
    S: AsRef<str> + Sync,
{
    let parsed: Vec<Result<Option<LogEntry>>> = lines
        .par_iter()
        .enumerate()
        .map(|(i, line)| parse_line(line.as_ref(), i + 1))
        .collect();
    parsed.into_iter().filter_map(Result::transpose).collect()
}

pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<LogEntry>> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    parse_lines(&lines)
}

pub fn read_log(path: &Path) -> Result<Vec<LogEntry>> {
    read_entries(BufReader::new(File::open(path)?))
}
