use crate::error::{Error, Result};
use crate::ledger::UsageRecord;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const OUTPUT_FILENAME_PREFIX: &str = "recommendations ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Config(format!("unknown report format: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOut {
    pub sample_name: String,
    pub times_used: usize,
    pub average_words_dictated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiations: Option<usize>,
    pub is_abstract: bool,
    pub actions: Vec<String>,
}

impl From<&UsageRecord> for RecommendationOut {
    fn from(record: &UsageRecord) -> Self {
        Self {
            sample_name: record.sample_name.clone(),
            times_used: record.times_used,
            average_words_dictated: record.average_words_dictated(),
            instantiations: record.instantiation_count(),
            is_abstract: record.is_abstract(),
            actions: record.actions.iter().map(|a| a.to_script()).collect(),
        }
    }
}

pub fn render_text(records: &[UsageRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "#Number of times used: {}", record.times_used);
        if let Some(instantiations) = record.instantiation_count() {
            let _ = writeln!(out, "#Number of instantiations of abstract command: {instantiations}");
        }
        for action in &record.actions {
            let _ = writeln!(out, "\t{}", action.to_script());
        }
        out.push_str("\n\n");
    }
    out
}

pub fn render_json(records: &[UsageRecord]) -> Result<String> {
    let out: Vec<RecommendationOut> = records.iter().map(RecommendationOut::from).collect();
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn render(records: &[UsageRecord], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(records)),
        ReportFormat::Json => render_json(records),
    }
}

/// `recommendations 2024-05-01 13-45-10,123456.txt`; no `:` or `.` in the stamp.
pub fn output_filename(now: DateTime<Local>, format: ReportFormat) -> String {
    format!(
        "{}{}.{}",
        OUTPUT_FILENAME_PREFIX,
        now.format("%Y-%m-%d %H-%M-%S,%6f"),
        format.extension()
    )
}

/// Writes a timestamped report into `directory`, creating it if needed.
pub fn write_report(directory: &Path, records: &[UsageRecord], format: ReportFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(output_filename(Local::now(), format));
    std::fs::write(&path, render(records, format)?)?;
    Ok(path)
}
