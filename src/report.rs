use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::{PersonaRecord, Trait, TraitValue};
use crate::error::Result;

const RULE: &str = "-----------------------------------";

/// Output format for the persona report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    persona: &'a PersonaRecord,
    generated_at: DateTime<Utc>,
}

pub fn render(record: &PersonaRecord, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(record)),
        ReportFormat::Json => render_json(record, Utc::now()),
    }
}

/// Human-readable report. Absent traits and empty lists produce no line.
pub fn render_text(record: &PersonaRecord) -> String {
    let mut lines = vec![
        format!("User Persona for u/{}", record.username),
        RULE.to_string(),
    ];

    let traits = [
        (Trait::Age, &record.age),
        (Trait::Location, &record.location),
        (Trait::Occupation, &record.occupation),
    ];
    for (kind, value) in traits {
        if let Some(TraitValue { value, source_reference }) = value {
            lines.push(format!("{}: {} (source: {})", kind.label(), value, source_reference));
        }
    }

    if !record.communities.is_empty() {
        lines.push(format!("Frequent Subreddits: {}", record.communities.join(", ")));
    }
    if !record.interests.is_empty() {
        lines.push(format!("Key Topics: {}", record.interests.join(", ")));
    }

    lines.join("\n")
}

pub fn render_json(record: &PersonaRecord, generated_at: DateTime<Utc>) -> Result<String> {
    let report = JsonReport {
        persona: record,
        generated_at,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn default_output_path(username: &str, format: ReportFormat) -> PathBuf {
    PathBuf::from(format!("persona_{}.{}", username, format.extension()))
}

pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
