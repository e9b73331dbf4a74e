//! Run report JSON generation.

use crate::domain::{MergeStats, REPORT_SCHEMA_VERSION};
use crate::merge::Merger;
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn write_report(
    report_path: &Path,
    merger: &Merger,
    stats: &MergeStats,
    include_timestamp: bool,
) -> Result<()> {
    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("root".to_string(), json!(merger.root_dir().display().to_string()));
    report.insert("output".to_string(), json!(merger.output_path().display().to_string()));
    report.insert("encoding".to_string(), json!(merger.fallback_encoding().name()));
    report.insert("decode_errors".to_string(), serde_json::to_value(merger.decode_error_mode())?);
    report.insert("stats".to_string(), serde_json::to_value(stats)?);
    report.insert("files".to_string(), serde_json::to_value(&stats.files)?);

    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)?;
    Ok(())
}
