//! Result export: one file per checked claim, JSON or CSV.

use anyhow::Context;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use verity_config::ExportFormat;
use verity_types::FactCheckResult;

const MAX_CLAIM_CHARS_IN_NAME: usize = 50;

/// Write `result` under `dir` as `fact_check_<timestamp>_<claim>.<ext>` and
/// return the path written. The directory is created when missing.
pub fn export_result(
    dir: &Path,
    format: ExportFormat,
    result: &FactCheckResult,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Csv => "csv",
    };
    let path = dir.join(format!(
        "fact_check_{}_{}.{extension}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        sanitize(result.claim.as_str())
    ));

    match format {
        ExportFormat::Json => {
            let body = serde_json::to_string_pretty(result).context("serializing result")?;
            fs::write(&path, body)
                .with_context(|| format!("writing export to {}", path.display()))?;
        }
        ExportFormat::Csv => write_csv(&path, result)?,
    }
    tracing::info!(path = %path.display(), "result exported");
    Ok(path)
}

fn write_csv(path: &Path, result: &FactCheckResult) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("writing export to {}", path.display()))?;
    writer.write_record([
        "claim",
        "verdict",
        "confidence",
        "explanation",
        "evidence",
        "sources",
        "checked_at",
    ])?;

    let evidence = result
        .evidence
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    let sources = result
        .sources
        .iter()
        .map(|a| format!("{} ({})", a.title, a.url))
        .collect::<Vec<_>>()
        .join(" | ");
    writer.write_record([
        result.claim.as_str(),
        result.verdict.as_str(),
        &result.confidence.map(|c| c.to_string()).unwrap_or_default(),
        result.explanation.as_deref().unwrap_or(""),
        &evidence,
        &sources,
        &result.checked_at.to_rfc3339(),
    ])?;
    writer.flush()?;
    Ok(())
}

/// Filesystem-safe rendering of a claim: alphanumerics kept, everything else
/// collapsed to underscores, capped in length.
fn sanitize(claim: &str) -> String {
    let mut name = String::new();
    let mut last_was_underscore = false;
    for c in claim.chars().take(MAX_CLAIM_CHARS_IN_NAME) {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            name.push('_');
            last_was_underscore = true;
        }
    }
    name.trim_matches('_').to_owned()
}
