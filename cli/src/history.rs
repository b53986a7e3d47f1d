//! Past-result persistence: a JSON file capped at a configured size.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use verity_types::FactCheckResult;

/// Append-only result history backed by one JSON file.
///
/// A missing or corrupt file is treated as an empty history, so a damaged
/// file costs past entries but never blocks new checks.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    max_entries: usize,
}

impl History {
    #[must_use]
    pub fn new(path: PathBuf, max_entries: usize) -> Self {
        Self { path, max_entries }
    }

    /// Append one result, dropping the oldest entries beyond the cap.
    pub fn record(&self, result: &FactCheckResult) -> anyhow::Result<()> {
        let mut entries = self.load();
        entries.push(result.clone());
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating history directory {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&entries).context("serializing history")?;
        fs::write(&self.path, body)
            .with_context(|| format!("writing history to {}", self.path.display()))?;
        Ok(())
    }

    /// All stored entries, oldest first.
    #[must_use]
    pub fn load(&self) -> Vec<FactCheckResult> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "history file unreadable, starting fresh");
                Vec::new()
            }
        }
    }
}
