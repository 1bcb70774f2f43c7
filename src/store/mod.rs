//! Date-partitioned JSON file store
//!
//! Raw upstream payloads are written verbatim (pretty-printed) under
//! `<root>/<YYYY>/<MM>/<DD>.json`, with yearly history under
//! `<root>/yearly/<YYYY>.json` and the date index at
//! `<root>/available-dates.json`. Re-writing the same path for the same
//! date is safe and expected on re-runs.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Intraday series payload path for a date
    pub fn daily_path(&self, date: NaiveDate) -> PathBuf {
        self.partition_dir(date).join(format!("{:02}.json", date.day()))
    }

    /// Latest-snapshot payload path for a date
    pub fn latest_path(&self, date: NaiveDate) -> PathBuf {
        self.partition_dir(date)
            .join(format!("{:02}-latest.json", date.day()))
    }

    /// Full-year history payload path
    pub fn yearly_path(&self, year: i32) -> PathBuf {
        self.root.join("yearly").join(format!("{:04}.json", year))
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join("available-dates.json")
    }

    fn partition_dir(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
    }

    /// Write a raw payload to a path, creating parent directories as needed.
    pub fn write_json(&self, path: &Path, payload: &Value) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(payload).context("Failed to serialize payload")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write payload: {}", path.display()))?;

        info!("Written: {}", path.display());
        Ok(())
    }

    /// Load the date index, empty if the file does not exist yet.
    pub fn load_index(&self) -> Result<Vec<String>> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read date index: {}", path.display()))?;
        let mut index: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse date index: {}", path.display()))?;

        // normalize whatever was persisted: sorted ascending, deduplicated
        index.sort();
        index.dedup();
        Ok(index)
    }

    pub fn save_index(&self, index: &[String]) -> Result<()> {
        let path = self.index_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(index).context("Failed to serialize date index")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write date index: {}", path.display()))?;

        info!("Written: {}", path.display());
        Ok(())
    }
}
