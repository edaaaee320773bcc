//! Activity history kept across invocations
//!
//! The engine keeps activity in memory for one session. The CLI appends each
//! session's entries to `activity.jsonl` next to the stored board, one JSON
//! object per line, oldest first. Only the newest `max_entries` lines are kept.

use anyhow::{Context, Result};
use laneboard::{LogEntry, DEFAULT_MAX_ACTIVITY_ENTRIES};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

const ACTIVITY_FILE_NAME: &str = "activity.jsonl";

pub struct ActivityFile {
    path: PathBuf,
    max_entries: usize,
}

impl ActivityFile {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(ACTIVITY_FILE_NAME),
            max_entries: DEFAULT_MAX_ACTIVITY_ENTRIES,
        }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Append entries given newest first, as `BoardContext::read_activity` returns them
    pub fn append(&self, newest_first: &[&LogEntry]) -> Result<()> {
        if newest_first.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        for entry in newest_first.iter().rev() {
            writeln!(file, "{}", serde_json::to_string(entry)?)?;
        }
        drop(file);
        self.truncate_to_cap()
    }

    /// Drop the oldest lines once the file holds more than `max_entries`
    fn truncate_to_cap(&self) -> Result<()> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() <= self.max_entries {
            return Ok(());
        }

        let mut kept = lines[lines.len() - self.max_entries..].join("\n");
        if !kept.is_empty() {
            kept.push('\n');
        }
        let temp = self.path.with_extension("jsonl.tmp");
        fs::write(&temp, kept).with_context(|| format!("writing {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    /// The most recent `limit` entries, newest first. Unreadable lines are skipped.
    pub fn read(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", self.path.display())),
        };

        let entries = content
            .lines()
            .rev()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!(%error, "skipping unreadable activity line");
                    None
                }
            })
            .take(limit)
            .collect();
        Ok(entries)
    }
}
