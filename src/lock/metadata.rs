//! Lock holder metadata.
//!
//! A small JSON record written inside the marker directory by the process
//! that won the lock. It exists purely for diagnostics: when an acquire times
//! out, the error message can say who holds the lock and for how long.

use crate::error::{Result, SkinError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the holder record inside the marker directory.
pub const HOLDER_FILE: &str = "holder.json";

/// Metadata describing the current lock holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when the lock was taken (RFC3339).
    pub created_at: DateTime<Utc>,
}

impl LockMetadata {
    /// Create holder metadata for the current process.
    pub fn new() -> Self {
        Self {
            owner: owner_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
        }
    }

    /// Read the holder record from a marker directory.
    pub fn from_marker<P: AsRef<Path>>(marker_dir: P) -> Result<Self> {
        let path = marker_dir.as_ref().join(HOLDER_FILE);

        let content = fs::read_to_string(&path).map_err(|e| {
            SkinError::Metadata(format!(
                "failed to read holder record '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SkinError::Metadata(format!(
                "failed to parse holder record '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the holder record into a marker directory.
    pub fn write_to<P: AsRef<Path>>(&self, marker_dir: P) -> Result<()> {
        let path = marker_dir.as_ref().join(HOLDER_FILE);

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SkinError::Metadata(format!("failed to serialize holder record: {}", e))
        })?;

        fs::write(&path, json).map_err(|e| {
            SkinError::Metadata(format!(
                "failed to write holder record '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Remove the holder record from a marker directory, ignoring absence.
    ///
    /// Best effort: the marker directory itself is the lock, not this file.
    pub(super) fn remove_from(marker_dir: &Path) {
        let _ = fs::remove_file(marker_dir.join(HOLDER_FILE));
    }

    /// How long the lock has been held.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the holder's age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds();
        let minutes = age.num_minutes();
        let hours = age.num_hours();

        if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", seconds.max(0))
        }
    }
}

impl Default for LockMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner string for holder records.
pub(crate) fn owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
