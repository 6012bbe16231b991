//! Snapshot management for golden tests

use crate::{GoldenError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Snapshot format version written into new snapshots
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Recorded outcome of one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// `category/name` of the case
    pub name: String,

    pub metadata: SnapshotMetadata,

    /// `{"output": ..}`, `{"error": ..}` or `{}` when the mapping produced nothing
    pub content: Value,
}

/// Metadata about a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Version of the snapshot format
    pub version: String,

    /// RFC 3339 creation time
    pub created_at: String,

    /// RFC 3339 time of the last rewrite
    pub updated_at: String,

    pub description: Option<String>,
}

/// Manages reading and writing snapshots
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
}

impl SnapshotManager {
    /// Create a new snapshot manager
    pub fn new(snapshot_dir: impl AsRef<Path>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.as_ref().to_path_buf(),
        }
    }

    /// Load a snapshot from disk
    pub fn load(&self, name: &str) -> Result<Snapshot> {
        let path = self.snapshot_path(name);

        if !path.exists() {
            return Err(GoldenError::CorpusError(format!(
                "Snapshot '{}' not found at {:?}",
                name, path
            )));
        }

        let content = fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        Ok(snapshot)
    }

    /// Save a snapshot to disk
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.snapshot_path(&snapshot.name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = serde_json::to_string_pretty(snapshot)?;
        content.push('\n');
        fs::write(&path, content)?;

        Ok(())
    }

    /// Replace the content of an existing snapshot
    pub fn update(&self, name: &str, new_content: Value) -> Result<()> {
        let mut snapshot = self.load(name)?;

        snapshot.content = new_content;
        snapshot.metadata.updated_at = Utc::now().to_rfc3339();

        self.save(&snapshot)
    }

    /// Create a new snapshot
    pub fn create(&self, name: &str, content: Value, description: Option<String>) -> Result<Snapshot> {
        let now = Utc::now().to_rfc3339();

        let snapshot = Snapshot {
            name: name.to_string(),
            metadata: SnapshotMetadata {
                version: SNAPSHOT_VERSION.to_string(),
                created_at: now.clone(),
                updated_at: now,
                description,
            },
            content,
        };

        self.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Check if a snapshot exists
    pub fn exists(&self, name: &str) -> bool {
        self.snapshot_path(name).exists()
    }

    /// List all snapshot names, including category prefixes
    pub fn list(&self) -> Vec<String> {
        let mut snapshots: Vec<String> = WalkDir::new(&self.snapshot_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && e.path().extension().and_then(|s| s.to_str()) == Some("json"))
            .filter_map(|e| {
                let relative = e.path().strip_prefix(&self.snapshot_dir).ok()?.with_extension("");
                let parts: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                Some(parts.join("/"))
            })
            .collect();

        snapshots.sort();
        snapshots
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        let filename = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.json", name)
        };

        self.snapshot_dir.join(filename)
    }

    /// Copy a snapshot aside before it is rewritten
    pub fn backup(&self, name: &str) -> Result<()> {
        let source = self.snapshot_path(name);

        if !source.exists() {
            return Ok(());
        }

        let backup_path = source.with_extension(format!("json.backup.{}", Utc::now().timestamp()));
        fs::copy(source, backup_path)?;
        Ok(())
    }
}

/// Apply ignore fields to a JSON value
pub fn apply_ignores(value: &mut Value, ignore_fields: &[String]) {
    for field_path in ignore_fields {
        let parts: Vec<&str> = field_path.split('.').filter(|s| !s.is_empty()).collect();
        remove_field_recursive(value, &parts);
    }
}

fn remove_field_recursive(value: &mut Value, path_parts: &[&str]) {
    let Some((first, rest)) = path_parts.split_first() else {
        return;
    };

    match value {
        Value::Object(map) => {
            if rest.is_empty() {
                map.remove(*first);
            } else if let Some(next_value) = map.get_mut(*first) {
                remove_field_recursive(next_value, rest);
            }
        }
        // Applies to every element
        Value::Array(arr) => {
            for item in arr {
                remove_field_recursive(item, path_parts);
            }
        }
        _ => {}
    }
}
