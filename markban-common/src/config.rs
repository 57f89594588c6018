//! Restructure configuration
//!
//! All tunables of the migration engine (capacity limit, reserved ids,
//! root scope, source declarations) live in one explicit value handed to
//! the orchestrator at construction, so the engine is parameterizable in
//! tests with alternate limits and roots.
//!
//! Configuration file resolution follows the priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MARKBAN_CONFIG` environment variable
//! 3. Built-in defaults (no file)

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Where a source's collected entries are bound for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Merged into the ranked pool and split by the WIP limit
    Ranked,
    /// Bypasses ranking; moved to the completed folder in collected order
    Completed,
}

/// One declared source folder to migrate from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    /// Short name used in progress output
    pub name: String,
    /// Folder titles from the root scope down, e.g. ["toolbar", "Learn", "Platzi"]
    pub path: Vec<String>,
    /// Descend through nested subfolders when collecting
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_disposition")]
    pub disposition: Disposition,
}

fn default_disposition() -> Disposition {
    Disposition::Ranked
}

/// Full engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RestructureConfig {
    /// Path to the places database working copy
    pub db_path: PathBuf,
    /// Scope every source path is resolved under (the places root)
    pub root_id: i64,
    /// Trunk container the status folders are provisioned in (toolbar)
    pub trunk_id: i64,
    /// System rows that must never be moved or repositioned
    pub reserved_ids: BTreeSet<i64>,
    /// Maximum number of entries allowed in the active folder
    pub wip_limit: usize,
    /// Status folder titles, provisioned in this declared order
    pub active_folder: String,
    pub queued_folder: String,
    pub completed_folder: String,
    /// Source folders to migrate from
    pub sources: Vec<SourceSpec>,
}

impl Default for RestructureConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("/tmp/places_copy.sqlite"),
            root_id: 1,
            trunk_id: 3,
            reserved_ids: (1..=6).collect(),
            wip_limit: 3,
            active_folder: "01_IN_PROGRESS".to_string(),
            queued_folder: "02_PLANNING".to_string(),
            completed_folder: "03_ARCHIVE".to_string(),
            sources: vec![
                SourceSpec {
                    name: "coursera_in_progress".to_string(),
                    path: segments(&["toolbar", "Learn", "Coursera", "In progress"]),
                    recursive: false,
                    disposition: Disposition::Ranked,
                },
                SourceSpec {
                    name: "coursera_planning".to_string(),
                    path: segments(&["toolbar", "Learn", "Coursera", "Planning"]),
                    recursive: false,
                    disposition: Disposition::Ranked,
                },
                SourceSpec {
                    name: "coursera_completed".to_string(),
                    path: segments(&["toolbar", "Learn", "Coursera", "Completed"]),
                    recursive: false,
                    disposition: Disposition::Completed,
                },
                SourceSpec {
                    name: "platzi".to_string(),
                    path: segments(&["toolbar", "Learn", "Platzi"]),
                    recursive: true,
                    disposition: Disposition::Ranked,
                },
                SourceSpec {
                    name: "cisco".to_string(),
                    path: segments(&["toolbar", "Learn", "CISCO"]),
                    recursive: true,
                    disposition: Disposition::Ranked,
                },
            ],
        }
    }
}

fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Load configuration with the priority order documented at module level
pub fn load_config(cli_arg: Option<&Path>) -> Result<RestructureConfig> {
    // Priority 1: command-line argument
    // Priority 2: MARKBAN_CONFIG environment variable
    let path = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("MARKBAN_CONFIG").ok().map(PathBuf::from));

    // Priority 3: built-in defaults
    let Some(path) = path else {
        return Ok(RestructureConfig::default());
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}
