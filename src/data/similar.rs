//! Similar-muscles side table
//!
//! Loaded once at startup from a JSON object mapping muscle names to arrays of
//! related muscle names. A missing or malformed file is not fatal: the built-in
//! default table is used instead.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use super::catalog::normalize;

/// Default location of the similar-muscles file
pub const DEFAULT_SIMILAR_FILE: &str = "./similar_muscles.json";

/// Errors that can occur when loading the similar-muscles file
#[derive(Debug, Error)]
pub enum SimilarLoadError {
    /// File could not be read
    #[error("failed to read similar-muscles file: {0}")]
    Read(#[from] io::Error),

    /// File is not a JSON object of string arrays
    #[error("failed to parse similar-muscles file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only lookup from muscle name to related muscle names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarMuscles {
    table: HashMap<String, Vec<String>>,
}

impl Default for SimilarMuscles {
    /// Built-in table for a few common groups
    fn default() -> Self {
        let pairs: [(&str, [&str; 2]); 9] = [
            ("chest", ["triceps", "shoulders"]),
            ("back", ["biceps", "forearms"]),
            ("biceps", ["forearms", "back"]),
            ("triceps", ["chest", "shoulders"]),
            ("legs", ["glutes", "calves"]),
            ("shoulders", ["triceps", "chest"]),
            ("abs", ["obliques", "lower back"]),
            ("hamstrings", ["glutes", "lower back"]),
            ("quads", ["glutes", "hamstrings"]),
        ];

        let table = pairs
            .into_iter()
            .map(|(name, related)| {
                (
                    name.to_string(),
                    related.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect();

        Self { table }
    }
}

impl SimilarMuscles {
    /// Builds a table from an in-memory map; keys are normalized
    ///
    /// Keys that normalize to the same name are merged in sorted order of the
    /// raw keys, keeping the first occurrence of each related name.
    pub fn from_map(table: HashMap<String, Vec<String>>) -> Self {
        let mut raw: Vec<(String, Vec<String>)> = table.into_iter().collect();
        raw.sort_by(|a, b| a.0.cmp(&b.0));

        let mut merged: HashMap<String, Vec<String>> = HashMap::with_capacity(raw.len());
        for (key, related) in raw {
            match merged.entry(normalize(&key)) {
                Entry::Vacant(slot) => {
                    slot.insert(related);
                }
                Entry::Occupied(mut slot) => {
                    warn!(key = %key, muscle = %slot.key(), "merging duplicate similar-muscles entry");
                    let existing = slot.get_mut();
                    for name in related {
                        if !existing.contains(&name) {
                            existing.push(name);
                        }
                    }
                }
            }
        }

        Self { table: merged }
    }

    /// Reads and parses the file at `path`
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SimilarLoadError> {
        let content = fs::read_to_string(path)?;
        let table: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        Ok(Self::from_map(table))
    }

    /// Loads the table from `path`, falling back to the built-in default
    ///
    /// Never fails; a load error is logged and swallowed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(similar) => {
                info!(path = %path.display(), groups = similar.len(), "loaded similar-muscles table");
                similar
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using built-in similar-muscles table");
                Self::default()
            }
        }
    }

    /// Related muscle names for an already-normalized name; empty if unknown
    pub fn similar(&self, muscle: &str) -> &[String] {
        self.table.get(muscle).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
