//! Localized card names (`names/<lang>.toml`)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{CartomancerError, Result};

/// Directory holding the language files
pub const NAMES_DIR: &str = "names";

/// Language used when none is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// One language file
///
/// ```toml
/// [major_arcana]
/// "00" = "The Fool"
///
/// [major_arcana.alt_text]
/// "00" = "A young traveler at a cliff's edge"
///
/// [minor_arcana.wands]
/// ace = "Ace of Wands"
///
/// [minor_arcana.wands.alt_text]
/// ace = "A hand emerging from a cloud"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameFile {
    pub major_arcana: Option<NameTable>,
    pub minor_arcana: Option<BTreeMap<String, NameTable>>,
    pub card_backs: Option<CardBackNames>,
}

/// Names keyed by card number or rank, plus an optional `alt_text` subtable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameTable {
    pub alt_text: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardBackNames {
    #[serde(default)]
    pub alt_text: BTreeMap<String, String>,
}

impl NameFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CartomancerError::manifest(path, e))
    }

    /// Whether any `alt_text` table is present
    pub fn has_alt_text(&self) -> bool {
        self.major_arcana
            .as_ref()
            .is_some_and(|t| t.alt_text.is_some())
            || self
                .minor_arcana
                .as_ref()
                .is_some_and(|suits| suits.values().any(|t| t.alt_text.is_some()))
    }
}

/// Pick the language file to load from `names_dir`.
///
/// Order: `<language>.toml`, then `en.toml`, then the lexicographically
/// first `*.toml` file. Returns `None` when the directory has no language file.
pub fn select_language_file(names_dir: &Path, language: &str) -> Option<PathBuf> {
    for lang in [language, DEFAULT_LANGUAGE] {
        let candidate = names_dir.join(format!("{lang}.toml"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let mut files: Vec<PathBuf> = fs::read_dir(names_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "toml"))
        .collect();
    files.sort();
    files.into_iter().next()
}
