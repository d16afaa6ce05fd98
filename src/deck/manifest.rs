//! `deck.toml` schema

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{CartomancerError, Result};

/// File name of the deck manifest
pub const MANIFEST_FILE: &str = "deck.toml";

/// Only supported `deck.schema_version`
pub const SCHEMA_VERSION: &str = "1.0";

/// Parsed `deck.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckManifest {
    #[serde(default)]
    pub deck: DeckSection,
    pub card_backs: Option<CardBackSection>,
    pub aliases: Option<AliasSection>,
    #[serde(default)]
    pub remap_major_arcana: BTreeMap<String, String>,
    pub custom_cards: Option<CustomCardSection>,
    #[serde(default)]
    pub variants: BTreeMap<String, VariantSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeckSection {
    pub id: String,
    pub name: String,
    pub version: String,
    pub schema_version: String,
    pub icon: String,
    pub author: String,
    pub license: String,
    pub aspect_ratio: Option<f64>,
    pub description: String,
    pub created_date: String,
    pub updated_date: String,
    pub publisher: String,
    pub website: String,
    pub tags: Vec<String>,
    pub excluded_cards: Option<ExcludedCardSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExcludedCardSection {
    pub cards: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardBackSection {
    pub default: String,
    pub variants: BTreeMap<String, CardBackVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CardBackVariant {
    pub name: String,
    pub image: String,
    pub description: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AliasSection {
    pub suits: BTreeMap<String, String>,
    pub courts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomCardSection {
    pub major_arcana: BTreeMap<String, CustomCard>,
    pub minor_arcana: BTreeMap<String, CustomMinorArcanaSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomCard {
    pub id: String,
    pub name: String,
    pub image: String,
    pub alt_text: String,
    pub position: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomMinorArcanaSection {
    pub name: String,
    pub cards: Vec<CustomCard>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VariantSection {
    pub id: String,
    pub name: String,
    pub card_back: String,
    pub publisher: String,
    pub created_date: String,
}

impl DeckManifest {
    /// Load `deck.toml` from a deck root directory
    pub fn load(deck_root: &Path) -> Result<Self> {
        let path = deck_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(CartomancerError::manifest(
                &path,
                format!("{MANIFEST_FILE} not found in {}", deck_root.display()),
            ));
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content).map_err(|e| CartomancerError::manifest(&path, e))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
