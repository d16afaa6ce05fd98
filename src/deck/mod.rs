//! Deck loading and card lookup

pub mod card;
pub mod manifest;
pub mod names;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use card::{Card, CardId, CardKind, MAJOR_ARCANA_COUNT, RANKS, SUITS};
pub use manifest::DeckManifest;
pub use names::{NameFile, DEFAULT_LANGUAGE};

use crate::errors::{CartomancerError, Result};

/// A loaded tarot deck with all 78 standard cards
#[derive(Debug, Clone)]
pub struct Deck {
    /// Display name from `deck.toml`
    pub name: String,
    /// Deck root directory
    pub path: PathBuf,
    major_arcana: BTreeMap<String, Card>,
    minor_arcana: BTreeMap<String, BTreeMap<String, Card>>,
}

impl Deck {
    /// Load a deck using the default language
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_language(path, DEFAULT_LANGUAGE)
    }

    /// Load `deck.toml` and the preferred names file from a deck directory
    pub fn load_with_language(path: &Path, language: &str) -> Result<Self> {
        let manifest = DeckManifest::load(path)?;

        let major_arcana = (0..MAJOR_ARCANA_COUNT)
            .map(card::major_number)
            .map(|number| (number.clone(), Card::major(&number)))
            .collect();
        let minor_arcana = SUITS
            .iter()
            .map(|suit| {
                let cards = RANKS
                    .iter()
                    .map(|rank| ((*rank).to_string(), Card::minor(suit, rank)))
                    .collect();
                ((*suit).to_string(), cards)
            })
            .collect();

        let mut deck = Self {
            name: manifest.deck.name,
            path: path.to_path_buf(),
            major_arcana,
            minor_arcana,
        };

        let names_dir = path.join(names::NAMES_DIR);
        match names::select_language_file(&names_dir, language) {
            Some(file) => {
                tracing::debug!("Loading card names from {}", file.display());
                deck.apply_names(&NameFile::load(&file)?);
            }
            None => tracing::debug!("No language file in {}, using default names", names_dir.display()),
        }

        Ok(deck)
    }

    fn apply_names(&mut self, names: &NameFile) {
        if let Some(table) = &names.major_arcana {
            for (number, name) in &table.names {
                if let Some(card) = self.major_arcana.get_mut(number) {
                    card.name.clone_from(name);
                }
            }
            for (number, alt) in table.alt_text.iter().flatten() {
                if let Some(card) = self.major_arcana.get_mut(number) {
                    card.alt_text.clone_from(alt);
                }
            }
        }

        for (suit, table) in names.minor_arcana.iter().flatten() {
            let Some(cards) = self.minor_arcana.get_mut(suit) else {
                tracing::debug!("Ignoring names for unknown suit '{}'", suit);
                continue;
            };
            for (rank, name) in &table.names {
                if let Some(card) = cards.get_mut(rank) {
                    card.name.clone_from(name);
                }
            }
            for (rank, alt) in table.alt_text.iter().flatten() {
                if let Some(card) = cards.get_mut(rank) {
                    card.alt_text.clone_from(alt);
                }
            }
        }
    }

    /// Look up a card by canonical id
    pub fn card(&self, id: &str) -> Result<&Card> {
        match id.parse::<CardId>()? {
            CardId::Major { number } => self
                .major_arcana
                .get(&number)
                .ok_or_else(|| CartomancerError::CardNotFound(id.to_string())),
            CardId::Minor { suit, rank } => self
                .minor_arcana
                .get(&suit)
                .ok_or_else(|| CartomancerError::CardNotFound(format!("suit not found: {suit}")))?
                .get(&rank)
                .ok_or_else(|| CartomancerError::CardNotFound(id.to_string())),
            CardId::Custom { .. } => Err(CartomancerError::CardNotFound(id.to_string())),
        }
    }
}
