use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading decks and rendering cards
#[derive(Error, Debug)]
pub enum CartomancerError {
    /// The source image could not be read, is corrupt, or has an unsupported format
    #[error("Failed to decode image {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    /// The rendered art could not be persisted to the cache (non-fatal)
    #[error("Failed to write art cache entry {path}: {message}")]
    CacheWrite { path: PathBuf, message: String },

    /// Neither pre-rendered art nor a convertible image exists for a card
    #[error("No ANSI art or convertible images found for card: {card_id}")]
    SourceNotFound { card_id: String },

    /// Card id does not follow the canonical `major_arcana.NN` / `minor_arcana.suit.rank` form
    #[error("Invalid card ID format: {0}")]
    InvalidCardId(String),

    /// Card id is well formed but unknown to the deck
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Deck directory could not be located in the library or on disk
    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    /// `deck.toml` or a names file is missing or malformed
    #[error("Manifest error in {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Application configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid render parameters (grid size, color mode)
    #[error("Invalid render options: {0}")]
    InvalidRenderOptions(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CartomancerError {
    pub fn image_decode(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ImageDecode {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn manifest(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Type alias for Result with `CartomancerError`
pub type Result<T> = std::result::Result<T, CartomancerError>;
