//! Canonical card identifiers and card metadata

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::CartomancerError;

/// Number of major arcana cards (00-21)
pub const MAJOR_ARCANA_COUNT: u8 = 22;

/// The four minor arcana suits, in canonical order
pub const SUITS: [&str; 4] = ["wands", "cups", "swords", "pentacles"];

/// The fourteen minor arcana ranks, in canonical order
pub const RANKS: [&str; 14] = [
    "ace", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "page",
    "knight", "queen", "king",
];

const MAJOR_ARCANA_NAMES: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// Two-digit major arcana number, e.g. `"07"`
pub fn major_number(n: u8) -> String {
    format!("{n:02}")
}

/// Arcana a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Major,
    Minor,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Major => "major_arcana",
            CardKind::Minor => "minor_arcana",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CardKind::Major => "Major Arcana",
            CardKind::Minor => "Minor Arcana",
        }
    }
}

/// Parsed canonical card id
///
/// `custom_cards.*` ids address files only; they never resolve to a [`Card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardId {
    /// `major_arcana.NN`
    Major { number: String },
    /// `minor_arcana.<suit>.<rank>`
    Minor { suit: String, rank: String },
    /// `custom_cards.<section>.<...>.<name>` (two or three trailing segments)
    Custom { segments: Vec<String> },
}

impl CardId {
    /// Relative path of this card's asset (without extension) inside an image or ANSI directory
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path = PathBuf::new();
        let leaf = match self {
            CardId::Major { number } => {
                path.push("major_arcana");
                number.as_str()
            }
            CardId::Minor { suit, rank } => {
                path.push("minor_arcana");
                path.push(suit);
                rank.as_str()
            }
            CardId::Custom { segments } => {
                path.push("custom_cards");
                match segments.split_last() {
                    Some((last, dirs)) => {
                        path.extend(dirs);
                        last.as_str()
                    }
                    None => "",
                }
            }
        };
        path.push(format!("{leaf}{extension}"));
        path
    }

    /// Asset path of this card under `base_dir`
    pub fn path_in(&self, base_dir: &Path, extension: &str) -> PathBuf {
        base_dir.join(self.relative_path(extension))
    }
}

impl FromStr for CardId {
    type Err = CartomancerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let invalid = || CartomancerError::InvalidCardId(s.to_string());

        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        match parts.as_slice() {
            ["major_arcana", number] => Ok(CardId::Major {
                number: (*number).to_string(),
            }),
            ["minor_arcana", suit, rank] => Ok(CardId::Minor {
                suit: (*suit).to_string(),
                rank: (*rank).to_string(),
            }),
            ["custom_cards", rest @ ..] if rest.len() == 2 || rest.len() == 3 => {
                Ok(CardId::Custom {
                    segments: rest.iter().map(|p| (*p).to_string()).collect(),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Major { number } => write!(f, "major_arcana.{number}"),
            CardId::Minor { suit, rank } => write!(f, "minor_arcana.{suit}.{rank}"),
            CardId::Custom { segments } => write!(f, "custom_cards.{}", segments.join(".")),
        }
    }
}

/// A tarot card with its localized display metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Canonical id, e.g. `major_arcana.00` or `minor_arcana.wands.ace`
    pub id: String,
    /// Localized name
    pub name: String,
    pub kind: CardKind,
    /// Major arcana number (`00`-`21`)
    pub number: Option<String>,
    /// Minor arcana suit
    pub suit: Option<String>,
    /// Minor arcana rank
    pub rank: Option<String>,
    /// Descriptive alt text, empty when the deck provides none
    pub alt_text: String,
}

impl Card {
    pub fn major(number: &str) -> Self {
        Self {
            id: format!("major_arcana.{number}"),
            name: default_major_name(number),
            kind: CardKind::Major,
            number: Some(number.to_string()),
            suit: None,
            rank: None,
            alt_text: String::new(),
        }
    }

    pub fn minor(suit: &str, rank: &str) -> Self {
        Self {
            id: format!("minor_arcana.{suit}.{rank}"),
            name: default_minor_name(rank, suit),
            kind: CardKind::Minor,
            number: None,
            suit: Some(suit.to_string()),
            rank: Some(rank.to_string()),
            alt_text: String::new(),
        }
    }
}

/// Traditional name of a major arcana card
pub fn default_major_name(number: &str) -> String {
    number
        .parse::<usize>()
        .ok()
        .and_then(|n| MAJOR_ARCANA_NAMES.get(n))
        .filter(|_| number.len() == 2)
        .map_or_else(|| format!("Major Arcana {number}"), |name| (*name).to_string())
}

/// Traditional name of a minor arcana card, e.g. "Ace of Wands"
pub fn default_minor_name(rank: &str, suit: &str) -> String {
    format!("{} of {}", capitalize(rank), capitalize(suit))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Nerd-font glyph for a suit
pub fn suit_symbol(suit: &str) -> &'static str {
    match suit {
        "wands" => "\u{ef15}",
        "cups" => "\u{edae}",
        "swords" => "\u{f0787}",
        "pentacles" => "\u{f1667}",
        _ => "•",
    }
}

/// Nerd-font glyph for an arcana
pub fn arcana_symbol(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Minor => "\u{f101d}",
        CardKind::Major => "\u{edeb}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("major_arcana.00", "major_arcana/00.ansi")]
    #[case("minor_arcana.wands.ace", "minor_arcana/wands/ace.ansi")]
    #[case("custom_cards.major_arcana.happy_squirrel", "custom_cards/major_arcana/happy_squirrel.ansi")]
    #[case("custom_cards.minor_arcana.stars.ace", "custom_cards/minor_arcana/stars/ace.ansi")]
    fn test_relative_path(#[case] id: &str, #[case] expected: &str) {
        let id: CardId = id.parse().unwrap();
        assert_eq!(id.relative_path(".ansi"), PathBuf::from(expected));
    }

    #[rstest]
    #[case("major_arcana")]
    #[case("major_arcana.00.extra")]
    #[case("minor_arcana.wands")]
    #[case("custom_cards.x")]
    #[case("tarot.00")]
    #[case("major_arcana.")]
    fn test_invalid_ids(#[case] id: &str) {
        assert!(matches!(
            id.parse::<CardId>(),
            Err(CartomancerError::InvalidCardId(_))
        ));
    }

    #[test]
    fn test_display_roundtrips_text() {
        for id in ["major_arcana.21", "minor_arcana.cups.queen"] {
            assert_eq!(id.parse::<CardId>().unwrap().to_string(), id);
        }
    }

    #[test]
    fn test_default_names() {
        assert_eq!(default_major_name("00"), "The Fool");
        assert_eq!(default_major_name("21"), "The World");
        assert_eq!(default_major_name("22"), "Major Arcana 22");
        assert_eq!(default_major_name("7"), "Major Arcana 7");
        assert_eq!(default_minor_name("knight", "swords"), "Knight of Swords");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(suit_symbol("unknown"), "•");
        assert_ne!(arcana_symbol(CardKind::Major), arcana_symbol(CardKind::Minor));
    }
}
