//! Two-column card display: art on the left, wrapped metadata on the right

mod style;

use textwrap::{Options, WordSplitter, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

pub use style::{AnsiStyler, PlainStyler, Styler};

use crate::deck::card::{arcana_symbol, suit_symbol};
use crate::deck::{Card, CardKind};

/// Blank columns between the art and the info column
pub const GUTTER: usize = 4;

/// Columns kept free at the right edge of the terminal
pub const RIGHT_MARGIN: usize = 2;

/// Narrowest info column, even if it overflows the terminal
pub const MIN_INFO_WIDTH: usize = 20;

/// Indent before the art column
const LEFT_MARGIN: &str = "  ";

const ESC: char = '\x1b';

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Text,
    /// Saw ESC, waiting for the sequence type
    Escape,
    /// Inside `ESC [ ...` until a final byte
    Csi,
}

/// Remove ANSI escape sequences, keeping only printable text.
///
/// ESC starts an escape; `ESC [` opens a control sequence that runs to the
/// first final byte (`@`..=`~`). Any other character after ESC closes a
/// two-character escape.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = ScanState::Text;

    for c in s.chars() {
        state = match state {
            ScanState::Text if c == ESC => ScanState::Escape,
            ScanState::Text => {
                out.push(c);
                ScanState::Text
            }
            ScanState::Escape if c == '[' => ScanState::Csi,
            ScanState::Escape => ScanState::Text,
            ScanState::Csi if ('@'..='~').contains(&c) => ScanState::Text,
            ScanState::Csi => ScanState::Csi,
        };
    }

    out
}

/// Terminal columns occupied by `s` once escape sequences are removed
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Greedy word wrap that never splits a word.
///
/// Words are joined while `len + 1 + word_len <= width`; a word longer than
/// `width` sits on a line of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return vec![String::new()];
    }

    let options = Options::new(width.max(1))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(false)
        .word_splitter(WordSplitter::NoHyphenation);
    textwrap::wrap(&normalized, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Width of the info column for a given art width and terminal width.
///
/// Clamped to [`MIN_INFO_WIDTH`] when the terminal is too narrow.
pub fn info_column_width(art_width: usize, terminal_width: usize) -> usize {
    let used = art_width + GUTTER + RIGHT_MARGIN;
    match terminal_width.checked_sub(used) {
        Some(width) if width >= MIN_INFO_WIDTH => width,
        _ => {
            tracing::debug!(
                "Terminal width {} too narrow for art width {}, clamping info column to {}",
                terminal_width,
                art_width,
                MIN_INFO_WIDTH
            );
            MIN_INFO_WIDTH
        }
    }
}

/// Metadata shown beside the art
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoBlock {
    /// Pre-styled single-line fields
    pub fields: Vec<String>,
    /// Free-form text wrapped to the info column
    pub description: Option<String>,
}

impl InfoBlock {
    /// Card, deck, id, arcana and (for minor cards) suit and rank fields
    pub fn for_card(card: &Card, deck_name: &str, styler: &dyn Styler) -> Self {
        let field = |label: &str, value: &str| format!("{}{}", styler.label(label), styler.value(value));
        let mut fields = vec![
            field("Card: ", &card.name),
            field("Deck: ", deck_name),
            field("ID:   ", &card.id),
            field(
                "Type: ",
                &format!("{} · {}", card.kind.display_name(), arcana_symbol(card.kind)),
            ),
        ];

        if card.kind == CardKind::Minor {
            let suit = card.suit.as_deref().unwrap_or_default();
            fields.push(field("Suit: ", &format!("{suit} · {}", suit_symbol(suit))));
            fields.push(field("Rank: ", card.rank.as_deref().unwrap_or_default()));
        }

        let description = Some(card.alt_text.clone()).filter(|t| !t.trim().is_empty());
        Self {
            fields,
            description,
        }
    }
}

/// Zip art lines with info lines into display rows.
///
/// Art rows are padded to the art width plus [`GUTTER`]; rows past the end of
/// the art get blank padding, rows past the end of the info get nothing.
pub fn layout(
    info: &InfoBlock,
    art_block: &str,
    terminal_width: usize,
    styler: &dyn Styler,
) -> Vec<String> {
    let art_lines: Vec<&str> = art_block.lines().collect();
    let art_width = art_lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let info_start = art_width + GUTTER;
    let info_width = info_column_width(art_width, terminal_width);

    let mut info_lines = info.fields.clone();
    if let Some(description) = &info.description {
        info_lines.push(String::new());
        info_lines.push(styler.label("Description:"));
        info_lines.extend(wrap_text(description, info_width));
    }

    let rows = art_lines.len().max(info_lines.len());
    (0..rows)
        .map(|i| {
            let mut line = String::from(LEFT_MARGIN);
            match art_lines.get(i) {
                Some(art) => {
                    line.push_str(art);
                    line.push_str(&" ".repeat(info_start.saturating_sub(visible_width(art))));
                }
                None => line.push_str(&" ".repeat(info_start)),
            }
            if let Some(text) = info_lines.get(i) {
                line.push_str(text);
            }
            line
        })
        .collect()
}

/// Lay out a card beside its art, framed by blank lines, ready for stdout
pub fn render_and_print(
    card: &Card,
    deck_name: &str,
    art_block: &str,
    terminal_width: usize,
    styler: &dyn Styler,
) -> String {
    let info = InfoBlock::for_card(card, deck_name, styler);
    let mut out = String::from("\n");
    for line in layout(&info, art_block, terminal_width, styler) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out
}
