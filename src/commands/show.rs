use std::io::Write;

use anyhow::{Context, Result};

use cartomancer::art::{self, ArtCache};
use cartomancer::canvas::{self, ColorMode};
use cartomancer::config::AppPaths;
use cartomancer::deck::{CardId, Deck, DEFAULT_LANGUAGE};
use cartomancer::layout::{self, AnsiStyler};

/// Options of the `show` subcommand
#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub card_id: String,
    pub deck: Option<String>,
    pub width: Option<usize>,
    pub color_mode: Option<ColorMode>,
    pub no_cache: bool,
}

/// Render one card beside its metadata
pub fn run(out: &mut dyn Write, paths: &AppPaths, args: &ShowArgs) -> Result<()> {
    let config = paths.load_config().context("error loading config")?;

    let deck_name = args.deck.as_deref().unwrap_or(&config.default_deck);
    let deck_path = paths
        .resolve_deck_path(deck_name)
        .with_context(|| format!("error loading deck '{deck_name}'"))?;

    let language = config.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let deck = Deck::load_with_language(&deck_path, language).context("error loading deck")?;
    let card = deck.card(&args.card_id)?;
    let card_id: CardId = args.card_id.parse()?;

    let mut options = config.render.options()?;
    if let Some(mode) = args.color_mode {
        options.mode = mode;
    }
    let cache = if args.no_cache || !config.render.cache {
        ArtCache::disabled(options)
    } else {
        ArtCache::new(&paths.cache_dir, options)
    };

    tracing::info!("Showing {} from {}", card.id, deck_path.display());
    let art_block = art::load_art(&deck.path, &card_id, &cache)
        .with_context(|| format!("error loading art for {}", card.id))?;

    let width = args.width.unwrap_or_else(canvas::terminal_width);
    let rendered = layout::render_and_print(card, &deck.name, &art_block, width, &AnsiStyler);
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
