use std::fs;
use std::io::Write;

use anyhow::{Context, Result};

use cartomancer::config::AppPaths;
use cartomancer::deck::Deck;

/// List decks in the library, marking the default
pub fn list(out: &mut dyn Write, paths: &AppPaths) -> Result<()> {
    let library = &paths.deck_library;
    if !library.exists() {
        writeln!(out, "Deck library at {} does not exist.", library.display())?;
        writeln!(out, "Run 'cartomancer deck init' to create it.")?;
        return Ok(());
    }

    let default_deck = paths.load_config()?.default_deck;
    let mut entries: Vec<_> = fs::read_dir(library)
        .with_context(|| format!("error reading deck library {}", library.display()))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    if entries.is_empty() {
        writeln!(out, "No decks found in your deck library.")?;
        writeln!(out, "You can add decks by copying them to: {}", library.display())?;
        return Ok(());
    }

    for entry in entries {
        // follows symlinks
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let deck = match Deck::load(&entry.path()) {
            Ok(deck) => deck,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                continue;
            }
        };

        if name == default_deck {
            writeln!(out, "* {} ({}) [DEFAULT]", name, deck.name)?;
        } else {
            writeln!(out, "  {} ({})", name, deck.name)?;
        }
    }
    Ok(())
}

/// Make `deck_name` the default deck after checking that it loads
pub fn set_default(out: &mut dyn Write, paths: &AppPaths, deck_name: &str) -> Result<()> {
    let deck_path = paths.resolve_deck_path(deck_name)?;
    Deck::load(&deck_path).context("not a valid deck")?;
    paths
        .set_default_deck(deck_name)
        .context("error setting default deck")?;

    writeln!(out, "Default deck set to: {deck_name}")?;
    Ok(())
}

/// Create the deck library and the config file
pub fn init(out: &mut dyn Write, paths: &AppPaths) -> Result<()> {
    fs::create_dir_all(&paths.deck_library).with_context(|| {
        format!("error creating deck library {}", paths.deck_library.display())
    })?;
    writeln!(out, "Deck library initialized at: {}", paths.deck_library.display())?;
    writeln!(out, "You can now add decks by copying them to this directory.")?;

    paths.load_config().context("error initializing config")?;
    writeln!(out, "Config file initialized at: {}", paths.config_file.display())?;
    Ok(())
}
