mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cartomancer::canvas::ColorMode;
use cartomancer::config::AppPaths;
use commands::show::ShowArgs;

/// Tarot deck tooling for the terminal
#[derive(Debug, Parser)]
#[command(name = "cartomancer", version, about)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log debug details to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a tarot deck directory against the Tarot Deck Specification v1.0
    Validate {
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a card with terminal art, e.g. `major_arcana.00` or `minor_arcana.wands.ace`
    Show {
        card_id: String,

        /// Deck name in the library, or a path to a deck directory
        #[arg(short, long)]
        deck: Option<String>,

        /// Terminal width to lay out for (defaults to the detected width)
        #[arg(long)]
        width: Option<usize>,

        /// truecolor, 256, 16 or auto
        #[arg(long)]
        color_mode: Option<ColorMode>,

        /// Render without reading or writing the art cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Manage tarot decks in your deck library
    Deck {
        #[command(subcommand)]
        command: DeckCommand,
    },
}

#[derive(Debug, Subcommand)]
enum DeckCommand {
    /// List available decks in your deck library
    Ls,
    /// Set the default deck
    SetDefault { deck_name: String },
    /// Initialize the deck library
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!("cartomancer {}", env!("CARGO_PKG_VERSION"));

    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Validate { path, json } => commands::validate::run(&mut stdout, &path, json),
        Command::Show {
            card_id,
            deck,
            width,
            color_mode,
            no_cache,
        } => {
            let args = ShowArgs {
                card_id,
                deck,
                width,
                color_mode,
                no_cache,
            };
            commands::show::run(&mut stdout, &AppPaths::discover()?, &args)
        }
        Command::Deck { command } => {
            let paths = AppPaths::discover()?;
            match command {
                DeckCommand::Ls => commands::deck::list(&mut stdout, &paths),
                DeckCommand::SetDefault { deck_name } => {
                    commands::deck::set_default(&mut stdout, &paths, &deck_name)
                }
                DeckCommand::Init => commands::deck::init(&mut stdout, &paths),
            }
        }
    }
}
