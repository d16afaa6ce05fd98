//! Card art: locating pre-rendered art or rendering (and caching) images

pub mod cache;
pub mod source;

use std::fs;
use std::path::Path;

pub use cache::ArtCache;
pub use source::ArtSource;

use crate::canvas::{ColorMode, GridSize};
use crate::deck::CardId;
use crate::errors::{CartomancerError, Result};

/// Parameters that determine a rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderOptions {
    pub grid: GridSize,
    pub mode: ColorMode,
}

/// Load the art block for a card: pre-rendered file verbatim, else cached rendering.
///
/// When no source exists any more, a rendering cached for one of the card's
/// image paths is still returned.
pub fn load_art(deck_root: &Path, id: &CardId, cache: &ArtCache) -> Result<String> {
    match ArtSource::locate(deck_root, id) {
        Ok(ArtSource::PreRendered(path)) => {
            tracing::debug!("Using pre-rendered art {}", path.display());
            Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
        }
        Ok(ArtSource::Image(path)) => cache.get_or_render(&path),
        Err(e @ CartomancerError::SourceNotFound { .. }) => source::image_candidates(deck_root, id)
            .iter()
            .find_map(|path| cache.cached(path))
            .inspect(|_| tracing::debug!("Source image for {} is gone, using cached art", id))
            .ok_or(e),
        Err(e) => Err(e),
    }
}
