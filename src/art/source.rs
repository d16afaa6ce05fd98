//! Locating the art for a card inside a deck directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::deck::CardId;
use crate::errors::{CartomancerError, Result};

/// Pre-rendered ANSI art directories, in preference order
pub const ANSI_DIRS: [&str; 2] = ["ansi32", "ansi256"];

/// Extension of pre-rendered ANSI art files
pub const ANSI_EXTENSION: &str = ".ansi";

/// Known image directories, in preference order
pub const IMAGE_DIRS: [&str; 4] = ["scalable", "h2400", "h1200", "h750"];

/// Recognised card image extensions, in preference order
pub const IMAGE_EXTENSIONS: [&str; 5] = [".svg", ".png", ".jpg", ".jpeg", ".webp"];

/// Directories that never hold card images
const NON_IMAGE_DIRS: [&str; 4] = ["ansi32", "ansi256", "card_backs", "names"];

/// Where a card's art comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtSource {
    /// Escape-coded art shipped with the deck, printed verbatim
    PreRendered(PathBuf),
    /// Image that must be rendered (and cached)
    Image(PathBuf),
}

impl ArtSource {
    /// Find pre-rendered art for `id`, falling back to a convertible image
    pub fn locate(deck_root: &Path, id: &CardId) -> Result<Self> {
        for dir in ANSI_DIRS {
            let candidate = id.path_in(&deck_root.join(dir), ANSI_EXTENSION);
            if candidate.is_file() {
                return Ok(ArtSource::PreRendered(candidate));
            }
        }

        find_card_image(deck_root, id)
            .map(ArtSource::Image)
            .ok_or_else(|| CartomancerError::SourceNotFound {
                card_id: id.to_string(),
            })
    }
}

/// Every path an image for `id` may live at, in lookup order.
///
/// Known image directories first, then any other deck subdirectory (sorted);
/// within a directory, extensions in [`IMAGE_EXTENSIONS`] order.
pub fn image_candidates(deck_root: &Path, id: &CardId) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = IMAGE_DIRS.iter().map(|dir| deck_root.join(dir)).collect();

    let mut others: Vec<PathBuf> = fs::read_dir(deck_root)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_dir())
                .filter(|entry| {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    !NON_IMAGE_DIRS.contains(&name.as_ref()) && !IMAGE_DIRS.contains(&name.as_ref())
                })
                .map(|entry| entry.path())
                .collect()
        })
        .unwrap_or_default();
    others.sort();
    dirs.extend(others);

    dirs.iter()
        .flat_map(|dir| IMAGE_EXTENSIONS.iter().map(move |ext| id.path_in(dir, ext)))
        .collect()
}

/// First existing image for `id`, see [`image_candidates`]
pub fn find_card_image(deck_root: &Path, id: &CardId) -> Option<PathBuf> {
    image_candidates(deck_root, id)
        .into_iter()
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn fool() -> CardId {
        "major_arcana.00".parse().unwrap()
    }

    #[test]
    fn test_prerendered_wins() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("ansi256/major_arcana/00.ansi"));
        touch(&dir.path().join("h750/major_arcana/00.png"));
        assert_eq!(
            ArtSource::locate(dir.path(), &fool()).unwrap(),
            ArtSource::PreRendered(dir.path().join("ansi256/major_arcana/00.ansi"))
        );

        touch(&dir.path().join("ansi32/major_arcana/00.ansi"));
        assert_eq!(
            ArtSource::locate(dir.path(), &fool()).unwrap(),
            ArtSource::PreRendered(dir.path().join("ansi32/major_arcana/00.ansi"))
        );
    }

    #[test]
    fn test_image_priority() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("h750/major_arcana/00.jpg"));
        touch(&dir.path().join("h1200/major_arcana/00.webp"));
        assert_eq!(
            ArtSource::locate(dir.path(), &fool()).unwrap(),
            ArtSource::Image(dir.path().join("h1200/major_arcana/00.webp"))
        );

        touch(&dir.path().join("scalable/major_arcana/00.svg"));
        assert_eq!(
            ArtSource::locate(dir.path(), &fool()).unwrap(),
            ArtSource::Image(dir.path().join("scalable/major_arcana/00.svg"))
        );
    }

    #[test]
    fn test_unlisted_directory_fallback() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("card_backs/major_arcana/00.png"));
        touch(&dir.path().join("zeta/minor_arcana/cups/two.png"));
        touch(&dir.path().join("alpha/minor_arcana/cups/two.jpeg"));
        let id: CardId = "minor_arcana.cups.two".parse().unwrap();
        assert_eq!(
            find_card_image(dir.path(), &id),
            Some(dir.path().join("alpha/minor_arcana/cups/two.jpeg"))
        );
        // card_backs is never searched
        assert_eq!(find_card_image(dir.path(), &fool()), None);
    }

    #[test]
    fn test_candidates_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("extra")).unwrap();
        fs::create_dir_all(dir.path().join("names")).unwrap();
        let candidates = image_candidates(dir.path(), &fool());

        assert_eq!(candidates.len(), (IMAGE_DIRS.len() + 1) * IMAGE_EXTENSIONS.len());
        assert_eq!(candidates[0], dir.path().join("scalable/major_arcana/00.svg"));
        assert_eq!(
            candidates.last().unwrap(),
            &dir.path().join("extra/major_arcana/00.webp")
        );
    }

    #[test]
    fn test_source_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ArtSource::locate(dir.path(), &fool()).unwrap_err();
        assert!(matches!(err, CartomancerError::SourceNotFound { .. }));
        assert!(err.to_string().contains("major_arcana.00"));
    }
}
