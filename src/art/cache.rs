//! On-disk cache of rendered card art
//!
//! One `<sha256>.art` file per (source path, grid size, color mode) in a flat
//! directory. Entries are never invalidated; editing a deck image in place
//! leaves the old rendering cached.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use super::RenderOptions;
use crate::canvas;
use crate::errors::{CartomancerError, Result};

/// Extension of cached art files
pub const CACHE_EXTENSION: &str = "art";

/// Rendered-art cache keyed by source path and render options
#[derive(Debug, Clone)]
pub struct ArtCache {
    dir: Option<PathBuf>,
    options: RenderOptions,
}

impl ArtCache {
    pub fn new(dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        Self {
            dir: Some(dir.into()),
            options,
        }
    }

    /// A cache that never reads or writes, always rendering afresh
    pub fn disabled(options: RenderOptions) -> Self {
        Self { dir: None, options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Cache key for a source image: hex SHA-256 over path, grid size and color mode
    pub fn key(&self, source: &Path) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.to_string_lossy().as_bytes());
        hasher.update([0]);
        hasher.update(format!("{}x{}", self.options.grid.cols, self.options.grid.rows).as_bytes());
        hasher.update([0]);
        hasher.update(self.options.mode.as_str().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Path of the cache entry for `source`, if caching is enabled
    pub fn entry_path(&self, source: &Path) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{CACHE_EXTENSION}", self.key(source))))
    }

    /// Return cached art for `source`, rendering and storing it on a miss
    pub fn get_or_render(&self, source: &Path) -> Result<String> {
        let options = self.options;
        self.get_or_render_with(source, |path| {
            canvas::render_image(path, options.grid, options.mode)
        })
    }

    /// Like [`ArtCache::get_or_render`] with a caller-supplied renderer
    pub fn get_or_render_with<F>(&self, source: &Path, render: F) -> Result<String>
    where
        F: FnOnce(&Path) -> Result<String>,
    {
        let Some(entry) = self.entry_path(source) else {
            return render(source);
        };

        if let Some(text) = read_entry(&entry) {
            tracing::debug!("Art cache hit for {} ({})", source.display(), entry.display());
            return Ok(text);
        }
        tracing::debug!("Art cache miss for {}", source.display());

        let text = render(source)?;
        if let Err(e) = self.store(&entry, &text) {
            tracing::warn!("{}; continuing without cache", e);
        }
        Ok(text)
    }

    /// Cached art for `source` without rendering; the source need not exist
    pub fn cached(&self, source: &Path) -> Option<String> {
        self.entry_path(source).and_then(|entry| read_entry(&entry))
    }

    /// Write an entry via a temp file and rename so readers never see partial art
    fn store(&self, entry: &Path, text: &str) -> Result<()> {
        let cache_write = |message: String| CartomancerError::CacheWrite {
            path: entry.to_path_buf(),
            message,
        };
        let dir = entry
            .parent()
            .ok_or_else(|| cache_write("cache entry has no parent directory".to_string()))?;

        fs::create_dir_all(dir)
            .map_err(|e| cache_write(format!("cannot create cache directory: {e}")))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| cache_write(e.to_string()))?;
        tmp.write_all(text.as_bytes())
            .map_err(|e| cache_write(e.to_string()))?;
        tmp.persist(entry).map_err(|e| cache_write(e.error.to_string()))?;

        tracing::debug!("Stored rendered art at {}", entry.display());
        Ok(())
    }
}

fn read_entry(entry: &Path) -> Option<String> {
    match fs::read_to_string(entry) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable cache entry {}: {}", entry.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ColorMode, GridSize};
    use std::cell::Cell;
    use tempfile::TempDir;

    fn options() -> RenderOptions {
        RenderOptions {
            grid: GridSize::new(4, 2).unwrap(),
            mode: ColorMode::TrueColor,
        }
    }

    #[test]
    fn test_key_is_deterministic_and_option_sensitive() {
        let a = ArtCache::new("/tmp/c", options());
        let b = ArtCache::new("/elsewhere", options());
        let src = Path::new("/decks/rws/h750/major_arcana/00.png");
        assert_eq!(a.key(src), b.key(src));
        assert_eq!(a.key(src).len(), 64);
        assert_ne!(a.key(src), a.key(Path::new("/decks/rws/h750/major_arcana/01.png")));

        let palette = ArtCache::new(
            "/tmp/c",
            RenderOptions {
                mode: ColorMode::Palette256,
                ..options()
            },
        );
        assert_ne!(a.key(src), palette.key(src));

        let bigger = ArtCache::new(
            "/tmp/c",
            RenderOptions {
                grid: GridSize::new(40, 32).unwrap(),
                ..options()
            },
        );
        assert_ne!(a.key(src), bigger.key(src));
    }

    #[test]
    fn test_hit_skips_renderer() {
        let dir = TempDir::new().unwrap();
        let cache = ArtCache::new(dir.path(), options());
        let src = Path::new("/nowhere/00.png");
        let calls = Cell::new(0);

        let first = cache
            .get_or_render_with(src, |_| {
                calls.set(calls.get() + 1);
                Ok("art\n".to_string())
            })
            .unwrap();
        let second = cache
            .get_or_render_with(src, |_| {
                calls.set(calls.get() + 1);
                Ok("different\n".to_string())
            })
            .unwrap();

        assert_eq!(first, "art\n");
        assert_eq!(second, "art\n");
        assert_eq!(calls.get(), 1);
        assert!(cache.entry_path(src).unwrap().is_file());
        assert_eq!(cache.cached(src).as_deref(), Some("art\n"));
        assert_eq!(cache.cached(Path::new("/nowhere/01.png")), None);
    }

    #[test]
    fn test_uncreatable_cache_dir_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let cache = ArtCache::new(blocker.join("cache"), options());

        let text = cache
            .get_or_render_with(Path::new("/x.png"), |_| Ok("ok\n".to_string()))
            .unwrap();
        assert_eq!(text, "ok\n");
    }

    #[test]
    fn test_render_error_propagates_and_nothing_cached() {
        let dir = TempDir::new().unwrap();
        let cache = ArtCache::new(dir.path(), options());
        let src = Path::new("/x.png");
        let err = cache
            .get_or_render_with(src, |p| Err(CartomancerError::image_decode(p, "corrupt")))
            .unwrap_err();
        assert!(matches!(err, CartomancerError::ImageDecode { .. }));
        assert!(!cache.entry_path(src).unwrap().exists());
    }

    #[test]
    fn test_disabled_cache_always_renders() {
        let cache = ArtCache::disabled(options());
        let calls = Cell::new(0);
        for _ in 0..2 {
            cache
                .get_or_render_with(Path::new("/x.png"), |_| {
                    calls.set(calls.get() + 1);
                    Ok(String::new())
                })
                .unwrap();
        }
        assert_eq!(calls.get(), 2);
        assert!(cache.entry_path(Path::new("/x.png")).is_none());
    }
}
