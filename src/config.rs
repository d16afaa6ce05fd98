//! Application configuration and XDG paths
//!
//! `config.toml` lives in `$XDG_CONFIG_HOME/cartomancer/`, decks in
//! `$XDG_DATA_HOME/tarot/decks/`, rendered art in
//! `$XDG_CACHE_HOME/cartomancer/art_cache/`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

use crate::art::RenderOptions;
use crate::canvas::{ColorMode, GridSize};
use crate::errors::{CartomancerError, Result};

const APP_NAME: &str = "cartomancer";

/// Deck used when the config names none
pub const DEFAULT_DECK: &str = "rider-waite-smith";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deck shown when `--deck` is not given
    pub default_deck: String,

    /// Preferred names file (`names/<language>.toml`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    pub render: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_deck: DEFAULT_DECK.to_string(),
            language: None,
            render: RenderConfig::default(),
        }
    }
}

/// Rendering settings for generated art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Glyph columns
    pub cols: u32,
    /// Glyph rows
    pub rows: u32,
    /// `truecolor`, `256`, `16` or `auto`
    pub color_mode: String,
    /// Cache rendered art on disk
    pub cache: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cols: GridSize::DEFAULT.cols,
            rows: GridSize::DEFAULT.rows,
            color_mode: ColorMode::TrueColor.to_string(),
            cache: true,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> Result<RenderOptions> {
        let mode = self
            .color_mode
            .parse::<ColorMode>()
            .map_err(CartomancerError::InvalidRenderOptions)?;
        Ok(RenderOptions {
            grid: GridSize::new(self.cols, self.rows)?,
            mode,
        })
    }
}

/// Resolved locations of the config file, deck library and art cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_file: PathBuf,
    pub deck_library: PathBuf,
    pub cache_dir: PathBuf,
}

fn xdg_dir(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
}

impl AppPaths {
    /// Locate paths from the XDG environment, falling back to platform defaults
    pub fn discover() -> Result<Self> {
        let base = BaseDirs::new();
        let project = ProjectDirs::from("", "", APP_NAME);
        let missing = || CartomancerError::Config("could not determine home directory".to_string());

        let config_dir = match xdg_dir("XDG_CONFIG_HOME") {
            Some(dir) => dir.join(APP_NAME),
            None => project.as_ref().ok_or_else(missing)?.config_dir().to_path_buf(),
        };
        let data_home = match xdg_dir("XDG_DATA_HOME") {
            Some(dir) => dir,
            None => base.as_ref().ok_or_else(missing)?.data_dir().to_path_buf(),
        };
        let cache_dir = match xdg_dir("XDG_CACHE_HOME") {
            Some(dir) => dir.join(APP_NAME),
            None => project.as_ref().ok_or_else(missing)?.cache_dir().to_path_buf(),
        };

        Ok(Self::under(&config_dir, &data_home, &cache_dir))
    }

    /// Paths rooted at explicit config, data-home and cache directories
    pub fn under(config_dir: &Path, data_home: &Path, cache_dir: &Path) -> Self {
        Self {
            config_file: config_dir.join("config.toml"),
            deck_library: data_home.join("tarot").join("decks"),
            cache_dir: cache_dir.join("art_cache"),
        }
    }

    /// Load the config, writing a default one if none exists yet
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_file.exists() {
            tracing::info!("Creating default config at {}", self.config_file.display());
            let config = AppConfig::default();
            self.save_config(&config)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| CartomancerError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| CartomancerError::Config(format!("Invalid TOML config: {e}")))
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_file.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CartomancerError::Config(format!("Failed to create config dir: {e}")))?;
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| CartomancerError::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(&self.config_file, content)
            .map_err(|e| CartomancerError::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    pub fn set_default_deck(&self, deck_name: &str) -> Result<()> {
        let mut config = self.load_config()?;
        config.default_deck = deck_name.to_string();
        self.save_config(&config)
    }

    /// Resolve a deck name: library entry first, then a literal path
    pub fn resolve_deck_path(&self, deck_name: &str) -> Result<PathBuf> {
        let in_library = self.deck_library.join(deck_name);
        let candidate = if in_library.exists() {
            in_library
        } else {
            PathBuf::from(deck_name)
        };

        if !candidate.is_dir() {
            return Err(CartomancerError::DeckNotFound(deck_name.to_string()));
        }
        Ok(fs::canonicalize(&candidate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(root: &Path) -> AppPaths {
        AppPaths::under(&root.join("config"), &root.join("data"), &root.join("cache"))
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_deck, DEFAULT_DECK);
        assert!(config.render.cache);
        let options = config.render.options().unwrap();
        assert_eq!(options.grid, GridSize::DEFAULT);
        assert_eq!(options.mode, ColorMode::TrueColor);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let config = paths.load_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(paths.config_file.is_file());
        assert!(paths.deck_library.ends_with("tarot/decks"));
        assert!(paths.cache_dir.ends_with("art_cache"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        fs::create_dir_all(paths.config_file.parent().unwrap()).unwrap();
        fs::write(
            &paths.config_file,
            "default_deck = \"thoth\"\nlanguage = \"fr\"\n[render]\ncolor_mode = \"256\"\n",
        )
        .unwrap();

        let config = paths.load_config().unwrap();
        assert_eq!(config.default_deck, "thoth");
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.render.cols, 40);
        assert_eq!(config.render.options().unwrap().mode, ColorMode::Palette256);
    }

    #[test]
    fn test_invalid_render_options() {
        let render = RenderConfig {
            cols: 0,
            ..RenderConfig::default()
        };
        assert!(render.options().is_err());
        let render = RenderConfig {
            rows: u32::MAX,
            ..RenderConfig::default()
        };
        assert!(render.options().is_err());
        let render = RenderConfig {
            color_mode: "sepia".into(),
            ..RenderConfig::default()
        };
        assert!(matches!(
            render.options(),
            Err(CartomancerError::InvalidRenderOptions(_))
        ));
    }

    #[test]
    fn test_set_default_deck_roundtrip() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        paths.set_default_deck("marseille").unwrap();
        assert_eq!(paths.load_config().unwrap().default_deck, "marseille");
    }

    #[test]
    fn test_resolve_deck_path() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        let library_deck = paths.deck_library.join("rws");
        fs::create_dir_all(&library_deck).unwrap();

        assert_eq!(
            paths.resolve_deck_path("rws").unwrap(),
            fs::canonicalize(&library_deck).unwrap()
        );

        let loose = dir.path().join("loose-deck");
        fs::create_dir_all(&loose).unwrap();
        assert_eq!(
            paths.resolve_deck_path(loose.to_str().unwrap()).unwrap(),
            fs::canonicalize(&loose).unwrap()
        );

        assert!(matches!(
            paths.resolve_deck_path("nope"),
            Err(CartomancerError::DeckNotFound(_))
        ));
    }
}
