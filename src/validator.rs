//! Deck bundle validation against the Tarot Deck Specification v1.0 layout
//!
//! Only presence and parse checks: required manifest fields, image
//! directories, the 78 card files, names files and optional ANSI art.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::art::source::{ANSI_EXTENSION, IMAGE_EXTENSIONS};
use crate::deck::card::{major_number, MAJOR_ARCANA_COUNT, RANKS, SUITS};
use crate::deck::manifest::{DeckManifest, SCHEMA_VERSION};
use crate::deck::names::{NameFile, NAMES_DIR};
use crate::errors::Result;

/// Findings of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validates one deck directory
#[derive(Debug)]
pub struct Validator {
    deck_path: PathBuf,
    report: ValidationReport,
}

impl Validator {
    pub fn new(deck_path: impl Into<PathBuf>) -> Self {
        Self {
            deck_path: deck_path.into(),
            report: ValidationReport::default(),
        }
    }

    /// Run all checks.
    ///
    /// A missing or unparsable `deck.toml` is an `Err`; everything else is
    /// collected into the report.
    pub fn validate(mut self) -> Result<ValidationReport> {
        let manifest = DeckManifest::load(&self.deck_path)?;
        tracing::info!("Validating deck at {}", self.deck_path.display());

        self.check_manifest(&manifest);
        self.check_directory_structure();
        self.check_card_backs();
        let image_dirs = self.image_dirs();
        self.check_major_arcana(&image_dirs);
        self.check_minor_arcana(&image_dirs);
        self.check_names();
        self.check_ansi_art();

        tracing::debug!(
            "Validation finished: {} errors, {} warnings",
            self.report.errors.len(),
            self.report.warnings.len()
        );
        Ok(self.report)
    }

    fn check_manifest(&mut self, manifest: &DeckManifest) {
        let deck = &manifest.deck;
        for (field, value) in [
            ("id", &deck.id),
            ("name", &deck.name),
            ("version", &deck.version),
        ] {
            if value.is_empty() {
                self.report.error(format!("deck.{field} is required in deck.toml"));
            }
        }

        if deck.schema_version.is_empty() {
            self.report.error("deck.schema_version is required in deck.toml");
        } else if deck.schema_version != SCHEMA_VERSION {
            self.report.error(format!(
                "unsupported schema_version: {} (supported: {SCHEMA_VERSION})",
                deck.schema_version
            ));
        }

        let Some(backs) = &manifest.card_backs else {
            return;
        };
        if backs.variants.len() > 1 && backs.default.is_empty() {
            self.report
                .error("card_backs.default is required when multiple card back variants are defined");
        }
        for (name, variant) in &backs.variants {
            if variant.image.is_empty() {
                self.report
                    .error(format!("card_backs.variants.{name}.image is required"));
            } else if !self.deck_path.join(&variant.image).exists() {
                self.report
                    .error(format!("card back image not found: {}", variant.image));
            }
        }
    }

    fn check_directory_structure(&mut self) {
        if !self.deck_path.join("card_backs").is_dir() {
            self.report.warn("card_backs directory not found");
        }
        if self.image_dirs().is_empty() {
            self.report
                .error("no image directories found (expecting scalable/ or h*/ directories)");
        }
        if !self.deck_path.join(NAMES_DIR).is_dir() {
            self.report.warn("names directory not found");
        }
    }

    fn check_card_backs(&mut self) {
        let dir = self.deck_path.join("card_backs");
        if !dir.is_dir() {
            return;
        }
        match fs::read_dir(&dir) {
            Ok(mut entries) => {
                if entries.next().is_none() {
                    self.report.error("no card backs found in card_backs directory");
                }
            }
            Err(e) => self
                .report
                .error(format!("error reading card_backs directory: {e}")),
        }
    }

    /// `scalable/` plus every `h<digits>/` directory, sorted
    fn image_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        let scalable = self.deck_path.join("scalable");
        if scalable.is_dir() {
            dirs.push(scalable);
        }

        let mut raster: Vec<PathBuf> = sorted_subdirs(&self.deck_path)
            .into_iter()
            .filter(|(name, _)| is_raster_dir_name(name))
            .map(|(_, path)| path)
            .collect();
        raster.sort();
        dirs.extend(raster);
        dirs
    }

    fn check_major_arcana(&mut self, image_dirs: &[PathBuf]) {
        let mut found = false;
        for image_dir in image_dirs {
            let dir = image_dir.join("major_arcana");
            if !dir.is_dir() {
                continue;
            }
            found = true;

            let missing: Vec<String> = (0..MAJOR_ARCANA_COUNT)
                .map(major_number)
                .filter(|number| !has_image(&dir, number))
                .collect();
            if !missing.is_empty() {
                self.report.error(format!(
                    "missing major arcana cards in {}: {}",
                    image_dir.display(),
                    missing.join(", ")
                ));
            }
        }

        if !found {
            self.report
                .error("major_arcana directory not found in any image directory");
        }
    }

    fn check_minor_arcana(&mut self, image_dirs: &[PathBuf]) {
        let mut found = false;
        for image_dir in image_dirs {
            let dir = image_dir.join("minor_arcana");
            if !dir.is_dir() {
                continue;
            }
            found = true;

            for suit in SUITS {
                let suit_dir = dir.join(suit);
                if !suit_dir.is_dir() {
                    self.report.error(format!(
                        "missing suit directory: {suit} in {}",
                        dir.display()
                    ));
                    continue;
                }

                let missing: Vec<&str> = RANKS
                    .iter()
                    .copied()
                    .filter(|rank| !has_image(&suit_dir, rank))
                    .collect();
                if !missing.is_empty() {
                    self.report.error(format!(
                        "missing cards in {suit} suit: {}",
                        missing.join(", ")
                    ));
                }
            }
        }

        if !found {
            self.report
                .error("minor_arcana directory not found in any image directory");
        }
    }

    fn check_names(&mut self) {
        let dir = self.deck_path.join(NAMES_DIR);
        if !dir.is_dir() {
            return;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.report
                    .error(format!("error reading names directory: {e}"));
                return;
            }
        };
        let mut files: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        if files.is_empty() {
            self.report.error("no language files found in names directory");
            return;
        }
        files.sort();

        let mut found_valid = false;
        for path in files
            .iter()
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "toml"))
        {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let names = match NameFile::load(path) {
                Ok(names) => names,
                Err(e) => {
                    self.report
                        .error(format!("error parsing language file {file_name}: {e}"));
                    continue;
                }
            };
            found_valid = true;

            if names.major_arcana.is_none() {
                self.report
                    .warn(format!("missing [major_arcana] section in {file_name}"));
            }
            if names.minor_arcana.is_none() {
                self.report
                    .warn(format!("missing [minor_arcana] section in {file_name}"));
            }
            if !names.has_alt_text() {
                self.report
                    .warn(format!("no alt_text sections found in {file_name}"));
            }
        }

        if !found_valid {
            self.report
                .error("no valid language files found in names directory");
        }
    }

    fn check_ansi_art(&mut self) {
        let ansi_dirs: Vec<(String, PathBuf)> = sorted_subdirs(&self.deck_path)
            .into_iter()
            .filter(|(name, _)| name.starts_with("ansi"))
            .collect();

        if ansi_dirs.is_empty() {
            self.report
                .warn("no ANSI art directories found (ansi32/, ansi256/, etc.)");
        }
        for (name, path) in ansi_dirs {
            self.check_ansi_dir(&path, &name);
        }
    }

    fn check_ansi_dir(&mut self, ansi_dir: &Path, dir_name: &str) {
        let major = ansi_dir.join("major_arcana");
        if major.is_dir() {
            let missing: Vec<String> = (0..MAJOR_ARCANA_COUNT)
                .map(major_number)
                .filter(|n| !major.join(format!("{n}{ANSI_EXTENSION}")).exists())
                .collect();
            if !missing.is_empty() {
                self.report.warn(format!(
                    "missing ANSI art for major arcana cards in {dir_name}: {}",
                    missing.join(", ")
                ));
            }
        } else {
            self.report
                .warn(format!("major_arcana directory not found in {dir_name}"));
        }

        let minor = ansi_dir.join("minor_arcana");
        if !minor.is_dir() {
            self.report
                .warn(format!("minor_arcana directory not found in {dir_name}"));
            return;
        }
        for suit in SUITS {
            let suit_dir = minor.join(suit);
            if !suit_dir.is_dir() {
                self.report.warn(format!(
                    "missing suit directory: {suit} in {dir_name}/minor_arcana"
                ));
                continue;
            }
            let missing: Vec<&str> = RANKS
                .iter()
                .copied()
                .filter(|rank| !suit_dir.join(format!("{rank}{ANSI_EXTENSION}")).exists())
                .collect();
            if !missing.is_empty() {
                self.report.warn(format!(
                    "missing ANSI art for {suit} cards in {dir_name}: {}",
                    missing.join(", ")
                ));
            }
        }
    }
}

/// `h` followed by one or more digits, e.g. `h750`
fn is_raster_dir_name(name: &str) -> bool {
    name.strip_prefix('h')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

fn has_image(dir: &Path, stem: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| dir.join(format!("{stem}{ext}")).is_file())
}

/// Subdirectories of `dir` as (name, path), sorted by name
fn sorted_subdirs(dir: &Path) -> Vec<(String, PathBuf)> {
    let mut dirs: Vec<(String, PathBuf)> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .map(|e| (e.file_name().to_string_lossy().into_owned(), e.path()))
                .collect()
        })
        .unwrap_or_default();
    dirs.sort();
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str =
        "[deck]\nid = \"t\"\nname = \"T\"\nversion = \"1\"\nschema_version = \"1.0\"\n";

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn complete_deck(root: &Path) {
        fs::write(root.join("deck.toml"), MANIFEST).unwrap();
        touch(&root.join("card_backs/back.png"));
        for n in 0..MAJOR_ARCANA_COUNT {
            touch(&root.join(format!("h750/major_arcana/{}.png", major_number(n))));
            touch(&root.join(format!("ansi32/major_arcana/{}.ansi", major_number(n))));
        }
        for suit in SUITS {
            for rank in RANKS {
                touch(&root.join(format!("h750/minor_arcana/{suit}/{rank}.png")));
                touch(&root.join(format!("ansi32/minor_arcana/{suit}/{rank}.ansi")));
            }
        }
        fs::create_dir_all(root.join("names")).unwrap();
        fs::write(
            root.join("names/en.toml"),
            "[major_arcana]\n\"00\" = \"The Fool\"\n[major_arcana.alt_text]\n\"00\" = \"x\"\n\
             [minor_arcana.wands]\nace = \"Ace\"\n",
        )
        .unwrap();
    }

    #[test]
    fn test_complete_deck_is_valid() {
        let dir = TempDir::new().unwrap();
        complete_deck(dir.path());
        let report = Validator::new(dir.path()).validate().unwrap();
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_missing_manifest_is_err() {
        let dir = TempDir::new().unwrap();
        assert!(Validator::new(dir.path()).validate().is_err());
    }

    #[test]
    fn test_manifest_fields() {
        let dir = TempDir::new().unwrap();
        complete_deck(dir.path());
        fs::write(
            dir.path().join("deck.toml"),
            "[deck]\nname = \"T\"\nschema_version = \"2.0\"\n\
             [card_backs.variants.a]\nimage = \"card_backs/a.png\"\n\
             [card_backs.variants.b]\nimage = \"\"\n",
        )
        .unwrap();
        let report = Validator::new(dir.path()).validate().unwrap();
        let errors = report.errors.join("\n");
        assert!(errors.contains("deck.id is required"));
        assert!(errors.contains("deck.version is required"));
        assert!(errors.contains("unsupported schema_version: 2.0"));
        assert!(errors.contains("card_backs.default is required"));
        assert!(errors.contains("card back image not found: card_backs/a.png"));
        assert!(errors.contains("card_backs.variants.b.image is required"));
    }

    #[test]
    fn test_missing_cards_reported() {
        let dir = TempDir::new().unwrap();
        complete_deck(dir.path());
        fs::remove_file(dir.path().join("h750/major_arcana/13.png")).unwrap();
        fs::remove_file(dir.path().join("h750/minor_arcana/cups/queen.png")).unwrap();
        fs::remove_dir_all(dir.path().join("h750/minor_arcana/swords")).unwrap();
        fs::remove_file(dir.path().join("ansi32/minor_arcana/wands/two.ansi")).unwrap();

        let report = Validator::new(dir.path()).validate().unwrap();
        let errors = report.errors.join("\n");
        assert!(errors.contains("missing major arcana cards in"));
        assert!(errors.contains(": 13"));
        assert!(errors.contains("missing cards in cups suit: queen"));
        assert!(errors.contains("missing suit directory: swords"));
        assert!(report
            .warnings
            .iter()
            .any(|w| w == "missing ANSI art for wands cards in ansi32: two"));
    }

    #[test]
    fn test_structure_warnings_and_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deck.toml"), MANIFEST).unwrap();
        let report = Validator::new(dir.path()).validate().unwrap();

        assert!(report
            .errors
            .iter()
            .any(|e| e.starts_with("no image directories found")));
        assert!(report
            .errors
            .contains(&"major_arcana directory not found in any image directory".to_string()));
        assert!(report
            .warnings
            .contains(&"card_backs directory not found".to_string()));
        assert!(report.warnings.contains(&"names directory not found".to_string()));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("no ANSI art directories found")));
    }

    #[test]
    fn test_names_checks() {
        let dir = TempDir::new().unwrap();
        complete_deck(dir.path());
        fs::write(dir.path().join("names/en.toml"), "[major_arcana\n").unwrap();
        let report = Validator::new(dir.path()).validate().unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.starts_with("error parsing language file en.toml")));
        assert!(report
            .errors
            .contains(&"no valid language files found in names directory".to_string()));

        fs::write(dir.path().join("names/en.toml"), "title = \"x\"\n").unwrap();
        let report = Validator::new(dir.path()).validate().unwrap();
        assert!(report.is_valid());
        assert!(report
            .warnings
            .contains(&"missing [major_arcana] section in en.toml".to_string()));
        assert!(report
            .warnings
            .contains(&"no alt_text sections found in en.toml".to_string()));
    }

    #[test]
    fn test_empty_card_backs() {
        let dir = TempDir::new().unwrap();
        complete_deck(dir.path());
        fs::remove_file(dir.path().join("card_backs/back.png")).unwrap();
        let report = Validator::new(dir.path()).validate().unwrap();
        assert!(report
            .errors
            .contains(&"no card backs found in card_backs directory".to_string()));
    }

    #[test]
    fn test_raster_dir_names() {
        assert!(is_raster_dir_name("h750"));
        assert!(is_raster_dir_name("h2400"));
        assert!(!is_raster_dir_name("h"));
        assert!(!is_raster_dir_name("hx1"));
        assert!(!is_raster_dir_name("names"));
    }
}
