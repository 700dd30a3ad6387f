//! Font availability checks.
//!
//! Whether a font exists is platform knowledge. A [`FontCatalog`] answers the
//! question the way a rendering backend would: it reports the family that
//! would actually be used for a request, which differs from the request when
//! the platform silently substitutes its default font.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const FALLBACK_FAMILY: &str = "DejaVu Sans";
const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// Tells which font family a renderer would use for a requested family.
pub trait FontCatalog {
    /// Returns the family used when `requested` is asked for.
    ///
    /// Equal to `requested` when the font exists, otherwise the fallback.
    /// Family names are case-sensitive.
    fn resolve_family(&self, requested: &str) -> String;
}

impl<F: FontCatalog + ?Sized> FontCatalog for &F {
    fn resolve_family(&self, requested: &str) -> String {
        (**self).resolve_family(requested)
    }
}

/// Font catalog backed by the font files installed on this machine.
///
/// Families are matched by file name: `DejaVuSans-Bold.ttf` provides
/// "DejaVu Sans", `Arial.ttf` provides "Arial". Matching ignores spaces,
/// `_` and `-` but not case, so "arial" is substituted like any unknown name.
#[derive(Debug, Clone)]
pub struct SystemFontCatalog {
    families: HashSet<String>,
    fallback: String,
}

impl SystemFontCatalog {
    /// Indexes the platform font directories.
    #[must_use]
    pub fn load() -> Self {
        Self::from_dirs(Self::default_dirs())
    }

    /// Indexes font files found under `dirs`. Missing directories are skipped.
    #[must_use]
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut families = HashSet::new();

        for dir in dirs {
            let dir = dir.as_ref();
            if !dir.is_dir() {
                continue;
            }

            for entry in WalkDir::new(dir).follow_links(true) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Skipping unreadable font entry: {}", e);
                        continue;
                    }
                };

                if let Some(stem) = font_stem(entry.path()) {
                    families.insert(normalize(stem));
                    if let Some((family, _style)) = stem.split_once('-') {
                        families.insert(normalize(family));
                    }
                }
            }
        }

        debug!("Indexed {} font families", families.len());

        Self {
            families,
            fallback: FALLBACK_FAMILY.to_string(),
        }
    }

    /// Replaces the family reported for unknown requests.
    #[must_use]
    pub fn with_fallback(mut self, family: impl Into<String>) -> Self {
        self.fallback = family.into();
        self
    }

    /// Number of indexed family keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Returns true if no font files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    fn default_dirs() -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = [
            "/usr/share/fonts",
            "/usr/local/share/fonts",
            "/Library/Fonts",
            "/System/Library/Fonts",
            "C:\\Windows\\Fonts",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect();

        roots.extend(dirs::font_dir());
        roots.extend(dirs::home_dir().map(|home| home.join(".fonts")));
        roots
    }
}

impl FontCatalog for SystemFontCatalog {
    fn resolve_family(&self, requested: &str) -> String {
        if self.families.contains(&normalize(requested)) {
            requested.to_string()
        } else {
            self.fallback.clone()
        }
    }
}

fn font_stem(path: &Path) -> Option<&str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    if !FONT_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }
    path.file_stem()?.to_str()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn catalog() -> (assert_fs::TempDir, SystemFontCatalog) {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Arial.ttf").touch().unwrap();
        temp.child("truetype/dejavu").create_dir_all().unwrap();
        temp.child("truetype/dejavu/DejaVuSans-Bold.TTF").touch().unwrap();
        temp.child("Fira_Code.otf").touch().unwrap();
        temp.child("README.txt").touch().unwrap();

        let catalog = SystemFontCatalog::from_dirs([temp.path()]);
        (temp, catalog)
    }

    #[test]
    fn test_known_families_resolve_to_themselves() {
        let (_temp, catalog) = catalog();

        assert_eq!(catalog.resolve_family("Arial"), "Arial");
        assert_eq!(catalog.resolve_family("DejaVu Sans"), "DejaVu Sans");
        assert_eq!(catalog.resolve_family("Fira Code"), "Fira Code");
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let (_temp, catalog) = catalog();

        assert_eq!(catalog.resolve_family("Aerials"), FALLBACK_FAMILY);
        assert_eq!(catalog.resolve_family("README"), FALLBACK_FAMILY);
        assert_eq!(catalog.resolve_family("Arial Black"), FALLBACK_FAMILY);
        assert_eq!(
            catalog.with_fallback("Arial").resolve_family("Aerials"),
            "Arial"
        );
    }

    #[test]
    fn test_family_case_must_match() {
        let (_temp, catalog) = catalog();

        assert_eq!(catalog.resolve_family("arial"), FALLBACK_FAMILY);
        assert_eq!(catalog.resolve_family("ARIAL"), FALLBACK_FAMILY);
        assert_eq!(catalog.resolve_family("Dejavu Sans"), FALLBACK_FAMILY);
        assert_eq!(catalog.resolve_family("DejaVu_Sans"), "DejaVu_Sans");
    }

    #[test]
    fn test_missing_dirs_are_skipped() {
        let catalog = SystemFontCatalog::from_dirs(["/nonexistent/fonts"]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("DejaVu Sans"), "DejaVuSans");
        assert_eq!(normalize("Fira_Code-Bold"), "FiraCodeBold");
    }
}
