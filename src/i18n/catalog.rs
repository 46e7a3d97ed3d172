//! Translation catalog: one immutable translation tree per language.
//!
//! The site's documents (`locales/<code>.json`) are embedded at compile time.
//! A directory with the same layout can be loaded instead when translators
//! want to iterate on copy without rebuilding.

use crate::i18n::language::Language;
use crate::i18n::registry::LanguageRegistry;
use crate::i18n::value::{TranslationMap, TranslationValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, info};

const EMBEDDED_KO: &str = include_str!("../../locales/ko.json");
const EMBEDDED_EN: &str = include_str!("../../locales/en.json");

static EMPTY_TREE: OnceLock<TranslationValue> = OnceLock::new();

/// Errors raised while loading translation documents.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read translations from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translation document for '{language}'")]
    Parse {
        language: Language,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation document for '{0}' must be a JSON object at the top level")]
    NotAnObject(Language),

    #[error("no translation document loaded for '{0}'")]
    MissingLanguage(Language),
}

/// Read-only store of translation trees keyed by language.
#[derive(Debug)]
pub struct TranslationCatalog {
    trees: HashMap<Language, Arc<TranslationValue>>,
}

impl TranslationCatalog {
    /// Load the documents compiled into the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_sources([
            (Language::KOREAN, EMBEDDED_KO),
            (Language::ENGLISH, EMBEDDED_EN),
        ])
    }

    /// Load `<dir>/<code>.json` for every enabled language.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut sources = Vec::new();
        for config in LanguageRegistry::get().list_enabled() {
            let path = dir.join(format!("{}.json", config.code));
            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            debug!("Read translation document {}", path.display());
            // Registry entries are enabled, so from_code cannot fail here
            if let Ok(language) = Language::from_code(config.code) {
                sources.push((language, raw));
            }
        }

        info!("Loaded translations from {}", dir.display());
        Self::from_sources(sources)
    }

    /// Parse raw JSON documents. Every enabled language must be present.
    pub fn from_sources<I, S>(sources: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Language, S)>,
        S: AsRef<str>,
    {
        let mut trees = Vec::new();
        for (language, raw) in sources {
            let tree: TranslationValue = serde_json::from_str(raw.as_ref())
                .map_err(|source| CatalogError::Parse { language, source })?;
            trees.push((language, tree));
        }
        Self::from_trees(trees)
    }

    /// Build a catalog from already-parsed trees.
    pub fn from_trees<I>(trees: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Language, TranslationValue)>,
    {
        let mut loaded = HashMap::new();
        for (language, tree) in trees {
            if tree.as_map().is_none() {
                return Err(CatalogError::NotAnObject(language));
            }
            loaded.insert(language, Arc::new(tree));
        }

        for config in LanguageRegistry::get().list_enabled() {
            if let Ok(language) = Language::from_code(config.code) {
                if !loaded.contains_key(&language) {
                    return Err(CatalogError::MissingLanguage(language));
                }
            }
        }

        Ok(Self { trees: loaded })
    }

    /// Root of the translation tree for `language`.
    ///
    /// Returns an empty map for a language without a document, which only
    /// happens for catalogs built before a language was enabled.
    pub fn tree(&self, language: Language) -> &TranslationValue {
        self.trees
            .get(&language)
            .map(Arc::as_ref)
            .unwrap_or_else(|| {
                EMPTY_TREE.get_or_init(|| TranslationValue::Map(TranslationMap::new()))
            })
    }

    /// Languages with a loaded document, in registry order.
    pub fn languages(&self) -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .filter_map(|config| Language::from_code(config.code).ok())
            .filter(|language| self.trees.contains_key(language))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_catalog_loads_all_languages() {
        let catalog = TranslationCatalog::embedded().expect("embedded documents parse");
        assert_eq!(catalog.languages(), vec![Language::KOREAN, Language::ENGLISH]);
    }

    #[test]
    fn test_embedded_catalog_content() {
        let catalog = TranslationCatalog::embedded().unwrap();
        assert_eq!(
            catalog.tree(Language::KOREAN).lookup_path("nav.about.label").and_then(|v| v.as_str()),
            Some("회사소개")
        );
        assert_eq!(
            catalog.tree(Language::ENGLISH).lookup_path("nav.about.label").and_then(|v| v.as_str()),
            Some("About")
        );
    }

    #[test]
    fn test_missing_language_is_rejected() {
        let result = TranslationCatalog::from_sources([(Language::ENGLISH, "{}")]);
        assert!(matches!(result, Err(CatalogError::MissingLanguage(lang)) if lang == Language::KOREAN));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let result = TranslationCatalog::from_sources([
            (Language::KOREAN, r#"["a"]"#),
            (Language::ENGLISH, "{}"),
        ]);
        assert!(matches!(result, Err(CatalogError::NotAnObject(_))));
    }

    #[test]
    fn test_malformed_document_is_rejected() {
        let result = TranslationCatalog::from_sources([
            (Language::KOREAN, "{ not json"),
            (Language::ENGLISH, "{}"),
        ]);
        let err = result.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("'ko'"));
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ko.json"), r#"{"a": {"b": "가"}}"#).unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"a": {"b": "A"}}"#).unwrap();

        let catalog = TranslationCatalog::from_dir(dir.path()).unwrap();
        assert_eq!(
            catalog.tree(Language::KOREAN).lookup_path("a.b").and_then(|v| v.as_str()),
            Some("가")
        );
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("en.json"), "{}").unwrap();

        let result = TranslationCatalog::from_dir(dir.path());
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
