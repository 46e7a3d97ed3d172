//! Application context: builds the language store, catalog and root
//! translator once at startup and hands them out explicitly.

use crate::config::Config;
use crate::i18n::{
    FixedLocale, JsonFileStorage, LanguageStore, SystemLocaleDetector, TranslationCatalog,
    Translator,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub struct SiteContext {
    store: Arc<LanguageStore>,
    catalog: Arc<TranslationCatalog>,
    translator: Translator,
}

impl SiteContext {
    /// Load translations, rehydrate the language preference and run
    /// language initialization.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = match &config.translations_dir {
            Some(dir) => TranslationCatalog::from_dir(dir)
                .with_context(|| format!("Failed to load translations from {}", dir.display()))?,
            None => TranslationCatalog::embedded().context("Failed to load embedded translations")?,
        };

        let storage = JsonFileStorage::new(&config.storage_dir);
        let store = match config.default_language {
            Some(language) => LanguageStore::new(storage, FixedLocale::new(language.code())),
            None => LanguageStore::new(storage, SystemLocaleDetector),
        };

        Ok(Self::new(Arc::new(catalog), Arc::new(store)))
    }

    /// Assemble a context from already-built parts and initialize the store.
    pub fn new(catalog: Arc<TranslationCatalog>, store: Arc<LanguageStore>) -> Self {
        let language = store.initialize_language();
        info!("Site language: {}", language);

        let translator = Translator::new(Arc::clone(&catalog), Arc::clone(&store));
        Self {
            store,
            catalog,
            translator,
        }
    }

    pub fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<TranslationCatalog> {
        &self.catalog
    }

    /// The root translator (no namespace).
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// A translator scoped to `namespace`, e.g. `"home"` or `"contact.form"`.
    pub fn namespace(&self, namespace: &str) -> Translator {
        self.translator.namespaced(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dir: &TempDir, default_language: Option<Language>) -> Config {
        Config {
            storage_dir: dir.path().to_path_buf(),
            translations_dir: None,
            default_language,
        }
    }

    #[test]
    fn test_from_config_uses_default_language_override() {
        let dir = TempDir::new().unwrap();
        let ctx = SiteContext::from_config(&config(&dir, Some(Language::KOREAN))).unwrap();

        assert_eq!(ctx.store().current_language(), Language::KOREAN);
        assert_eq!(ctx.namespace("nav").text("about.label"), "회사소개");
        assert!(dir.path().join("language-storage.json").exists());
    }

    #[test]
    fn test_from_config_restores_persisted_language() {
        let dir = TempDir::new().unwrap();
        let first = SiteContext::from_config(&config(&dir, Some(Language::KOREAN))).unwrap();
        first.store().set_language("en");

        let second = SiteContext::from_config(&config(&dir, Some(Language::KOREAN))).unwrap();
        assert_eq!(second.store().current_language(), Language::ENGLISH);
        assert_eq!(second.translator().text("nav.about.label"), "About");
    }

    #[test]
    fn test_from_config_missing_translations_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, None);
        config.translations_dir = Some(PathBuf::from("/definitely/not/here"));

        let err = SiteContext::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("Failed to load translations"));
    }
}
