use crate::i18n::Language;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory name used under the platform config directory.
const APP_DIR_NAME: &str = "cpa-site-i18n";

#[derive(Debug, Clone)]
pub struct Config {
    // Persistence
    pub storage_dir: PathBuf,

    // Translations (embedded documents when unset)
    pub translations_dir: Option<PathBuf>,

    // Detection override, takes the place of the host locale
    pub default_language: Option<Language>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            storage_dir: std::env::var("LANGUAGE_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_storage_dir()),

            translations_dir: std::env::var("TRANSLATIONS_DIR").ok().map(PathBuf::from),

            default_language: match std::env::var("DEFAULT_LANGUAGE") {
                Ok(code) => Some(
                    Language::from_code(code.trim())
                        .context("DEFAULT_LANGUAGE must be a supported language code")?,
                ),
                Err(_) => None,
            },
        })
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("LANGUAGE_STORAGE_DIR");
        std::env::remove_var("TRANSLATIONS_DIR");
        std::env::remove_var("DEFAULT_LANGUAGE");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert!(config.translations_dir.is_none());
        assert!(config.default_language.is_none());
        assert!(config.storage_dir.ends_with(APP_DIR_NAME) || config.storage_dir == PathBuf::from("."));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("LANGUAGE_STORAGE_DIR", "/tmp/prefs");
        std::env::set_var("TRANSLATIONS_DIR", "/tmp/locales");
        std::env::set_var("DEFAULT_LANGUAGE", "ko");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/prefs"));
        assert_eq!(config.translations_dir, Some(PathBuf::from("/tmp/locales")));
        assert_eq!(config.default_language, Some(Language::KOREAN));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_default_language() {
        clear_env();
        std::env::set_var("DEFAULT_LANGUAGE", "fr");

        let result = Config::from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("DEFAULT_LANGUAGE"));
    }
}
