//! Language type: Flexible, validated language representation.
//!
//! A `Language` can only be constructed for codes that are registered and
//! enabled in the [`LanguageRegistry`], which is what keeps the store's
//! selected language inside the supported set.

use crate::i18n::registry::{LanguageConfig, LanguageRegistry, TextDirection};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "ko", "en")
    code: &'static str,
}

impl Language {
    pub const KOREAN: Language = Language { code: "ko" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the fallback language (English).
    pub fn fallback() -> Language {
        let config = LanguageRegistry::get().fallback();
        Language { code: config.code }
    }

    /// Map a host locale string (e.g. "ko-KR", "ko_KR.UTF-8", "en-US") to a
    /// supported language.
    ///
    /// Korean is selected when the locale starts with `ko`, compared
    /// case-insensitively; every other locale maps to the fallback.
    pub fn from_locale(locale: &str) -> Language {
        if locale.to_lowercase().starts_with("ko") {
            Language::KOREAN
        } else {
            Language::fallback()
        }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn locale_tag(&self) -> &'static str {
        self.config().locale_tag
    }

    pub fn has_plural_forms(&self) -> bool {
        self.config().has_plural_forms
    }

    pub fn direction(&self) -> TextDirection {
        TextDirection::for_code(self.code)
    }

    /// The other primary language (`ko` <-> `en`).
    pub fn toggled(&self) -> Language {
        if *self == Language::KOREAN {
            Language::ENGLISH
        } else {
            Language::KOREAN
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_korean_constant() {
        let korean = Language::KOREAN;
        assert_eq!(korean.code(), "ko");
        assert_eq!(korean.label(), "한국어");
        assert_eq!(korean.locale_tag(), "ko-KR");
        assert!(!korean.has_plural_forms());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.label(), "English");
        assert!(english.has_plural_forms());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_korean() {
        let language = Language::from_code("ko").expect("Should succeed");
        assert_eq!(language, Language::KOREAN);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("KO").is_err());
    }

    // ==================== from_locale Tests ====================

    #[test]
    fn test_from_locale_korean_variants() {
        assert_eq!(Language::from_locale("ko"), Language::KOREAN);
        assert_eq!(Language::from_locale("ko-KR"), Language::KOREAN);
        assert_eq!(Language::from_locale("KO_kr.UTF-8"), Language::KOREAN);
    }

    #[test]
    fn test_from_locale_other_falls_back_to_english() {
        assert_eq!(Language::from_locale("en-US"), Language::ENGLISH);
        assert_eq!(Language::from_locale("ja-JP"), Language::ENGLISH);
        assert_eq!(Language::from_locale(""), Language::ENGLISH);
    }

    // ==================== Misc Tests ====================

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(Language::fallback(), Language::ENGLISH);
    }

    #[test]
    fn test_toggled_round_trip() {
        assert_eq!(Language::KOREAN.toggled(), Language::ENGLISH);
        assert_eq!(Language::ENGLISH.toggled(), Language::KOREAN);
        assert_eq!(Language::KOREAN.toggled().toggled(), Language::KOREAN);
    }

    #[test]
    fn test_direction_is_ltr_for_supported_languages() {
        assert_eq!(Language::KOREAN.direction(), TextDirection::Ltr);
        assert_eq!(Language::ENGLISH.direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::KOREAN.to_string(), "ko");
        assert_eq!(format!("{}", Language::ENGLISH), "en");
    }
}
