//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages the site can
//! be displayed in. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access. The registry is read-only static
//! metadata; the *selected* language lives in
//! [`LanguageStore`](crate::i18n::LanguageStore).

use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Language codes that are written right-to-left.
pub const RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur"];

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction for a language code, derived from [`RTL_LANGUAGES`].
    pub fn for_code(code: &str) -> TextDirection {
        if RTL_LANGUAGES.contains(&code) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a supported language.
///
/// Contains all metadata for a specific language: its code, display labels,
/// the regional locale tag used for number formatting, and whether the
/// language distinguishes plural forms.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "ko", "en")
    pub code: &'static str,

    /// Display label in the language itself (e.g., "한국어", "English")
    pub label: &'static str,

    /// Short label for compact toggles (e.g., "KO", "EN")
    pub short_label: &'static str,

    /// Flag glyph shown next to the label
    pub flag: &'static str,

    /// Regional locale tag used for formatting (e.g., "ko-KR", "en-US")
    pub locale_tag: &'static str,

    /// Date pattern shown to visitors (e.g., "YYYY년 MM월 DD일")
    pub date_pattern: &'static str,

    /// Whether the language distinguishes singular and plural nouns
    pub has_plural_forms: bool,

    /// Whether this is the fallback language used when detection fails
    pub is_fallback: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

impl LanguageConfig {
    /// Text direction of this language.
    pub fn direction(&self) -> TextDirection {
        TextDirection::for_code(self.code)
    }
}

/// Global language registry singleton.
///
/// This registry contains all supported languages and provides methods to query
/// and access them. It's initialized once on first access and remains immutable
/// thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the fallback language configuration.
    ///
    /// The fallback language is selected when the host locale cannot be
    /// matched to any other supported language.
    ///
    /// # Panics
    /// Panics if no fallback language is found or if multiple fallback
    /// languages are defined (this indicates a configuration error).
    pub fn fallback(&self) -> &LanguageConfig {
        let fallback_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_fallback)
            .collect();

        match fallback_langs.len() {
            0 => panic!("No fallback language found in registry"),
            1 => fallback_langs[0],
            _ => panic!("Multiple fallback languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Default language configurations.
///
/// Korean is listed first because it is the site's primary audience; English
/// is the fallback for every other visitor locale.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "ko",
            label: "한국어",
            short_label: "KO",
            flag: "🇰🇷",
            locale_tag: "ko-KR",
            date_pattern: "YYYY년 MM월 DD일",
            has_plural_forms: false,
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            label: "English",
            short_label: "EN",
            flag: "🇺🇸",
            locale_tag: "en-US",
            date_pattern: "MMM DD, YYYY",
            has_plural_forms: true,
            is_fallback: true,
            enabled: true,
        },
    ]
}
