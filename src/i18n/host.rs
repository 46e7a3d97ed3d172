//! Host environment collaborators of the language store: locale detection
//! and the document-level `lang`/`dir` attributes.

use crate::i18n::registry::TextDirection;
use serde::Serialize;
use std::sync::Mutex;
use tracing::debug;

/// Reports the host's preferred locale (e.g. "ko-KR").
pub trait LocaleDetector: Send + Sync {
    fn detect(&self) -> Option<String>;
}

/// Reads the operating system locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleDetector;

impl LocaleDetector for SystemLocaleDetector {
    fn detect(&self) -> Option<String> {
        let locale = sys_locale::get_locale();
        debug!("Detected system locale: {:?}", locale);
        locale
    }
}

/// Always reports the same locale. Used for configured overrides and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(pub Option<String>);

impl FixedLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(Some(locale.into()))
    }

    /// A detector that finds no locale at all.
    pub fn none() -> Self {
        Self(None)
    }
}

impl LocaleDetector for FixedLocale {
    fn detect(&self) -> Option<String> {
        self.0.clone()
    }
}

/// The `lang`/`dir` pair applied to the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageAttributes {
    pub lang: String,
    pub dir: TextDirection,
}

/// Sink for the global presentation attributes that follow the selected
/// language.
///
/// `apply` runs while the store holds its selection lock, so it must not
/// call back into the store.
pub trait DocumentAttributes: Send + Sync {
    fn apply(&self, attributes: &LanguageAttributes);
}

/// Keeps the most recently applied attributes in memory.
#[derive(Debug, Default)]
pub struct DocumentRoot {
    current: Mutex<Option<LanguageAttributes>>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes last applied, `None` before the store touched the document.
    pub fn current(&self) -> Option<LanguageAttributes> {
        self.current.lock().ok().and_then(|current| current.clone())
    }
}

impl DocumentAttributes for DocumentRoot {
    fn apply(&self, attributes: &LanguageAttributes) {
        debug!(
            "Applying document attributes lang={} dir={}",
            attributes.lang, attributes.dir
        );
        if let Ok(mut current) = self.current.lock() {
            *current = Some(attributes.clone());
        }
    }
}
