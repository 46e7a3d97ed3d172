//! Language preference store: the single source of truth for the language
//! the site is displayed in.
//!
//! The store is constructed explicitly and handed to every consumer (usually
//! as `Arc<LanguageStore>`). Its collaborators are injected:
//!
//! - [`PreferenceStorage`] persists the selection across restarts
//! - [`LocaleDetector`] supplies the host locale on first run
//! - [`DocumentAttributes`] receives the `lang`/`dir` pair on every change
//! - [`LocaleFormatter`] formats numbers, currency and dates
//!
//! Every change is published on a `watch` channel so views can re-resolve
//! their translations.

use crate::i18n::format::{LocaleFormatter, StandardFormatter};
use crate::i18n::host::{DocumentAttributes, DocumentRoot, LanguageAttributes, LocaleDetector};
use crate::i18n::language::Language;
use crate::i18n::persistence::{PersistedState, PreferenceStorage};
use crate::i18n::registry::{LanguageConfig, TextDirection};
use chrono::NaiveDate;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Currency used by [`LanguageStore::format_currency`] when none is given.
pub const DEFAULT_CURRENCY: &str = "USD";

pub struct LanguageStore {
    current: RwLock<Language>,
    storage: Box<dyn PreferenceStorage>,
    detector: Box<dyn LocaleDetector>,
    document: Arc<dyn DocumentAttributes>,
    formatter: Box<dyn LocaleFormatter>,
    changes: watch::Sender<Language>,
}

impl LanguageStore {
    /// Create a store and rehydrate the selection from `storage`.
    ///
    /// Without a valid persisted record the store starts on the fallback
    /// language until [`initialize_language`](Self::initialize_language)
    /// runs detection. Construction never touches the document.
    pub fn new<S, D>(storage: S, detector: D) -> Self
    where
        S: PreferenceStorage + 'static,
        D: LocaleDetector + 'static,
    {
        let initial = load_persisted(&storage).unwrap_or_else(Language::fallback);
        let (changes, _) = watch::channel(initial);

        Self {
            current: RwLock::new(initial),
            storage: Box::new(storage),
            detector: Box::new(detector),
            document: Arc::new(DocumentRoot::new()),
            formatter: Box::new(StandardFormatter::new()),
            changes,
        }
    }

    /// Replace the document attribute sink.
    pub fn with_document(mut self, document: Arc<dyn DocumentAttributes>) -> Self {
        self.document = document;
        self
    }

    /// Replace the locale formatter.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: LocaleFormatter + 'static,
    {
        self.formatter = Box::new(formatter);
        self
    }

    // ==================== Selection ====================

    pub fn current_language(&self) -> Language {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select `code` if it is a supported language.
    ///
    /// The choice is persisted synchronously and applied to the document.
    /// Unsupported codes leave the store untouched. Returns whether the code
    /// was accepted.
    pub fn set_language(&self, code: &str) -> bool {
        let language = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                debug!("Ignoring language change: {}", e);
                return false;
            }
        };

        self.update(true, |_| language);
        info!("Language changed to {}", language);
        true
    }

    /// Switch between Korean and English.
    pub fn toggle_language(&self) -> Language {
        let next = self.update(true, |current| current.toggled());
        info!("Language changed to {}", next);
        next
    }

    /// Startup routine, safe to call more than once.
    ///
    /// A valid persisted language wins and detection is skipped. Otherwise
    /// the host locale decides: anything starting with `ko` selects Korean,
    /// everything else (including no locale at all) selects English.
    pub fn initialize_language(&self) -> Language {
        if let Some(language) = load_persisted(self.storage.as_ref()) {
            debug!("Restored persisted language {}", language);
            self.update(false, |_| language);
            return language;
        }

        let language = match self.detector.detect() {
            Some(locale) => Language::from_locale(&locale),
            None => {
                debug!("No host locale available, using fallback language");
                Language::fallback()
            }
        };

        info!("Detected initial language {}", language);
        self.update(true, |_| language)
    }

    /// Receiver notified with the new language after every change.
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.changes.subscribe()
    }

    // ==================== Derived information ====================

    pub fn current_language_info(&self) -> &'static LanguageConfig {
        self.current_language().config()
    }

    pub fn text_direction(&self) -> TextDirection {
        self.current_language().direction()
    }

    pub fn language_attributes(&self) -> LanguageAttributes {
        attributes_for(self.current_language())
    }

    // ==================== Formatting ====================

    pub fn format_number(&self, value: f64) -> String {
        self.formatter
            .format_number(value, self.current_language().locale_tag())
    }

    /// Format `value` as money; `None` formats in [`DEFAULT_CURRENCY`].
    pub fn format_currency(&self, value: f64, currency: Option<&str>) -> String {
        self.formatter.format_currency(
            value,
            currency.unwrap_or(DEFAULT_CURRENCY),
            self.current_language().locale_tag(),
        )
    }

    /// Date pattern of the active language, e.g. `"MMM DD, YYYY"`.
    pub fn date_format(&self) -> &'static str {
        self.current_language_info().date_pattern
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        self.formatter.format_date(date, self.date_format())
    }

    // ==================== Internals ====================

    /// Replace the selection with `next(current)` and propagate it.
    ///
    /// The write lock is held until the document, subscribers and (when
    /// `persist` is set) storage have all seen the new language, so
    /// concurrent changes are applied in one order everywhere.
    fn update<F>(&self, persist: bool, next: F) -> Language
    where
        F: FnOnce(Language) -> Language,
    {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let language = next(*current);
        *current = language;

        self.document.apply(&attributes_for(language));
        self.changes.send_replace(language);
        if persist {
            self.persist(language);
        }
        language
    }

    fn persist(&self, language: Language) {
        let result = PersistedState::new(language.code())
            .encode()
            .and_then(|raw| self.storage.save(&raw));

        if let Err(e) = result {
            warn!("Failed to persist language preference '{}': {:#}", language, e);
        }
    }
}

fn attributes_for(language: Language) -> LanguageAttributes {
    LanguageAttributes {
        lang: language.code().to_string(),
        dir: language.direction(),
    }
}

/// Read the persisted language; absent, unreadable, malformed or unsupported
/// records all count as "nothing persisted".
fn load_persisted(storage: &dyn PreferenceStorage) -> Option<Language> {
    let raw = match storage.load() {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Failed to read language preference: {:#}", e);
            return None;
        }
    };

    let state = PersistedState::parse(&raw)?;
    match Language::from_code(&state.state.current_language) {
        Ok(language) => Some(language),
        Err(e) => {
            warn!("Ignoring persisted language preference: {}", e);
            None
        }
    }
}
