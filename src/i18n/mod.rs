//! Internationalization (i18n) module for the site's Korean/English content.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` handle
//! - `value`: Translation tree values (`Text | List | Map | Scalar`)
//! - `catalog`: Immutable translation trees, one per language
//! - `store`: The language preference store (selection, persistence, formatting)
//! - `persistence`: Durable storage backends for the selected language
//! - `host`: Locale detection and document `lang`/`dir` attributes
//! - `format`: Locale-aware number, currency and date formatting
//! - `translator`: Dotted-key resolution with namespaces and interpolation
//! - `validator`: Cross-language catalog consistency checks
//! - `metrics`: Resolution counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::i18n::{JsonFileStorage, LanguageStore, SystemLocaleDetector, TranslationCatalog, Translator};
//!
//! let store = Arc::new(LanguageStore::new(JsonFileStorage::new(dir), SystemLocaleDetector));
//! store.initialize_language();
//!
//! let translator = Translator::new(Arc::new(TranslationCatalog::embedded()?), store);
//! let title = translator.namespaced("home").text("hero.title");
//! ```

mod catalog;
mod format;
mod host;
mod language;
mod metrics;
mod persistence;
mod registry;
mod store;
mod translator;
mod validator;
mod value;

pub use catalog::{CatalogError, TranslationCatalog};
pub use format::{LocaleFormatter, NumberConventions, StandardFormatter};
pub use host::{
    DocumentAttributes, DocumentRoot, FixedLocale, LanguageAttributes, LocaleDetector,
    SystemLocaleDetector,
};
pub use language::Language;
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use persistence::{
    JsonFileStorage, MemoryStorage, PersistedState, PreferenceStorage, StorageError, STORAGE_KEY,
};
pub use registry::{LanguageConfig, LanguageRegistry, TextDirection, RTL_LANGUAGES};
pub use store::{LanguageStore, DEFAULT_CURRENCY};
pub use translator::{Translator, Variables};
pub use validator::{CatalogValidator, ValidationReport};
pub use value::{Scalar, TranslationMap, TranslationValue, ValueShape};
