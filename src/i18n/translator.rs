//! Dotted-key translator.
//!
//! A [`Translator`] resolves keys such as `"home.hero.title"` against the
//! translation tree of the store's active language. Translators can be bound
//! to a namespace, in which case every key is resolved relative to it:
//!
//! ```rust,ignore
//! let home = translator.namespaced("home");
//! assert_eq!(home.t("hero.title"), translator.t("home.hero.title"));
//! ```
//!
//! Lookups never fail. A missing key logs a warning and resolves to either
//! an empty list (for `*.features` / `*.items` keys) or the key itself, so
//! untranslated copy is easy to spot on the page.

use crate::i18n::catalog::TranslationCatalog;
use crate::i18n::host::LanguageAttributes;
use crate::i18n::language::Language;
use crate::i18n::metrics::ResolutionMetrics;
use crate::i18n::store::LanguageStore;
use crate::i18n::value::{TranslationMap, TranslationValue};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::warn;

/// Last key segments whose values are expected to be lists.
const LIST_SHAPED_SEGMENTS: &[&str] = &["features", "items"];

/// Suffix of the explicit plural entry for a key (`unit` -> `unitPlural`).
const PLURAL_KEY_SUFFIX: &str = "Plural";

/// Suffix appended to a singular text when no plural entry exists.
const PLURAL_TEXT_SUFFIX: &str = "s";

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Named values substituted into `{name}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, stringifying its value.
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.entries.push((name.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace every `{name}` in `template` with its variable, in one pass.
    ///
    /// Placeholders without a variable stay literal; variables without a
    /// placeholder are ignored. Substituted values are never expanded again.
    pub fn interpolate(&self, template: &str) -> String {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^{}]+)\}").unwrap());

        regex
            .replace_all(template, |caps: &Captures| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

type CacheKey = (Language, String);

/// Resolves translation keys for the store's active language.
pub struct Translator {
    catalog: Arc<TranslationCatalog>,
    store: Arc<LanguageStore>,
    namespace: Option<String>,
    cache: Mutex<HashMap<CacheKey, TranslationValue>>,
    metrics: Arc<ResolutionMetrics>,
}

impl Translator {
    pub fn new(catalog: Arc<TranslationCatalog>, store: Arc<LanguageStore>) -> Self {
        Self {
            catalog,
            store,
            namespace: None,
            cache: Mutex::new(HashMap::new()),
            metrics: Arc::new(ResolutionMetrics::new()),
        }
    }

    /// A translator whose keys are resolved under `namespace`.
    ///
    /// Namespaces nest: binding `"process"` on a translator bound to `"home"`
    /// resolves keys under `"home.process"`. Any string works, no
    /// registration is needed. An empty namespace binds nothing new.
    pub fn namespaced(&self, namespace: &str) -> Translator {
        let namespace = if namespace.is_empty() {
            self.namespace.clone()
        } else {
            Some(self.full_key(namespace))
        };

        Translator {
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
            namespace,
            cache: Mutex::new(HashMap::new()),
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<ResolutionMetrics> {
        &self.metrics
    }

    // ==================== Resolution ====================

    /// Resolve `key` and interpolate `variables` into text values.
    pub fn resolve(&self, key: &str, variables: &Variables) -> TranslationValue {
        let full_key = self.full_key(key);
        let language = self.store.current_language();
        self.metrics.record_resolution();

        let value = match self.lookup(language, &full_key) {
            Some((value, cached)) => {
                if cached {
                    self.metrics.record_cache_hit();
                }
                value
            }
            None => {
                self.metrics.record_missing_key();
                warn!(
                    "Translation missing for key: {} in language: {}",
                    full_key, language
                );
                return missing_fallback(full_key);
            }
        };

        match value {
            TranslationValue::Text(template) if !variables.is_empty() => {
                TranslationValue::Text(variables.interpolate(&template))
            }
            other => other,
        }
    }

    /// Resolve `key` without variables.
    pub fn t(&self, key: &str) -> TranslationValue {
        self.resolve(key, &Variables::new())
    }

    /// Resolve `key` and render it as a string.
    pub fn text(&self, key: &str) -> String {
        self.t(key).to_string()
    }

    /// The raw sub-tree at `subpath` (relative to the bound namespace).
    ///
    /// Returns an empty map when a segment is missing, an intermediate value
    /// is not a map, or the target itself is not a map.
    pub fn resolve_namespace(&self, subpath: &str) -> TranslationMap {
        let full_key = self.full_key(subpath);
        let language = self.store.current_language();

        match self.lookup(language, &full_key) {
            Some((TranslationValue::Map(map), _)) => map,
            _ => TranslationMap::new(),
        }
    }

    /// Resolve `key` as a list, empty when the value is not a list.
    pub fn resolve_list(&self, key: &str) -> Vec<String> {
        self.t(key).into_list()
    }

    /// Resolve a countable noun.
    ///
    /// Languages with plural forms use the explicit `<key>Plural` entry when
    /// `count != 1`, or append `"s"` to the singular text when there is none.
    /// Languages without plural forms always get the singular.
    pub fn resolve_plural(&self, key: &str, count: i64) -> TranslationValue {
        let language = self.store.current_language();
        let singular = self.t(key);

        if !language.has_plural_forms() || count == 1 {
            return singular;
        }

        let plural_key = format!("{}{}", key, PLURAL_KEY_SUFFIX);
        if self.has_translation(&plural_key) {
            return self.t(&plural_key);
        }

        match singular {
            TranslationValue::Text(text) if self.has_translation(key) => {
                TranslationValue::Text(format!("{}{}", text, PLURAL_TEXT_SUFFIX))
            }
            other => other,
        }
    }

    /// Whether `key` resolves to a value. Never logs or counts.
    pub fn has_translation(&self, key: &str) -> bool {
        let full_key = self.full_key(key);
        self.lookup(self.store.current_language(), &full_key)
            .is_some()
    }

    // ==================== Language helpers ====================

    pub fn current_language(&self) -> Language {
        self.store.current_language()
    }

    pub fn is_korean(&self) -> bool {
        self.current_language() == Language::KOREAN
    }

    pub fn is_english(&self) -> bool {
        self.current_language() == Language::ENGLISH
    }

    /// Pick between a Korean and an English value by the active language.
    pub fn lang_conditional<T>(&self, ko_value: T, en_value: T) -> T {
        if self.is_korean() {
            ko_value
        } else {
            en_value
        }
    }

    /// CSS class hook for language-specific styling, e.g. `"lang-ko"`.
    pub fn language_class(&self) -> String {
        format!("lang-{}", self.current_language().code())
    }

    pub fn language_attributes(&self) -> LanguageAttributes {
        self.store.language_attributes()
    }

    // ==================== Internals ====================

    fn full_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, key),
            None => key.to_string(),
        }
    }

    /// Walk the tree for `full_key`, memoized per (language, key). The flag
    /// tells whether the value came from the cache.
    ///
    /// Only found values are cached, so the cache is bounded by the catalog
    /// no matter which keys callers ask for.
    fn lookup(&self, language: Language, full_key: &str) -> Option<(TranslationValue, bool)> {
        let cache_key = (language, full_key.to_string());

        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&cache_key) {
                return Some((cached.clone(), true));
            }
        }

        let value = self
            .catalog
            .tree(language)
            .lookup_path(full_key)
            .cloned()?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(cache_key, value.clone());
        }
        Some((value, false))
    }

    #[cfg(test)]
    fn cached_entries(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or_default()
    }
}

fn missing_fallback(full_key: String) -> TranslationValue {
    let mut segments = full_key.rsplit('.');
    let last = segments.next().unwrap_or_default();
    let has_parent = segments.next().is_some();

    if has_parent && LIST_SHAPED_SEGMENTS.contains(&last) {
        TranslationValue::List(Vec::new())
    } else {
        TranslationValue::Text(full_key)
    }
}
