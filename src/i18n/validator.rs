//! Translation catalog validation module.
//!
//! Translation documents are expected to share one key structure across
//! languages, but nothing enforces it at runtime: a missing key simply
//! resolves to its fallback. This validator compares every language against
//! the fallback language's tree and reports the differences.

use crate::i18n::catalog::TranslationCatalog;
use crate::i18n::language::Language;
use crate::i18n::value::{TranslationValue, ValueShape};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Structural problems: keys missing from a language or differing shapes
    pub errors: Vec<String>,

    /// Likely content problems: extra keys, placeholder or list-length drift
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog consistency.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Compare every language in `catalog` against the fallback language.
    ///
    /// This function checks that:
    /// - every reference key exists in each language (error)
    /// - values under the same key have the same shape (error)
    /// - no language has keys the reference lacks (warning)
    /// - texts use the same `{placeholder}` names (warning)
    /// - lists have the same number of items (warning)
    pub fn validate(catalog: &TranslationCatalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let reference = Language::fallback();
        let reference_tree = catalog.tree(reference);
        let reference_leaves: BTreeMap<String, ValueShape> =
            reference_tree.leaf_paths().into_iter().collect();

        for language in catalog.languages() {
            if language == reference {
                continue;
            }

            let tree = catalog.tree(language);
            let leaves: BTreeMap<String, ValueShape> = tree.leaf_paths().into_iter().collect();

            for (path, shape) in &reference_leaves {
                match leaves.get(path) {
                    None => report.errors.push(format!(
                        "[{}] missing key '{}' (present in '{}')",
                        language, path, reference
                    )),
                    Some(other) if other != shape => report.errors.push(format!(
                        "[{}] shape mismatch at '{}': expected {}, found {}",
                        language, path, shape, other
                    )),
                    Some(_) => {
                        if let (Some(expected), Some(actual)) =
                            (reference_tree.lookup_path(path), tree.lookup_path(path))
                        {
                            Self::compare_content(language, path, expected, actual, &mut report);
                        }
                    }
                }
            }

            for path in leaves.keys() {
                if !reference_leaves.contains_key(path) {
                    report.warnings.push(format!(
                        "[{}] extra key '{}' (absent in '{}')",
                        language, path, reference
                    ));
                }
            }
        }

        report
    }

    fn compare_content(
        language: Language,
        path: &str,
        expected: &TranslationValue,
        actual: &TranslationValue,
        report: &mut ValidationReport,
    ) {
        match (expected, actual) {
            (TranslationValue::Text(expected), TranslationValue::Text(actual)) => {
                let expected_names = Self::extract_placeholders(expected);
                let actual_names = Self::extract_placeholders(actual);
                if expected_names != actual_names {
                    report.warnings.push(format!(
                        "[{}] placeholder mismatch at '{}': expected {:?}, found {:?}",
                        language, path, expected_names, actual_names
                    ));
                }
            }
            (TranslationValue::List(expected), TranslationValue::List(actual)) => {
                if expected.len() != actual.len() {
                    report.warnings.push(format!(
                        "[{}] list length mismatch at '{}': expected {}, found {}",
                        language,
                        path,
                        expected.len(),
                        actual.len()
                    ));
                }
            }
            _ => {}
        }
    }

    /// Extract the distinct `{name}` placeholders of a text.
    pub fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
