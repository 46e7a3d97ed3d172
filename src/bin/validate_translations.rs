//! Validate translation documents - checks that every language shares the
//! fallback language's key structure and placeholders.
//!
//! Usage:
//!   cargo run --bin validate-translations                  # Embedded documents
//!   TRANSLATIONS_DIR=locales cargo run --bin validate-translations
//!
//! Prints a JSON report, plus resolution metrics from resolving every
//! fallback-language key in each language, and exits with status 1 when
//! errors are found.

use anyhow::{Context, Result};
use cpa_site_i18n::i18n::{
    CatalogValidator, FixedLocale, Language, LanguageStore, MemoryStorage, MetricsReport,
    TranslationCatalog, Translator, ValidationReport,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Serialize)]
struct Output<'a> {
    source: String,
    languages: Vec<&'static str>,
    report: &'a ValidationReport,
    metrics: MetricsReport,
}

/// Resolve every key of the fallback tree in each language, twice, so the
/// report covers both cold lookups and cache hits.
fn resolve_all(catalog: Arc<TranslationCatalog>) -> MetricsReport {
    let keys: Vec<String> = catalog
        .tree(Language::fallback())
        .leaf_paths()
        .into_iter()
        .map(|(path, _)| path)
        .collect();
    let languages = catalog.languages();

    let store = Arc::new(LanguageStore::new(MemoryStorage::new(), FixedLocale::none()));
    let translator = Translator::new(catalog, Arc::clone(&store));

    for language in languages {
        store.set_language(language.code());
        for _ in 0..2 {
            for key in &keys {
                translator.t(key);
            }
        }
    }

    translator.metrics().report()
}

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("validate_translations=info".parse()?),
        )
        .init();

    let translations_dir = std::env::var("TRANSLATIONS_DIR").ok().map(PathBuf::from);
    let (catalog, source) = match &translations_dir {
        Some(dir) => (
            TranslationCatalog::from_dir(dir)
                .with_context(|| format!("Failed to load translations from {}", dir.display()))?,
            dir.display().to_string(),
        ),
        None => (
            TranslationCatalog::embedded().context("Failed to load embedded translations")?,
            "embedded".to_string(),
        ),
    };

    let report = CatalogValidator::validate(&catalog);
    let languages = catalog.languages().iter().map(|lang| lang.code()).collect();
    let metrics = resolve_all(Arc::new(catalog));
    let output = Output {
        source,
        languages,
        report: &report,
        metrics,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if report.has_errors() {
        warn!(
            "✗ {} errors, {} warnings",
            report.errors.len(),
            report.warnings.len()
        );
        std::process::exit(1);
    }

    info!(
        "✓ Translations valid ({} warnings, {} missing keys)",
        report.warnings.len(),
        output.metrics.missing_keys
    );
    Ok(())
}
