//! Resolve translation keys from the command line.
//!
//! Usage:
//!   cargo run -- home.hero.title nav.services.items
//!   cargo run -- --lang en footer.copyright
//!   cargo run -- --toggle
//!
//! Optional environment variables:
//! - LANGUAGE_STORAGE_DIR (defaults to the platform config directory)
//! - TRANSLATIONS_DIR (defaults to the embedded documents)
//! - DEFAULT_LANGUAGE (overrides host locale detection on first run)

use anyhow::Result;
use chrono::{Datelike, Local};
use cpa_site_i18n::{config::Config, context::SiteContext, i18n::Variables};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cpa_site_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let ctx = SiteContext::from_config(&config)?;
    let store = ctx.store();

    let mut keys = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => match args.next() {
                Some(code) if store.set_language(&code) => {}
                Some(code) => warn!(
                    "Unsupported language '{}', keeping {}",
                    code,
                    store.current_language()
                ),
                None => warn!("--lang requires a language code"),
            },
            "--toggle" => {
                store.toggle_language();
            }
            _ => keys.push(arg),
        }
    }

    let info = store.current_language_info();
    info!("Active language: {} {} ({})", info.flag, info.label, info.code);

    let variables = Variables::new()
        .with("year", Local::now().year())
        .with("company", ctx.translator().text("common.companyName"));

    for key in &keys {
        let value = ctx.translator().resolve(key, &variables);
        println!("{} = {}", key, value);
    }

    Ok(())
}
