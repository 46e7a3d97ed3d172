// Library exports for integration tests and binaries
pub mod config;
pub mod context;
pub mod i18n;
