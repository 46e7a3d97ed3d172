//! Resolution metrics and observability module.
//!
//! Counts how translators are used: total resolutions, cache hits, and keys
//! that fell back because no translation exists. One instance is shared by a
//! translator and every translator derived from it.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Number of key lookups performed
    resolutions: AtomicUsize,

    /// Number of lookups answered from a translator cache
    cache_hits: AtomicUsize,

    /// Number of lookups that hit the missing-key fallback
    missing_keys: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key lookup.
    pub fn record_resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup answered from cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup for a key with no translation.
    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let resolutions = self.resolutions();
        let hits = self.cache_hits();
        let missing = self.missing_keys();

        let cache_hit_rate = if resolutions > 0 {
            (hits as f64 / resolutions as f64) * 100.0
        } else {
            0.0
        };

        let missing_rate = if resolutions > 0 {
            (missing as f64 / resolutions as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            resolutions,
            cache_hits: hits,
            cache_hit_rate,
            missing_keys: missing,
            missing_rate,
        }
    }
}

/// Metrics report containing current resolution statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of key lookups
    pub resolutions: usize,

    /// Number of cache hits
    pub cache_hits: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    /// Number of lookups without a translation
    pub missing_keys: usize,

    /// Missing-key rate as a percentage (0-100)
    pub missing_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ResolutionMetrics::new();
        assert_eq!(metrics.resolutions(), 0);
        assert_eq!(metrics.cache_hits(), 0);
        assert_eq!(metrics.missing_keys(), 0);
    }

    #[test]
    fn test_record_counters() {
        let metrics = ResolutionMetrics::new();
        metrics.record_resolution();
        metrics.record_resolution();
        metrics.record_cache_hit();
        metrics.record_missing_key();

        assert_eq!(metrics.resolutions(), 2);
        assert_eq!(metrics.cache_hits(), 1);
        assert_eq!(metrics.missing_keys(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = ResolutionMetrics::new().report();
        assert_eq!(report.resolutions, 0);
        assert_eq!(report.cache_hit_rate, 0.0);
        assert_eq!(report.missing_rate, 0.0);
    }

    #[test]
    fn test_report_rates() {
        let metrics = ResolutionMetrics::new();
        for _ in 0..4 {
            metrics.record_resolution();
        }
        for _ in 0..3 {
            metrics.record_cache_hit();
        }
        metrics.record_missing_key();

        let report = metrics.report();
        assert_eq!(report.cache_hit_rate, 75.0);
        assert_eq!(report.missing_rate, 25.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = ResolutionMetrics::new();
        metrics.record_resolution();

        let json = serde_json::to_value(metrics.report()).unwrap();
        assert_eq!(json["resolutions"], 1);
        assert_eq!(json["cache_hits"], 0);
        assert_eq!(json["missing_keys"], 0);
    }
}
