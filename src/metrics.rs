// src/metrics.rs
//! Prometheus exposition for the HTTP adapter.
//!
//! The recorder is process-global and can only be installed once, so
//! `Metrics::global()` installs on first use and hands out the same handle
//! afterwards. Counters are recorded from the API layer only; the analyzer
//! itself stays free of side effects.

use axum::{routing::get, Router};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::analyze::AnalysisResult;

static GLOBAL: OnceCell<Metrics> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process). Returns `None` if
    /// another recorder already owns the slot.
    pub fn global() -> Option<&'static Metrics> {
        GLOBAL
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new().install_recorder()?;
                Ok::<_, metrics_exporter_prometheus::BuildError>(Self { handle })
            })
            .map_err(|e| warn!(target: "emotion", error = %e, "prometheus recorder not installed"))
            .ok()
    }

    /// Static gauge with the active sarcasm threshold.
    pub fn set_sarcasm_threshold(&self, threshold: f64) {
        gauge!("emotion_sarcasm_threshold").set(threshold);
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Per-analysis counters. No-op while no recorder is installed.
pub fn record_analysis(result: &AnalysisResult) {
    counter!("emotion_analyses_total", "emotion" => result.emotion.as_str()).increment(1);
    if result.sarcasm_detected {
        counter!("emotion_sarcasm_detected_total").increment(1);
    }
    if result.negation_detected {
        counter!("emotion_negation_detected_total").increment(1);
    }
}
