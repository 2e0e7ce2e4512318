// src/api.rs
//! Thin HTTP adapter over `EmotionAnalyzer`. Handlers only decode, call the
//! analyzer, count, and encode.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::analyze::{self, AnalysisResult, EmotionAnalyzer};
use crate::config::ServerConfig;
use crate::emotion::Emotion;
use crate::guidance::{guidance_for, Guidance};
use crate::metrics::{self, Metrics};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<EmotionAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: EmotionAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Analyzer built from `$EMOTION_LEXICON_PATH` / `$EMOTION_SARCASM_THRESHOLD`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(EmotionAnalyzer::from_env()?))
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeReq {
    text: String,
}

/// Core routes: health, analyze, batch, guidance.
pub fn create_router(state: AppState) -> Router {
    base_routes().layer(CorsLayer::very_permissive()).with_state(state)
}

/// Core routes plus the env-gated `/debug/*` and `/metrics` routes.
pub fn router(state: AppState, cfg: &ServerConfig) -> Router {
    let mut app = base_routes();
    if cfg.debug_routes {
        app = app.merge(analyze::debug::router());
    }
    if cfg.metrics_enabled {
        if let Some(m) = Metrics::global() {
            m.set_sarcasm_threshold(state.analyzer.tables().sarcasm.threshold());
            app = app.merge(m.router());
        }
    }
    app.layer(CorsLayer::very_permissive()).with_state(state)
}

fn base_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze_one))
        .route("/batch", post(analyze_batch))
        .route("/guidance/{emotion}", get(get_guidance))
}

async fn analyze_one(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Json<AnalysisResult> {
    let res = state.analyzer.analyze(&body.text);
    metrics::record_analysis(&res);
    Json(res)
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<AnalyzeReq>>,
) -> Json<Vec<AnalysisResult>> {
    let out = items
        .iter()
        .map(|it| {
            let res = state.analyzer.analyze(&it.text);
            metrics::record_analysis(&res);
            res
        })
        .collect::<Vec<_>>();
    Json(out)
}

/// Unknown labels fall back to neutral guidance.
async fn get_guidance(Path(label): Path<String>) -> Json<Guidance> {
    Json(guidance_for(Emotion::from_label(&label)))
}
