//! Debug endpoints: inspect the loaded tables and preview one analysis with
//! its raw scores. Mounted by `api::router` only when `DEBUG_ROUTES=1`.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::Analysis;
use crate::api::AppState;
use crate::emotion::EmotionCategory;

#[derive(Debug, Serialize)]
pub struct TablesOut {
    pub keywords: usize,
    pub modifiers: usize,
    pub sarcasm_threshold: f64,
    pub opposites: Vec<(EmotionCategory, EmotionCategory)>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub text: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/debug/tables", get(get_tables))
        .route("/debug/analyze", get(get_analyze_preview))
}

async fn get_tables(State(state): State<AppState>) -> Json<TablesOut> {
    let t = state.analyzer.tables();
    Json(TablesOut {
        keywords: t.lexicon.len(),
        modifiers: t.modifiers.len(),
        sarcasm_threshold: t.sarcasm.threshold(),
        opposites: EmotionCategory::ALL
            .into_iter()
            .map(|c| (c, t.opposites.of(c)))
            .collect(),
    })
}

/// GET /debug/analyze?text=...
async fn get_analyze_preview(
    State(state): State<AppState>,
    Query(q): Query<PreviewQuery>,
) -> Json<Analysis> {
    Json(state.analyzer.analyze_detailed(&q.text))
}
