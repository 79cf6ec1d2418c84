//! HTTP Handlers

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invest_advisor::{
    knowledge::MarketRule,
    strategy::{Question, QUESTIONS},
    AdvisorError, AdvisoryRequest, Allocation, Answers, DecisionNetwork, Instrument, RiskProfile,
};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub instruments: usize,
    pub market_conditions: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub answers: Answers,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: RiskProfile,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub request_id: String,
    pub profile: RiskProfile,
    pub allocation: Allocation,
    pub explanation: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn advisor_error(err: &AdvisorError) -> ApiError {
    let status = match err {
        AdvisorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AdvisorError::NoEligibleInstruments { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AdvisorError::Config(_) | AdvisorError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: err.code().into(),
        }),
    )
}

fn rejection_error(rejection: &JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
            code: "INVALID_INPUT".into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let knowledge = state.engine.knowledge();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        instruments: knowledge.instruments().len(),
        market_conditions: knowledge.market_rules().len(),
    })
}

/// Instrument catalog in catalog order
pub async fn list_instruments(State(state): State<AppState>) -> Json<Vec<Instrument>> {
    Json(state.engine.knowledge().instruments().to_vec())
}

/// Market-condition rule table
pub async fn list_market_conditions(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, MarketRule>> {
    Json(state.engine.knowledge().market_rules().clone())
}

/// Questions and answer options for the presentation layer
pub async fn questionnaire() -> Json<Vec<Question>> {
    Json(QUESTIONS.to_vec())
}

/// Decision network derived from the knowledge base
pub async fn decision_network(State(state): State<AppState>) -> Json<DecisionNetwork> {
    Json(state.engine.knowledge().decision_network())
}

/// Evaluate a risk profile from questionnaire answers
pub async fn evaluate_profile(
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;

    let profile = invest_advisor::evaluate_profile(&payload.answers).map_err(|e| {
        tracing::warn!("Profile evaluation rejected: {}", e);
        advisor_error(&e)
    })?;

    Ok(Json(ProfileResponse { profile }))
}

/// Full pipeline: profile, allocate, explain
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejection_error(&e))?;
    let request_id = uuid::Uuid::new_v4().to_string();

    let recommendation = state.engine.advise(&request).map_err(|e| {
        if e.is_client_error() {
            tracing::warn!(%request_id, "Recommendation rejected: {}", e);
        } else {
            tracing::error!(%request_id, "Recommendation failed: {}", e);
        }
        advisor_error(&e)
    })?;

    Ok(Json(RecommendResponse {
        request_id,
        profile: recommendation.profile,
        allocation: recommendation.allocation,
        explanation: recommendation.explanation,
        generated_at: Utc::now(),
    }))
}
