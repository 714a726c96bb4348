use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::core::adjacency::{
    calculate_fit_score_with, get_adjacent_specialties, known_specialties, search_phrase,
};
use crate::domain::model::{BriefRequest, BriefResponse};
use crate::utils::error::SleftError;

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

/// Error type that converts into a JSON HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: "Internal server error".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<SleftError> for AppError {
    fn from(err: SleftError) -> Self {
        match err {
            SleftError::SessionNotFound { .. } => AppError::not_found(err.to_string()),
            _ if err.is_client_error() => AppError::bad_request(err.user_friendly_message()),
            _ => {
                tracing::error!(
                    "Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                AppError::internal()
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

// ============ POST /api/brief, /api/snapshot ============

pub(super) async fn handle_brief(
    State(state): State<AppState>,
    payload: Result<Json<BriefRequest>, JsonRejection>,
) -> Result<Json<BriefResponse>, AppError> {
    let Json(request) = payload?;
    let brief = state.briefs.generate_brief(&request).await?;
    Ok(Json(brief))
}

pub(super) async fn handle_snapshot(
    State(state): State<AppState>,
    payload: Result<Json<BriefRequest>, JsonRejection>,
) -> Result<Json<BriefResponse>, AppError> {
    let Json(request) = payload?;
    let snapshot = state.briefs.generate_snapshot(&request).await?;
    Ok(Json(snapshot))
}

// ============ GET /api/specialties ============

#[derive(Serialize)]
pub(super) struct SpecialtiesResponse {
    specialties: Vec<&'static str>,
}

pub(super) async fn handle_specialties() -> Json<SpecialtiesResponse> {
    Json(SpecialtiesResponse {
        specialties: known_specialties().collect(),
    })
}

// ============ GET /api/adjacency/{specialty} ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PartnerInfo {
    specialty: &'static str,
    rank: usize,
    fit_score: u32,
    search_phrase: String,
}

#[derive(Serialize)]
pub(super) struct AdjacencyResponse {
    specialty: String,
    partners: Vec<PartnerInfo>,
}

pub(super) async fn handle_adjacency(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> Result<Json<AdjacencyResponse>, AppError> {
    let partners = get_adjacent_specialties(&specialty);
    if partners.is_empty() {
        return Err(SleftError::UnknownSpecialty { specialty }.into());
    }

    let partners = partners
        .iter()
        .enumerate()
        .map(|(index, &partner)| PartnerInfo {
            specialty: partner,
            rank: index + 1,
            fit_score: calculate_fit_score_with(&specialty, partner, state.jitter.as_ref()),
            search_phrase: search_phrase(partner),
        })
        .collect();

    Ok(Json(AdjacencyResponse {
        specialty,
        partners,
    }))
}

// ============ /api/sessions/{id} ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionResponse {
    id: String,
    state: serde_json::Value,
    ttl_seconds: u64,
}

pub(super) async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| SleftError::SessionNotFound { id: id.clone() })?;

    Ok(Json(SessionResponse {
        id,
        state: session,
        ttl_seconds: state.sessions.ttl().as_secs(),
    }))
}

pub(super) async fn handle_put_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(session) = payload?;
    if id.trim().is_empty() {
        return Err(SleftError::validation("id", "session id is required").into());
    }

    state.sessions.put(&id, session.clone());

    Ok(Json(SessionResponse {
        id,
        state: session,
        ttl_seconds: state.sessions.ttl().as_secs(),
    }))
}

pub(super) async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.evict(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SleftError::SessionNotFound { id }.into())
    }
}

// ============ GET /health ============

#[derive(Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub(super) async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        let err: AppError = SleftError::UnknownSpecialty {
            specialty: "Astrology".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "No referral partners found for specialty: Astrology"
        );
    }

    #[test]
    fn test_missing_session_maps_to_404() {
        let err: AppError = SleftError::SessionNotFound {
            id: "abc".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let err: AppError = SleftError::ProcessingError {
            message: "db password leaked here".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.code, "internal");
    }
}
