use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;
use mondap_service::{AskRequest, Error as ServiceError, SearchResult};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/healthz", get(healthz))
		.route("/ask", post(ask))
		.with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<HealthBody> {
	Json(HealthBody { ok: state.service.health().await })
}

async fn ask(
	State(state): State<AppState>,
	Json(payload): Json<AskRequest>,
) -> Result<Json<SearchResult>, ApiError> {
	let result = state.service.ask(&payload).await?;
	Ok(Json(result))
}

#[derive(Debug, Serialize)]
struct HealthBody {
	ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => {
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message)
			},
			ServiceError::Provider { message } => {
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "provider_error", message)
			},
			ServiceError::Qdrant { message } => {
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "qdrant_error", message)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
