use crate::error::SearchError;
use crate::models::ComparisonEntry;
use crate::scrapers::SearchRequest;
use crate::service::HotelSearchService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<ComparisonEntry>,
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let detail = match &self {
            SearchError::FetchTimeout { .. } => {
                "The search operation took too long to complete. Please try again.".to_string()
            }
            SearchError::NoCityMapping { city } => format!("Unsupported city: {city}"),
            SearchError::Internal(err) => format!("An error occurred during the search: {err:#}"),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

pub fn router(service: Arc<HotelSearchService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/search", post(search_hotels))
        .with_state(service)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the hotel-compare API" }))
}

async fn search_hotels(
    State(service): State<Arc<HotelSearchService>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!("Rejected search body: {}", detail);
            return (rejection.status(), Json(ErrorResponse { detail })).into_response();
        }
    };

    match service.search(&request).await {
        Ok(result) => Json(SearchResponse { result }).into_response(),
        Err(err) => {
            if err.is_timeout() {
                error!("Search for {:?} hit the deadline: {}", request.city, err);
            } else {
                warn!("Search for {:?} failed: {}", request.city, err);
            }
            err.into_response()
        }
    }
}
