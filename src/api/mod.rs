use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    TripFinderError,
    models::{Destination, Filter, SortBy},
    planner::{DestinationDetail, POPULAR_DESTINATION_COUNT, TripPlanner},
};

/// Header carrying the caller's session id
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub default_limit: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub limit: Option<u32>,
    pub sort: Option<SortBy>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

impl From<TripFinderError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: TripFinderError) -> Self {
        let status = match err {
            TripFinderError::Validation { .. } => StatusCode::BAD_REQUEST,
            TripFinderError::Transport { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        api_error(status, err.user_message())
    }
}

fn session_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Missing {SESSION_HEADER} header"),
            )
        })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(submit_search))
        .route("/results", get(get_results))
        .route("/destinations/popular", get(get_popular))
        .route("/destinations/{id}", get(get_destination))
        .with_state(state)
}

async fn submit_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(filter): Json<Filter>,
) -> Result<StatusCode, ApiError> {
    let session = session_id(&headers)?;
    state.planner.submit_search(&session, &filter).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_results(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    let session = session_id(&headers)?;
    let limit = query.limit.unwrap_or(state.default_limit);
    let results = state
        .planner
        .results(&session, limit, query.sort.unwrap_or_default())
        .await?;
    info!("{} destinations found", results.len());
    Ok(Json(results))
}

async fn get_popular(State(state): State<AppState>) -> Json<Vec<Destination>> {
    Json(state.planner.popular(POPULAR_DESTINATION_COUNT).await)
}

async fn get_destination(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DestinationDetail>, ApiError> {
    let session = session_id(&headers)?;
    state
        .planner
        .destination_detail(&session, &id)
        .await
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Destination not found"))
}
