use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::app::SharedState;
use crate::listing::{ListingError, ListingResult};

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ApiError { detail: String }

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/list_files/:folder_name", get(list_files))
        .route("/filter_files/:folder_name/:filename", get(filter_files))
        .route("/order_files_by_size/:folder_name", get(order_files_by_size))
        .route("/filter_files_by_type/:folder_name/:file_type", get(filter_files_by_type))
        .with_state(state)
}

fn status_for(err: &ListingError) -> StatusCode {
    match err {
        ListingError::NotFound(_) => StatusCode::NOT_FOUND,
        ListingError::Forbidden => StatusCode::FORBIDDEN,
        ListingError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        ListingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ListingError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        folio_telemetry::inc_listing_error(self.kind());
        match &self {
            ListingError::Internal(cause) => error!(error = %cause, "listing failed"),
            ListingError::ShuttingDown => warn!("request refused: shutting down"),
            other => debug!(error = %other, kind = other.kind(), "listing rejected"),
        }
        (status_for(&self), Json(ApiError { detail: self.to_string() })).into_response()
    }
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    folio_telemetry::inc_api_request("/health");
    Json(Health { status: "ok", version: state.version })
}

async fn metrics() -> impl IntoResponse {
    folio_telemetry::inc_api_request("/metrics");
    let body = folio_telemetry::gather_prometheus();
    ([("Content-Type", "text/plain; version=0.0.4")], body)
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    count: i64,
}

async fn list_files(
    State(state): State<SharedState>,
    Path(folder_name): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListingResult>, ListingError> {
    folio_telemetry::inc_api_request("/list_files/:folder_name");
    // A count that does not parse as an integer is reported like a negative one.
    let Query(params) = params.map_err(|_| ListingError::invalid_count())?;
    Ok(Json(state.lister.list(&folder_name, params.count, None).await?))
}

async fn filter_files(
    State(state): State<SharedState>,
    Path((folder_name, filename)): Path<(String, String)>,
) -> Result<Json<ListingResult>, ListingError> {
    folio_telemetry::inc_api_request("/filter_files/:folder_name/:filename");
    Ok(Json(state.lister.filter_by_name(&folder_name, &filename).await?))
}

async fn order_files_by_size(
    State(state): State<SharedState>,
    Path(folder_name): Path<String>,
) -> Result<Json<ListingResult>, ListingError> {
    folio_telemetry::inc_api_request("/order_files_by_size/:folder_name");
    Ok(Json(state.lister.order_by_size(&folder_name).await?))
}

async fn filter_files_by_type(
    State(state): State<SharedState>,
    Path((folder_name, file_type)): Path<(String, String)>,
) -> Result<Json<ListingResult>, ListingError> {
    folio_telemetry::inc_api_request("/filter_files_by_type/:folder_name/:file_type");
    Ok(Json(state.lister.filter_by_type(&folder_name, &file_type).await?))
}
