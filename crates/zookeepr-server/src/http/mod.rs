//! HTTP surface.
//!
//! - `GET  /api/animals`     - filtered list (query-string criteria)
//! - `GET  /api/animals/:id` - single animal, or 404 with no body
//! - `POST /api/animals`     - create; 400 with a plain-text message when the
//!   body is not a well-formed animal
//!
//! Everything else falls through to the static pages in [`pages`].

mod pages;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};
use zookeepr_core::{
    Animal, AnimalCandidate, AnimalQuery, AnimalStore, ZookeeprError, INVALID_ANIMAL_MESSAGE,
};

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AnimalStore>,
}

/// Build the full router: API routes, static pages, request tracing.
pub fn router(store: Arc<AnimalStore>, public_dir: &FsPath) -> Router {
    let api = Router::new()
        .route("/api/animals", get(list_animals).post(create_animal))
        .route("/api/animals/:id", get(get_animal))
        .with_state(AppState { store });

    api.merge(pages::routes(public_dir))
        .layer(TraceLayer::new_for_http())
}

async fn list_animals(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Animal>> {
    let query = AnimalQuery::from_pairs(&pairs);
    debug!(filters = query.filters().len(), "Listing animals");
    Json(state.store.search(&query))
}

async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Animal>, ApiError> {
    Ok(Json(state.store.find_by_id(&id)?))
}

async fn create_animal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Animal>, ApiError> {
    let candidate = AnimalCandidate::from_slice(&body);
    let store = state.store.clone();

    // Creating rewrites the data file; keep that off the async workers
    let animal = tokio::task::spawn_blocking(move || store.create(candidate))
        .await
        .map_err(|e| ApiError(ZookeeprError::Internal(e.to_string())))??;

    Ok(Json(animal))
}

/// Maps core errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub ZookeeprError);

impl From<ZookeeprError> for ApiError {
    fn from(err: ZookeeprError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ZookeeprError::InvalidAnimal => {
                (StatusCode::BAD_REQUEST, INVALID_ANIMAL_MESSAGE).into_response()
            }
            ZookeeprError::AnimalNotFound { id } => {
                debug!(id = %id, "Animal not found");
                StatusCode::NOT_FOUND.into_response()
            }
            err => {
                error!(error = %err, storage = err.is_storage_error(), "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
