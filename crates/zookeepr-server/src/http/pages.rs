//! Static HTML pages.
//!
//! `/`, `/animals` and `/zookeepers` map to their HTML files in the public
//! directory; any other unmatched path gets `index.html`.

use axum::Router;
use std::path::Path;
use tower_http::services::ServeFile;

pub const INDEX_PAGE: &str = "index.html";
pub const ANIMALS_PAGE: &str = "animals.html";
pub const ZOOKEEPERS_PAGE: &str = "zookeepers.html";

/// Page routes plus the catch-all fallback.
pub fn routes(public_dir: &Path) -> Router {
    let index = public_dir.join(INDEX_PAGE);

    Router::new()
        .route_service("/", ServeFile::new(&index))
        .route_service("/animals", ServeFile::new(public_dir.join(ANIMALS_PAGE)))
        .route_service("/zookeepers", ServeFile::new(public_dir.join(ZOOKEEPERS_PAGE)))
        .fallback_service(ServeFile::new(index))
}
