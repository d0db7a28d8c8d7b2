use axum::{http::StatusCode, routing::get, Router};
use std::path::Path;
use tower_http::{
	services::{ServeDir, ServeFile},
	trace::TraceLayer
};

/// Serves the built frontend out of `dist_dir`. Anything that isn't a real file gets `index.html`
/// so that the client-side router can take over, which is what lets `/admin` survive a reload.
pub fn router(dist_dir: &Path) -> Router {
	let index = ServeFile::new(dist_dir.join("index.html"));
	let files = ServeDir::new(dist_dir).fallback(index);

	Router::new()
		.route("/healthz", get(|| async { StatusCode::NO_CONTENT }))
		.fallback_service(files)
		.layer(TraceLayer::new_for_http())
}
