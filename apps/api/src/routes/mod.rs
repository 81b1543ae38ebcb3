pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::admin::handlers as admin;
use crate::auth::handlers as auth;
use crate::candidates::{handlers as candidates, upload};
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_root = state.config.static_root.clone();
    let upload_limit = state.config.max_upload_bytes;

    // Serves the client bundle and uploaded resumes; unknown paths get the SPA entry point.
    let static_files = ServeDir::new(&static_root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_root.join("index.html")));

    Router::new()
        .route("/health", get(health::health_handler))
        // Authentication
        .route("/api/authentication/register", post(auth::handle_register))
        .route("/api/authentication/login", post(auth::handle_login))
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/jobs/stats", get(jobs::handle_job_stats))
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        // Candidates
        .route(
            "/api/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::handle_get_candidate)
                .put(candidates::handle_update_candidate)
                .delete(candidates::handle_delete_candidate),
        )
        .route(
            "/api/candidates/:id/uploadResume",
            post(upload::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Admin
        .route("/api/admin/users", get(admin::handle_list_users))
        .route("/api/admin/users/:id/role", post(admin::handle_update_role))
        .route("/api/admin/users/:id", axum::routing::delete(admin::handle_delete_user))
        .fallback_service(static_files)
        .with_state(state)
}

/// Permissive when no origins are configured, otherwise limited to the list.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
