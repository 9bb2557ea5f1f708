pub mod config;
pub mod db_init;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tecnologuia_shared::clients::db::DbPool;
use tecnologuia_shared::clients::email::EmailClient;
use tecnologuia_shared::middleware::{metrics_middleware, JwtSecretSource};

use config::AppConfig;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    /// `None` when no SMTP credentials are configured.
    pub email: Option<EmailClient>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

pub fn build_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let auth = Router::new()
        .route("/register", post(routes::register::register))
        .route("/login", post(routes::login::login))
        .route("/logout", post(routes::logout::logout))
        .route(
            "/profile",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .route("/forgot-password", post(routes::forgot_password::forgot_password))
        .route("/reset-password", post(routes::reset_password::reset_password))
        .route("/users", get(routes::users::list_users));

    let comments = Router::new()
        .route("/areas", get(routes::areas::list_areas))
        .route(
            "/",
            get(routes::comments::list_comments).post(routes::comments::create_comment),
        )
        .route("/:id", delete(routes::comments::delete_comment));

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .nest("/api/auth", auth)
        .nest("/api/comments", comments)
        .route("/api/users", get(routes::users::list_users))
        .route(
            "/api/contents",
            get(routes::contents::list_contents).post(routes::contents::create_content),
        )
        .layer(axum::middleware::from_fn(metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
