use std::sync::Arc;

use tecnologuia_api::config::AppConfig;
use tecnologuia_api::{build_router, db_init, AppState};
use tecnologuia_shared::clients::db::create_pool;
use tecnologuia_shared::clients::email::EmailClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    tecnologuia_shared::middleware::init_tracing("tecnologuia-api");

    if config.uses_dev_jwt_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET not set, using the development secret");
    }

    let port = config.port;
    let db = create_pool(&config.database_url())?;
    {
        let mut conn = db.get()?;
        db_init::run(&mut conn)?;
    }

    let email = match config.smtp_settings() {
        Some(settings) => Some(EmailClient::new(&settings)?),
        None => {
            tracing::warn!("EMAIL_USER not set, password reset emails are disabled");
            None
        }
    };

    let metrics_handle = tecnologuia_shared::middleware::init_metrics()?;

    let state = Arc::new(AppState {
        db,
        config,
        email,
        metrics_handle: Some(metrics_handle),
    });

    let app = build_router(state)?;

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "tecnologuia-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
