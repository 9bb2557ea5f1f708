use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Production (`APP_ENV` or `NODE_ENV` set to
/// `production`) logs JSON lines; everything else gets the human formatter.
pub fn init_tracing(service_name: &str) {
    let target = service_name.replace('-', "_");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{target}=debug,tower_http=debug")));

    if is_production() {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    tracing::info!(service = service_name, "tracing initialized");
}

fn is_production() -> bool {
    ["APP_ENV", "NODE_ENV"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .any(|v| v.eq_ignore_ascii_case("production"))
}
