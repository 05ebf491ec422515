use api::transport_axum::serve_http_with_axum;
use api::{ApiConfig, config};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish()
        .try_init();

    let config = ApiConfig::from_env();
    let bind_addr = config::resolve_bind_addr();
    info!(
        endpoint = %config.store_url,
        database = %config.db_name,
        "agrimate api listening on http://{bind_addr}"
    );

    if let Err(err) = serve_http_with_axum(config, &bind_addr) {
        eprintln!("agrimate api failed: {err}");
        std::process::exit(1);
    }
}
