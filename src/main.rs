use anyhow::Context;
use pangyo_menu_api::config::ServerConfig;
use pangyo_menu_api::{AppState, MenuLayout, app, pdf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if rustls::crypto::aws_lc_rs::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    let config = ServerConfig::from_env();
    let layout = match &config.layout_path {
        Some(path) => {
            info!("Loading menu layout from {:?}", path);
            MenuLayout::load(path)?
        }
        None => MenuLayout::full_day(),
    };
    let client = pdf::build_client(config.accept_invalid_certs)?;
    let state = Arc::new(AppState::new(client, layout));

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
