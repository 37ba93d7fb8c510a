use axum::{
    Extension, Json, Router, extract::Query, http::StatusCode, response::IntoResponse,
    routing::get,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub mod config;
pub mod dates;
pub mod error;
pub mod layout;
pub mod menu;
pub mod parser;
pub mod pdf;

pub use error::MenuError;
pub use layout::MenuLayout;
pub use menu::{Corner, MenuRecord, Section, Zone};
pub use parser::{parse_menu, parse_menu_on};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Full,
    LunchOnly,
}

impl Variant {
    /// Built-in layout for this sheet variant.
    pub fn layout(self) -> MenuLayout {
        match self {
            Variant::Full => MenuLayout::full_day(),
            Variant::LunchOnly => MenuLayout::lunch_only(),
        }
    }
}

#[derive(Deserialize)]
pub struct MenuQuery {
    pub url: String,
    #[serde(default)]
    pub variant: Variant,
}

pub struct AppState {
    pub client: Client,
    pub full: MenuLayout,
    pub lunch_only: MenuLayout,
}

impl AppState {
    pub fn new(client: Client, full: MenuLayout) -> Self {
        Self {
            client,
            full,
            lunch_only: MenuLayout::lunch_only(),
        }
    }

    pub fn layout(&self, variant: Variant) -> &MenuLayout {
        match variant {
            Variant::Full => &self.full,
            Variant::LunchOnly => &self.lunch_only,
        }
    }
}

pub async fn fetch_menu(
    client: &Client,
    url: &str,
    layout: &MenuLayout,
) -> Result<Vec<MenuRecord>, MenuError> {
    let text = pdf::download_and_extract_text(client, url).await?;
    Ok(parse_menu(&text, layout))
}

pub async fn get_menu(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<MenuQuery>,
) -> impl IntoResponse {
    let layout = state.layout(params.variant);
    match fetch_menu(&state.client, &params.url, layout).await {
        Ok(menus) => {
            info!(url = %params.url, days = menus.len(), "menu parsed");
            Json(menus).into_response()
        }
        Err(err) => {
            error!(url = %params.url, %err, "menu extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": err.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/menu", get(get_menu))
        .route("/health", get(health))
        .layer(Extension(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}
