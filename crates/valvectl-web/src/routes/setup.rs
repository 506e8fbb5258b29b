//! WiFi provisioning flow.
//!
//! # Endpoints
//!
//! ### `GET /setup`
//! Script-free page carrying the credentials form.
//!
//! ### `POST /configuration.save`
//! Form target; fields are `_ssid`, `_password` and `_host`. Updates the
//! in-memory record and persists through the provisioning store when one is
//! configured.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use valvectl_core::WifiCredentials;

use crate::pages;
use crate::AppState;

/// Create setup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/setup", get(setup_page))
        .route("/configuration.save", post(save_configuration))
}

/// GET /setup
async fn setup_page(State(state): State<AppState>) -> Html<String> {
    Html(pages::setup_page(&state.renderer))
}

/// Fields posted by the setup form.
#[derive(Debug, Deserialize)]
struct SetupForm {
    #[serde(rename = "_ssid")]
    ssid: String,
    #[serde(rename = "_password")]
    password: String,
    #[serde(rename = "_host")]
    host: String,
}

/// POST /configuration.save
async fn save_configuration(
    State(state): State<AppState>,
    Form(form): Form<SetupForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let credentials = WifiCredentials::new(&form.ssid, &form.password, &form.host)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;

    {
        let mut config = state.config.write().await;
        config.set_credentials(credentials.clone());
    }
    tracing::info!("credentials updated, host '{}'", credentials.host);

    if let Some(provisioning) = &state.provisioning {
        provisioning.save_credentials(&credentials).map_err(|err| {
            tracing::warn!("failed to persist credentials: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })?;
    }

    Ok(Html(pages::saved_page(&state.renderer)))
}
