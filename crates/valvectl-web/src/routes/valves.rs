//! Control page and valve toggle endpoints.
//!
//! # Endpoints
//!
//! ### `GET /`
//! The control page, one tile per valve slot.
//!
//! ### `GET /action?valveno=N&valvestatus=on|off`
//! Toggle endpoint called by the page script. Answers the full table as JSON
//! so the script can refresh every tile from one response.
//!
//! ### `GET /api/valves`
//! The valve table as JSON for other collaborators.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use valvectl_core::ValveEntry;

use crate::pages;
use crate::AppState;

/// Create control/toggle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(control_page))
        .route("/action", get(action))
        .route("/api/valves", get(list_valves))
}

/// GET /
async fn control_page(State(state): State<AppState>) -> Html<String> {
    let config = state.config.read().await;
    Html(pages::control_page(&config, &state.renderer))
}

/// Query parameters of the toggle endpoint.
#[derive(Debug, Deserialize)]
struct ActionParams {
    valveno: usize,
    valvestatus: String,
}

/// One row of the toggle response, shaped for the page script.
#[derive(Debug, Serialize)]
struct ValveRow {
    no: usize,
    status: &'static str,
    label: String,
}

#[derive(Debug, Serialize)]
struct ValvesResponse {
    valves: Vec<ValveRow>,
}

fn table_rows(valves: &[ValveEntry]) -> Vec<ValveRow> {
    valves
        .iter()
        .enumerate()
        .map(|(no, entry)| ValveRow {
            no,
            status: entry.state().as_str(),
            label: entry.label.clone(),
        })
        .collect()
}

/// GET /action
async fn action(
    State(state): State<AppState>,
    Query(params): Query<ActionParams>,
) -> Result<Json<ValvesResponse>, StatusCode> {
    let open = match params.valvestatus.as_str() {
        "on" => true,
        "off" => false,
        _ => return Err(StatusCode::BAD_REQUEST),
    };

    let mut config = state.config.write().await;

    // Offline slots are not toggleable; a bad index fails before any mutation
    let entry = config
        .valve(params.valveno)
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    if !entry.is_assigned() {
        return Err(StatusCode::BAD_REQUEST);
    }

    config
        .set_valve_status(params.valveno, open)
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    tracing::debug!("valve {} set {}", params.valveno, params.valvestatus);

    Ok(Json(ValvesResponse {
        valves: table_rows(config.valves()),
    }))
}

/// GET /api/valves
async fn list_valves(State(state): State<AppState>) -> Json<Vec<ValveEntry>> {
    let config = state.config.read().await;
    Json(config.valves().to_vec())
}
