//! Session services - Emissione e cancellazione del cookie di sessione

use crate::core::cookie::{cleared_session_cookie, session_cookie};
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::SuccessDTO;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

fn set_cookie_headers(cookie: &str) -> Result<HeaderMap, AppError> {
    let value = HeaderValue::from_str(cookie).map_err(|_| AppError::internal_server_error())?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

/// POST /jwt - firma l'oggetto identità ricevuto e lo imposta come cookie HttpOnly.
/// The identity is not checked against anything: issuance is open.
#[instrument(skip(state, identity))]
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    Json(identity): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Issuing session token for {:?}", identity.get("email"));
    // 1. Firmare l'oggetto ricevuto così com'è (scadenza 365 giorni)
    // 2. Impostare il cookie token (Secure/SameSite dipendono dall'ambiente)
    // 3. Ritornare {success: true}
    let token = encode_jwt(identity, &state.jwt_secret)
        .map_err(|_| AppError::internal_server_error())?;

    let headers = set_cookie_headers(&session_cookie(&token, state.secure_cookies))?;

    info!("Session cookie issued");
    Ok((StatusCode::OK, headers, Json(SuccessDTO { success: true })))
}

/// GET /logout - cookie con Max-Age=0 per forzare il logout lato client
#[instrument(skip(state))]
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let headers = set_cookie_headers(&cleared_session_cookie(state.secure_cookies))?;

    info!("Session cookie cleared");
    Ok((StatusCode::OK, headers, Json(SuccessDTO { success: true })))
}
