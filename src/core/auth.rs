use crate::core::cookie::token_from_cookies;
use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{body::Body, extract::Request, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Sessions are never revoked server side, they just lapse after a year
pub const TOKEN_LIFETIME_DAYS: i64 = 365;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    /// Identity object posted at issuance, embedded verbatim
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature or malformed token
    Invalid,
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Invalid => write!(f, "invalid token"),
            TokenError::Expired => write!(f, "expired token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Signs `identity` as-is. Caller supplied `exp`/`iat` keys are replaced.
#[instrument(skip(identity, secret))]
pub fn encode_jwt(
    mut identity: Map<String, Value>,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    debug!("Encoding session token");
    identity.remove("exp");
    identity.remove("iat");

    let now = Utc::now();
    let exp = (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize;
    let claims = Claims {
        exp,
        iat: now.timestamp() as usize,
        identity,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .inspect(|_| info!("Session token encoded successfully"))
    .inspect_err(|e| error!("Failed to encode session token: {:?}", e))
}

#[instrument(skip(token, secret))]
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    debug!("Decoding session token");
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

/// Session gate: reads the `token` cookie, verifies it and stores the decoded
/// [`Claims`] in the request extensions. Any failure is a 401.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = token_from_cookies(req.headers()).ok_or_else(|| {
        warn!("Missing session cookie");
        AppError::unauthorized()
    })?;

    let claims = decode_jwt(&token, &state.jwt_secret).map_err(|e| {
        warn!("Rejected session token: {}", e);
        AppError::unauthorized()
    })?;

    debug!("Session verified for {:?}", claims.email());
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Checks that the session belongs to `email`, the owner of the requested resource
pub fn require_owner(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email() != Some(email) {
        warn!(
            "Session email {:?} does not own resources of {}",
            claims.email(),
            email
        );
        return Err(AppError::forbidden());
    }
    Ok(())
}
