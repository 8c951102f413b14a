//! # Authentication Module
//!
//! Bearer-token verification for protected routes.
//!
//! Tokens are issued elsewhere. This module only verifies the HS256 signature and
//! expiry, decodes the typed [`Claims`] once, and hands handlers an [`AuthContext`]
//! through request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::auth::{AuthContext, Claims},
};
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

/// Verifies HS256 tokens against the configured secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decodes and validates `token`.
    ///
    /// # Errors
    ///
    /// `SlotError::Authentication` for a bad signature, an expired token, or claims
    /// that do not match [`Claims`].
    pub fn verify(&self, token: &str) -> SlotResult<Claims> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token verification failed: {}", e);
                SlotError::Authentication("Invalid or expired token".to_string())
            })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// `SlotError::Authentication` when the header is missing or uses another scheme.
pub fn bearer_token(headers: &HeaderMap) -> SlotResult<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| SlotError::Authentication("Authorization header is required".to_string()))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        SlotError::Authentication("Authorization format must be 'Bearer {token}'".to_string())
    })
}

/// Middleware guarding protected routes.
///
/// On success the request carries an `Extension<AuthContext>`.
pub async fn require_auth(
    State(state): State<Arc<ApiState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = bearer_token(req.headers())?;
        state.jwt.verify(token)?
    };

    req.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(req).await)
}
