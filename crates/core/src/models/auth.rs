use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};

/// Token claims issued by the credential service.
///
/// Decoded once at the HTTP boundary. Every field is typed, so a token whose
/// `business_id` is not a UUID is rejected as a whole rather than coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub business_id: Option<Uuid>,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// The authenticated principal attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub business_id: Option<Uuid>,
}

impl AuthContext {
    /// Returns the business the principal acts for.
    ///
    /// # Errors
    ///
    /// `SlotError::Authorization` when the user is not attached to a business.
    pub fn require_business(&self) -> SlotResult<Uuid> {
        self.business_id.ok_or_else(|| {
            SlotError::Authorization("User is not associated with a business".to_string())
        })
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            business_id: claims.business_id,
        }
    }
}
