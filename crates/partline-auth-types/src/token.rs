//! JWT access-token claims and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use partline_domain::role::Role;

/// Access-token lifetime: 1440 minutes (24 hours).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 1440 * 60;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub account_id: Uuid,
    pub phone: String,
    pub role: Role,
    pub access_token_exp: u64,
}

/// Errors returned by [`validate_access_token`].
///
/// Handlers collapse all of these into one caller-visible "invalid token"
/// kind; the distinction exists for logs and tests only.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload. Signed, not encrypted — visible to any token holder,
/// so nothing secret goes in here.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account ID (UUID string) |
/// | `phone` | custom | normalized login phone |
/// | `role` | custom | role wire string, see [`Role`] |
/// | `exp` | `exp` | seconds since epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub phone: String,
    pub role: String,
    pub exp: u64,
}

/// Decode and validate a JWT against the process-wide signing secret.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between hosts.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let claims = data.claims;
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = Role::from_str(&claims.role).ok_or(AuthError::Malformed)?;

    Ok(TokenInfo {
        account_id,
        phone: claims.phone,
        role,
        access_token_exp: claims.exp,
    })
}
