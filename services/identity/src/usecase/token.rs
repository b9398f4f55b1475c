use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use partline_auth_types::token::{ACCESS_TOKEN_TTL_SECS, JwtClaims};

use crate::domain::types::Account;
use crate::error::IdentityServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue an access token for an account. The role claim is always the
/// account's stored role; callers never get to assert a role of their own.
pub fn issue_access_token(
    account: &Account,
    secret: &str,
) -> Result<(String, u64), IdentityServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_TTL_SECS;
    let claims = JwtClaims {
        sub: account.id.to_string(),
        phone: account.phone.clone(),
        role: account.role.as_str().to_owned(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| IdentityServiceError::Internal(e.into()))?;
    Ok((token, exp))
}
