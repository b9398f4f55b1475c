pub mod admin;
pub mod auth;
pub mod pin;
pub mod profile;

use serde::Serialize;

use partline_auth_types::token::{TokenInfo, validate_access_token};
use partline_domain::profile::Address;
use partline_domain::role::Role;

use crate::domain::types::Account;
use crate::error::IdentityServiceError;

/// Validate a bearer token against the process-wide secret. Every internal
/// failure (bad signature, expired, malformed) collapses into the single
/// `INVALID_TOKEN` kind the caller sees.
pub fn authenticate(token: &str, jwt_secret: &str) -> Result<TokenInfo, IdentityServiceError> {
    validate_access_token(token, jwt_secret).map_err(|_| IdentityServiceError::InvalidToken)
}

/// Like [`authenticate`], but additionally requires the admin role.
pub fn authenticate_admin(
    token: &str,
    jwt_secret: &str,
) -> Result<TokenInfo, IdentityServiceError> {
    let info = authenticate(token, jwt_secret)?;
    if info.role != Role::Admin {
        return Err(IdentityServiceError::Forbidden);
    }
    Ok(info)
}

/// Account as returned to clients. `pin_hash` is deliberately absent — the
/// credential never leaves the service, hashed or not.
#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub phone: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub profile: serde_json::Value,
    pub addresses: Vec<Address>,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: i32,
    pub referral_users: Vec<String>,
    #[serde(serialize_with = "partline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "partline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            phone: account.phone,
            full_name: account.full_name,
            email: account.email,
            role: account.role,
            profile: account.profile.to_json(),
            addresses: account.addresses,
            referral_code: account.referral_code,
            referred_by: account.referred_by,
            referral_count: account.referral_count,
            referral_users: account
                .referral_users
                .iter()
                .map(|id| id.to_string())
                .collect(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
