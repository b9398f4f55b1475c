use chrono::{DateTime, Utc};
use uuid::Uuid;

use partline_domain::profile::{Address, RoleProfile};
use partline_domain::role::Role;

/// Account record. Created only via the registration path; `phone`, `role`,
/// `referral_code` and `referred_by` are immutable after creation.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub phone: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// Argon2id PHC string. `None` until the user sets a PIN.
    pub pin_hash: Option<String>,
    pub profile: RoleProfile,
    pub addresses: Vec<Address>,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub referral_count: i32,
    /// Append-only ids of accounts registered with this account's code.
    pub referral_users: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh account for registration: generated id, empty profile
    /// for the role, empty address book, zero referral stats.
    pub fn register(
        phone: String,
        role: Role,
        referral_code: String,
        referred_by: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            full_name: None,
            email: None,
            role,
            pin_hash: None,
            profile: RoleProfile::empty_for(role),
            addresses: Vec::new(),
            referral_code,
            referred_by,
            referral_count: 0,
            referral_users: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// PIN length in characters.
pub const PIN_LEN: usize = 4;

/// A PIN is exactly 4 ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LEN && pin.chars().all(|c| c.is_ascii_digit())
}

/// Format a counter value the way collaborator services expect sequence
/// numbers: `{PREFIX}-{seq:05}`.
pub fn format_sequence(prefix: &str, seq: i64) -> String {
    format!("{prefix}-{seq:05}")
}
