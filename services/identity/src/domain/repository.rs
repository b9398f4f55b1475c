#![allow(async_fn_in_trait)]

use uuid::Uuid;

use partline_domain::profile::{Address, RoleProfile};
use partline_domain::role::Role;

use crate::domain::types::Account;
use crate::error::IdentityServiceError;

/// Port for account storage. One logical store; role partitions are scoped
/// by the `role` filter. Phone and referral-code uniqueness are enforced by
/// the store itself so racing writers get detectable conflicts.
pub trait AccountRepository: Send + Sync {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, IdentityServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, IdentityServiceError>;

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<Account>, IdentityServiceError>;

    /// Number of accounts in one role partition.
    async fn count_role(&self, role: Role) -> Result<u64, IdentityServiceError>;

    /// Insert a new account. Uniqueness violations surface as
    /// `DuplicateAccount` (phone), `DuplicateReferralCode` (referral code)
    /// or `AdminRegistrationBlocked` (single-admin index).
    async fn insert(&self, account: &Account) -> Result<(), IdentityServiceError>;

    /// Credit the referrer: `referral_count + 1` and append the referred
    /// account id to `referral_users`, as one atomic update.
    async fn apply_referral(
        &self,
        referral_code: &str,
        referred_id: Uuid,
    ) -> Result<(), IdentityServiceError>;

    /// Set the PIN hash. Returns `false` if no account matched.
    async fn set_pin_hash_by_id(
        &self,
        id: Uuid,
        pin_hash: &str,
    ) -> Result<bool, IdentityServiceError>;

    async fn set_pin_hash_by_phone(
        &self,
        phone: &str,
        pin_hash: &str,
    ) -> Result<bool, IdentityServiceError>;

    /// Update mutable identity fields. `None` leaves a field unchanged;
    /// the profile is always written (it was validated against the stored
    /// role by the caller).
    async fn update_identity(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        profile: &RoleProfile,
    ) -> Result<(), IdentityServiceError>;

    async fn replace_addresses(
        &self,
        id: Uuid,
        addresses: &[Address],
    ) -> Result<(), IdentityServiceError>;

    async fn list_all(&self) -> Result<Vec<Account>, IdentityServiceError>;

    /// Delete an account. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, IdentityServiceError>;
}

/// Port for the external OTP provider (or its in-memory stand-in).
pub trait OtpGateway: Send + Sync {
    /// Ask the provider to dispatch a code to `phone`. Transport failure,
    /// timeout or a provider non-success all surface as
    /// `GatewayUnavailable`.
    async fn request_code(&self, phone: &str) -> Result<(), IdentityServiceError>;

    /// Check a code. `Ok(false)` is a legitimate "no match" — only
    /// transport/provider failures are errors.
    async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, IdentityServiceError>;
}

/// Port for named monotonic counters (sequence numbers for collaborator
/// services). `next` must be a single atomic increment-and-return.
pub trait SequenceRepository: Send + Sync {
    async fn next(&self, key: &str) -> Result<i64, IdentityServiceError>;
}
