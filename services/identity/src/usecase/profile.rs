use chrono::Utc;
use uuid::Uuid;

use partline_domain::profile::{Address, GeoPoint, ProfileError, ProfileUpdate};

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::IdentityServiceError;

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> GetAccountUseCase<R> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, IdentityServiceError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(IdentityServiceError::AccountNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> UpdateProfileUseCase<R> {
    /// Apply a profile patch. The raw body is parsed against the account's
    /// *stored* role, so one role's patch cannot smuggle in another role's
    /// fields and unknown fields are rejected outright.
    pub async fn execute(
        &self,
        account_id: Uuid,
        body: serde_json::Value,
    ) -> Result<(), IdentityServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(IdentityServiceError::AccountNotFound)?;

        let update = ProfileUpdate::parse(account.role, body).map_err(|e| match e {
            ProfileError::Empty => IdentityServiceError::MissingData,
            ProfileError::Invalid(_) => IdentityServiceError::InvalidProfile,
        })?;

        let mut profile = account.profile.clone();
        update.apply_to(&mut profile);

        self.accounts
            .update_identity(account.id, update.full_name(), update.email(), &profile)
            .await
    }
}

// ── AddAddress ───────────────────────────────────────────────────────────────

pub struct AddAddressInput {
    pub tag: String,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub location: Option<GeoPoint>,
    pub is_default: bool,
}

pub struct AddAddressUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> AddAddressUseCase<R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        input: AddAddressInput,
    ) -> Result<Address, IdentityServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(IdentityServiceError::AccountNotFound)?;

        let now = Utc::now();
        let address = Address {
            address_id: Uuid::new_v4(),
            tag: input.tag,
            address_line: input.address_line,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            location: input.location,
            is_default: input.is_default,
            created_at: now,
            updated_at: now,
        };

        let mut addresses = account.addresses;
        if address.is_default {
            for existing in &mut addresses {
                existing.is_default = false;
            }
        }
        addresses.push(address.clone());

        self.accounts
            .replace_addresses(account.id, &addresses)
            .await?;
        Ok(address)
    }
}
