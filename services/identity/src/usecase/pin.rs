use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use uuid::Uuid;

use partline_domain::phone;

use crate::domain::repository::{AccountRepository, OtpGateway};
use crate::domain::types::is_valid_pin;
use crate::error::IdentityServiceError;
use crate::usecase::token::issue_access_token;

/// Hash a PIN with Argon2id and a fresh random salt. The raw PIN never
/// reaches storage.
pub fn hash_pin(pin: &str) -> Result<String, IdentityServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| IdentityServiceError::Internal(anyhow::anyhow!("hash pin: {e}")))
}

/// Check a candidate PIN against a stored PHC string. An unparseable hash
/// counts as a mismatch, not an error.
pub fn pin_matches(pin: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(pin.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn check_pin_pair(pin: &str, confirm: &str) -> Result<(), IdentityServiceError> {
    if pin != confirm {
        return Err(IdentityServiceError::PinMismatch);
    }
    if !is_valid_pin(pin) {
        return Err(IdentityServiceError::InvalidPinFormat);
    }
    Ok(())
}

// ── SetPin ───────────────────────────────────────────────────────────────────

pub struct SetPinInput {
    pub account_id: Uuid,
    pub pin: String,
    pub confirm_pin: String,
}

pub struct SetPinUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> SetPinUseCase<R> {
    pub async fn execute(&self, input: SetPinInput) -> Result<(), IdentityServiceError> {
        check_pin_pair(&input.pin, &input.confirm_pin)?;
        let hash = hash_pin(&input.pin)?;
        let updated = self
            .accounts
            .set_pin_hash_by_id(input.account_id, &hash)
            .await?;
        if !updated {
            return Err(IdentityServiceError::AccountNotFound);
        }
        Ok(())
    }
}

// ── VerifyPin ────────────────────────────────────────────────────────────────

pub struct VerifyPinInput {
    pub phone: String,
    pub pin: String,
}

#[derive(Debug)]
pub struct VerifyPinOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct VerifyPinUseCase<R: AccountRepository> {
    pub accounts: R,
    pub jwt_secret: String,
}

impl<R: AccountRepository> VerifyPinUseCase<R> {
    pub async fn execute(
        &self,
        input: VerifyPinInput,
    ) -> Result<VerifyPinOutput, IdentityServiceError> {
        let phone =
            phone::normalize(&input.phone).map_err(|_| IdentityServiceError::InvalidPhone)?;
        let account = self
            .accounts
            .find_by_phone(&phone)
            .await?
            .ok_or(IdentityServiceError::AccountNotFound)?;

        // No PIN set counts as a mismatch, same as a wrong PIN.
        let stored = account
            .pin_hash
            .as_deref()
            .ok_or(IdentityServiceError::InvalidPin)?;
        if !pin_matches(&input.pin, stored) {
            return Err(IdentityServiceError::InvalidPin);
        }

        // Token carries the stored role, never anything caller-asserted.
        let (access_token, access_token_exp) = issue_access_token(&account, &self.jwt_secret)?;
        Ok(VerifyPinOutput {
            access_token,
            access_token_exp,
        })
    }
}

// ── ResetPin ─────────────────────────────────────────────────────────────────

pub struct ResetPinInput {
    pub phone: String,
    pub otp: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

pub struct ResetPinUseCase<R: AccountRepository, G: OtpGateway> {
    pub accounts: R,
    pub gateway: G,
}

impl<R: AccountRepository, G: OtpGateway> ResetPinUseCase<R, G> {
    pub async fn execute(&self, input: ResetPinInput) -> Result<(), IdentityServiceError> {
        check_pin_pair(&input.new_pin, &input.confirm_pin)?;
        let phone =
            phone::normalize(&input.phone).map_err(|_| IdentityServiceError::InvalidPhone)?;

        // Re-verify the OTP here rather than trusting the caller to have
        // done it; an unauthenticated reset path would let anyone who knows
        // a phone number overwrite its PIN.
        if !self.gateway.verify_code(&phone, &input.otp).await? {
            return Err(IdentityServiceError::OtpVerificationFailed);
        }

        let hash = hash_pin(&input.new_pin)?;
        let updated = self.accounts.set_pin_hash_by_phone(&phone, &hash).await?;
        if !updated {
            return Err(IdentityServiceError::AccountNotFound);
        }
        Ok(())
    }
}
