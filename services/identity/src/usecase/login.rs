use partline_domain::phone;
use partline_domain::referral::{FIRST_ADMIN_REFERRAL_CODE, generate_code};
use partline_domain::role::Role;

use crate::domain::repository::{AccountRepository, OtpGateway};
use crate::domain::types::Account;
use crate::error::IdentityServiceError;
use crate::usecase::token::issue_access_token;

/// Attempts at generating a referral code before giving up. A collision in
/// a 40-bit space is already freakish; three in a row means the generator
/// or the store is broken.
const REFERRAL_REROLL_ATTEMPTS: usize = 3;

// ── RequestOtp ───────────────────────────────────────────────────────────────

pub struct RequestOtpInput {
    pub phone: String,
}

pub struct RequestOtpUseCase<G: OtpGateway> {
    pub gateway: G,
}

impl<G: OtpGateway> RequestOtpUseCase<G> {
    pub async fn execute(&self, input: RequestOtpInput) -> Result<(), IdentityServiceError> {
        let phone =
            phone::normalize(&input.phone).map_err(|_| IdentityServiceError::InvalidPhone)?;
        self.gateway.request_code(&phone).await
    }
}

// ── VerifyOtp (login-or-register) ────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub phone: String,
    pub otp: String,
    pub role: String,
    pub referral_code: Option<String>,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub account: Account,
    pub access_token: String,
    pub access_token_exp: u64,
    /// `true` if this call created the account, `false` if it resolved as a
    /// login to an existing one.
    pub created: bool,
}

pub struct VerifyOtpUseCase<R: AccountRepository, G: OtpGateway> {
    pub accounts: R,
    pub gateway: G,
    pub jwt_secret: String,
}

impl<R: AccountRepository, G: OtpGateway> VerifyOtpUseCase<R, G> {
    pub async fn execute(
        &self,
        input: VerifyOtpInput,
    ) -> Result<VerifyOtpOutput, IdentityServiceError> {
        // 1. Validate inputs before touching the gateway.
        let role = Role::from_str(&input.role).ok_or(IdentityServiceError::InvalidRole)?;
        let phone =
            phone::normalize(&input.phone).map_err(|_| IdentityServiceError::InvalidPhone)?;

        // 2. Prove phone ownership. A clean "no match" is an auth failure;
        //    gateway trouble propagates as-is.
        if !self.gateway.verify_code(&phone, &input.otp).await? {
            return Err(IdentityServiceError::OtpVerificationFailed);
        }

        // 3. Known phone → login with the stored role.
        if let Some(existing) = self.accounts.find_by_phone(&phone).await? {
            return self.login(existing, role);
        }

        // 4. Unknown phone → registration.
        let referred_by = match (role, &input.referral_code) {
            (Role::Admin, _) | (_, None) => None,
            (_, Some(code)) => {
                let referrer = self
                    .accounts
                    .find_by_referral_code(code)
                    .await?
                    .ok_or(IdentityServiceError::InvalidReferralCode)?;
                Some(referrer.referral_code)
            }
        };

        let account = self.insert_new(phone, role, referred_by.clone()).await?;
        let account = match account {
            Inserted::Created(account) => account,
            // Lost the duplicate-phone race: someone registered this phone
            // between our lookup and our insert. Resolve as a login, with
            // the same admin-escalation check a plain login gets.
            Inserted::LostRace(existing) => return self.login(existing, role),
        };

        // Credit the referrer in one atomic statement.
        if let Some(code) = referred_by {
            self.accounts.apply_referral(&code, account.id).await?;
        }

        let (access_token, access_token_exp) = issue_access_token(&account, &self.jwt_secret)?;
        Ok(VerifyOtpOutput {
            account,
            access_token,
            access_token_exp,
            created: true,
        })
    }

    fn login(
        &self,
        existing: Account,
        requested_role: Role,
    ) -> Result<VerifyOtpOutput, IdentityServiceError> {
        // Asking for admin against a non-admin account is an escalation
        // attempt, not a login.
        if requested_role == Role::Admin && existing.role != Role::Admin {
            return Err(IdentityServiceError::UnauthorizedAsAdmin);
        }
        let (access_token, access_token_exp) = issue_access_token(&existing, &self.jwt_secret)?;
        Ok(VerifyOtpOutput {
            account: existing,
            access_token,
            access_token_exp,
            created: false,
        })
    }

    async fn insert_new(
        &self,
        phone: String,
        role: Role,
        referred_by: Option<String>,
    ) -> Result<Inserted, IdentityServiceError> {
        if role == Role::Admin {
            // Bootstrap-only: a single admin, with a fixed referral code.
            // The store's partial unique index is the authoritative guard;
            // the count check just gives a cleaner error off the hot path.
            if self.accounts.count_role(Role::Admin).await? > 0 {
                return Err(IdentityServiceError::AdminRegistrationBlocked);
            }
            let account = Account::register(
                phone,
                role,
                FIRST_ADMIN_REFERRAL_CODE.to_owned(),
                referred_by,
            );
            return match self.accounts.insert(&account).await {
                Ok(()) => Ok(Inserted::Created(account)),
                Err(IdentityServiceError::DuplicateAccount) => self.reload_racer(&account).await,
                Err(e) => Err(e),
            };
        }

        for _ in 0..REFERRAL_REROLL_ATTEMPTS {
            let code = generate_code();
            if self.accounts.find_by_referral_code(&code).await?.is_some() {
                continue;
            }
            let account = Account::register(phone.clone(), role, code, referred_by.clone());
            match self.accounts.insert(&account).await {
                Ok(()) => return Ok(Inserted::Created(account)),
                Err(IdentityServiceError::DuplicateAccount) => {
                    return self.reload_racer(&account).await;
                }
                // Collision slipped in between pre-check and insert; re-roll.
                Err(IdentityServiceError::DuplicateReferralCode) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(IdentityServiceError::Internal(anyhow::anyhow!(
            "referral code generation kept colliding"
        )))
    }

    async fn reload_racer(&self, account: &Account) -> Result<Inserted, IdentityServiceError> {
        let existing = self
            .accounts
            .find_by_phone(&account.phone)
            .await?
            .ok_or_else(|| {
                IdentityServiceError::Internal(anyhow::anyhow!(
                    "account vanished after duplicate-phone conflict"
                ))
            })?;
        Ok(Inserted::LostRace(existing))
    }
}

enum Inserted {
    Created(Account),
    LostRace(Account),
}
