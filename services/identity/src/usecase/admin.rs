use uuid::Uuid;

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::IdentityServiceError;

// Admin-only gating lives in the handlers; these usecases assume the caller
// has already been checked.

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> ListAccountsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Account>, IdentityServiceError> {
        self.accounts.list_all().await
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<R: AccountRepository> {
    pub accounts: R,
}

impl<R: AccountRepository> DeleteAccountUseCase<R> {
    pub async fn execute(&self, account_id: Uuid) -> Result<(), IdentityServiceError> {
        let deleted = self.accounts.delete(account_id).await?;
        if !deleted {
            return Err(IdentityServiceError::AccountNotFound);
        }
        Ok(())
    }
}
