use sea_orm::DatabaseConnection;

use crate::infra::db::DbAccountRepository;
use crate::infra::otp::AnyOtpGateway;

/// Shared application state passed to every handler via axum `State`.
///
/// The sequence port has no handler consumer — collaborator services
/// construct `DbSequenceRepository` from their own connection — so no
/// constructor helper for it lives here.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub otp: AnyOtpGateway,
    pub jwt_secret: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }
}
