use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use partline_auth_types::bearer::BearerToken;

use crate::error::IdentityServiceError;
use crate::handlers::{AccountResponse, authenticate_admin};
use crate::state::AppState;
use crate::usecase::admin::{DeleteAccountUseCase, ListAccountsUseCase};
use crate::usecase::profile::{GetAccountUseCase, UpdateProfileUseCase};

// ── GET /admin/users ─────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<AccountResponse>>, IdentityServiceError> {
    authenticate_admin(&token, &state.jwt_secret)?;
    let usecase = ListAccountsUseCase {
        accounts: state.account_repo(),
    };
    let accounts = usecase.execute().await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

// ── GET /admin/users/{id} ────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, IdentityServiceError> {
    authenticate_admin(&token, &state.jwt_secret)?;
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(id).await?;
    Ok(Json(account.into()))
}

// ── PATCH /admin/users/{id} ──────────────────────────────────────────────────

pub async fn update_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, IdentityServiceError> {
    authenticate_admin(&token, &state.jwt_secret)?;
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, IdentityServiceError> {
    authenticate_admin(&token, &state.jwt_secret)?;
    let usecase = DeleteAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
