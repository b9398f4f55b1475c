use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use partline_auth_types::bearer::BearerToken;

use crate::error::IdentityServiceError;
use crate::handlers::{AccountResponse, authenticate};
use crate::state::AppState;
use crate::usecase::login::{RequestOtpInput, RequestOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};
use crate::usecase::profile::GetAccountUseCase;

// ── POST /auth/request-otp ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub phone: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn request_otp(
    State(state): State<AppState>,
    Json(body): Json<RequestOtpRequest>,
) -> Result<Json<MessageResponse>, IdentityServiceError> {
    let usecase = RequestOtpUseCase {
        gateway: state.otp.clone(),
    };
    usecase
        .execute(RequestOtpInput { phone: body.phone })
        .await?;
    Ok(Json(MessageResponse {
        message: "otp sent".to_owned(),
    }))
}

// ── POST /auth/verify-otp ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
    pub role: String,
    pub referral_code: Option<String>,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<(StatusCode, Json<AccessTokenResponse>), IdentityServiceError> {
    let usecase = VerifyOtpUseCase {
        accounts: state.account_repo(),
        gateway: state.otp.clone(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
            phone: body.phone,
            otp: body.otp,
            role: body.role,
            referral_code: body.referral_code,
        })
        .await?;

    let status = if out.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(AccessTokenResponse {
            access_token: out.access_token,
            access_token_exp: out.access_token_exp,
        }),
    ))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<AccountResponse>, IdentityServiceError> {
    let info = authenticate(&token, &state.jwt_secret)?;
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(info.account_id).await?;
    Ok(Json(account.into()))
}
