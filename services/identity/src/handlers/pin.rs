use axum::{Json, extract::State};
use serde::Deserialize;

use partline_auth_types::bearer::BearerToken;

use crate::error::IdentityServiceError;
use crate::handlers::auth::{AccessTokenResponse, MessageResponse};
use crate::handlers::authenticate;
use crate::state::AppState;
use crate::usecase::pin::{
    ResetPinInput, ResetPinUseCase, SetPinInput, SetPinUseCase, VerifyPinInput, VerifyPinUseCase,
};

// ── POST /user/create-pin ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePinRequest {
    pub pin: String,
    pub confirm_pin: String,
}

pub async fn create_pin(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<CreatePinRequest>,
) -> Result<Json<MessageResponse>, IdentityServiceError> {
    let info = authenticate(&token, &state.jwt_secret)?;
    let usecase = SetPinUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(SetPinInput {
            account_id: info.account_id,
            pin: body.pin,
            confirm_pin: body.confirm_pin,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "pin set".to_owned(),
    }))
}

// ── POST /user/verify-pin ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyPinRequest {
    pub phone: String,
    pub pin: String,
}

pub async fn verify_pin(
    State(state): State<AppState>,
    Json(body): Json<VerifyPinRequest>,
) -> Result<Json<AccessTokenResponse>, IdentityServiceError> {
    let usecase = VerifyPinUseCase {
        accounts: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(VerifyPinInput {
            phone: body.phone,
            pin: body.pin,
        })
        .await?;
    Ok(Json(AccessTokenResponse {
        access_token: out.access_token,
        access_token_exp: out.access_token_exp,
    }))
}

// ── POST /user/reset-pin ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPinRequest {
    pub phone: String,
    pub otp: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

pub async fn reset_pin(
    State(state): State<AppState>,
    Json(body): Json<ResetPinRequest>,
) -> Result<Json<MessageResponse>, IdentityServiceError> {
    let usecase = ResetPinUseCase {
        accounts: state.account_repo(),
        gateway: state.otp.clone(),
    };
    usecase
        .execute(ResetPinInput {
            phone: body.phone,
            otp: body.otp,
            new_pin: body.new_pin,
            confirm_pin: body.confirm_pin,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "pin reset".to_owned(),
    }))
}
