use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
///
/// Every failure path returns a distinguishable kind so a client can decide
/// whether to prompt re-entry, retry, or abort. Nothing is swallowed.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    // validation — 400
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("unknown role")]
    InvalidRole,
    #[error("pins do not match")]
    PinMismatch,
    #[error("pin must be exactly 4 digits")]
    InvalidPinFormat,
    #[error("invalid referral code")]
    InvalidReferralCode,
    #[error("invalid profile payload")]
    InvalidProfile,
    #[error("no fields to update")]
    MissingData,
    // authentication — 401
    #[error("otp verification failed")]
    OtpVerificationFailed,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid pin")]
    InvalidPin,
    // authorization — 403
    #[error("unauthorized as admin")]
    UnauthorizedAsAdmin,
    #[error("admin registration not allowed")]
    AdminRegistrationBlocked,
    #[error("forbidden")]
    Forbidden,
    // not found — 404
    #[error("account not found")]
    AccountNotFound,
    // conflict — 409
    #[error("account already exists, please log in instead")]
    DuplicateAccount,
    #[error("referral code already exists")]
    DuplicateReferralCode,
    // upstream — 502
    #[error("otp provider unavailable")]
    GatewayUnavailable,
    // 500
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPhone => "INVALID_PHONE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::PinMismatch => "PIN_MISMATCH",
            Self::InvalidPinFormat => "INVALID_PIN_FORMAT",
            Self::InvalidReferralCode => "INVALID_REFERRAL_CODE",
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::MissingData => "MISSING_DATA",
            Self::OtpVerificationFailed => "OTP_VERIFICATION_FAILED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidPin => "INVALID_PIN",
            Self::UnauthorizedAsAdmin => "UNAUTHORIZED_AS_ADMIN",
            Self::AdminRegistrationBlocked => "ADMIN_REGISTRATION_BLOCKED",
            Self::Forbidden => "FORBIDDEN",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::DuplicateAccount => "DUPLICATE_ACCOUNT",
            Self::DuplicateReferralCode => "DUPLICATE_REFERRAL_CODE",
            Self::GatewayUnavailable => "GATEWAY_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidPhone
            | Self::InvalidRole
            | Self::PinMismatch
            | Self::InvalidPinFormat
            | Self::InvalidReferralCode
            | Self::InvalidProfile
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::OtpVerificationFailed | Self::InvalidToken | Self::InvalidPin => {
                StatusCode::UNAUTHORIZED
            }
            Self::UnauthorizedAsAdmin | Self::AdminRegistrationBlocked | Self::Forbidden => {
                StatusCode::FORBIDDEN
            }
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateAccount | Self::DuplicateReferralCode => StatusCode::CONFLICT,
            Self::GatewayUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        // Authorization failures are audit-relevant.
        if matches!(self, Self::UnauthorizedAsAdmin | Self::AdminRegistrationBlocked) {
            tracing::warn!(kind = self.kind(), "blocked privileged action");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
