use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use partline_auth_types::bearer::BearerToken;
use partline_domain::profile::GeoPoint;

use crate::error::IdentityServiceError;
use crate::handlers::authenticate;
use crate::state::AppState;
use crate::usecase::profile::{AddAddressInput, AddAddressUseCase, UpdateProfileUseCase};

// ── PATCH /user/update-profile ───────────────────────────────────────────────

/// The body is kept as raw JSON here; the usecase parses it against the
/// account's stored role, which is where unknown-field rejection happens.
pub async fn update_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<serde_json::Value>,
) -> Result<StatusCode, IdentityServiceError> {
    let info = authenticate(&token, &state.jwt_secret)?;
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(info.account_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /user/add-address ───────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddAddressRequest {
    pub tag: String,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub is_default: bool,
}

pub async fn add_address(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<AddAddressRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), IdentityServiceError> {
    let info = authenticate(&token, &state.jwt_secret)?;
    let usecase = AddAddressUseCase {
        accounts: state.account_repo(),
    };
    let address = usecase
        .execute(
            info.account_id,
            AddAddressInput {
                tag: body.tag,
                address_line: body.address_line,
                city: body.city,
                state: body.state,
                pincode: body.pincode,
                location: body.location,
                is_default: body.is_default,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(address).unwrap_or_default()),
    ))
}
