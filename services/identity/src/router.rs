use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use partline_core::health::{healthz, readyz};
use partline_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{delete_user, get_user, list_users, update_user},
    auth::{get_me, request_otp, verify_otp},
    pin::{create_pin, reset_pin, verify_pin},
    profile::{add_address, update_profile},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP login / registration
        .route("/auth/request-otp", post(request_otp))
        .route("/auth/verify-otp", post(verify_otp))
        .route("/auth/me", get(get_me))
        // PIN
        .route("/user/create-pin", post(create_pin))
        .route("/user/verify-pin", post(verify_pin))
        .route("/user/reset-pin", post(reset_pin))
        // Profile
        .route("/user/update-profile", patch(update_profile))
        .route("/user/add-address", post(add_address))
        // Admin
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}", get(get_user))
        .route("/admin/users/{id}", patch(update_user))
        .route("/admin/users/{id}", delete(delete_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
