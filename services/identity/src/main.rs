use sea_orm::Database;
use tracing::info;

use partline_identity::config::{IdentityConfig, OtpProvider};
use partline_identity::infra::otp::{AnyOtpGateway, HttpOtpGateway, MemoryOtpGateway};
use partline_identity::router::build_router;
use partline_identity::state::AppState;

#[tokio::main]
async fn main() {
    partline_core::tracing::init_tracing();

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let otp = match config.otp_provider {
        OtpProvider::Http => AnyOtpGateway::Http(HttpOtpGateway::new(
            config.otp_base_url.clone(),
            config
                .otp_api_key
                .clone()
                .expect("OTP_API_KEY required when OTP_PROVIDER=http"),
            config.otp_template.clone(),
        )),
        OtpProvider::Memory => AnyOtpGateway::Memory(MemoryOtpGateway::new()),
    };

    let state = AppState {
        db,
        otp,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
