/// OTP gateway backend selection. `http` talks to the upstream SMS provider;
/// `memory` is the in-process single-use store for tests and offline use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpProvider {
    Http,
    Memory,
}

/// Identity service configuration loaded from environment variables.
#[derive(Debug)]
pub struct IdentityConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens. Rotating it invalidates
    /// every outstanding session.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3110). Env var: `IDENTITY_PORT`.
    pub identity_port: u16,
    /// OTP backend: `http` or `memory` (default). Env var: `OTP_PROVIDER`.
    pub otp_provider: OtpProvider,
    /// Upstream OTP provider API key. Required when `OTP_PROVIDER=http`.
    pub otp_api_key: Option<String>,
    /// Upstream OTP provider base URL.
    pub otp_base_url: String,
    /// SMS template name registered with the provider.
    pub otp_template: String,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        let otp_provider = match std::env::var("OTP_PROVIDER").as_deref() {
            Ok("http") => OtpProvider::Http,
            Ok("memory") | Err(_) => OtpProvider::Memory,
            Ok(other) => panic!("unknown OTP_PROVIDER: {other}"),
        };
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            identity_port: std::env::var("IDENTITY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            otp_provider,
            otp_api_key: std::env::var("OTP_API_KEY").ok(),
            otp_base_url: std::env::var("OTP_BASE_URL")
                .unwrap_or_else(|_| "https://2factor.in/API/V1".to_owned()),
            otp_template: std::env::var("OTP_TEMPLATE").unwrap_or_else(|_| "PARTLINE".to_owned()),
        }
    }
}
