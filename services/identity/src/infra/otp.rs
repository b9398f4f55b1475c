use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::RngExt;
use serde::Deserialize;

use crate::domain::repository::OtpGateway;
use crate::error::IdentityServiceError;

/// SMS provider client. The provider issues the code itself (AUTOGEN) and
/// holds it server side; we only relay the phone number and later the
/// candidate code.
#[derive(Clone)]
pub struct HttpOtpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    template: String,
}

#[derive(Deserialize)]
struct ProviderResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Details")]
    #[allow(dead_code)]
    details: Option<String>,
}

impl HttpOtpGateway {
    pub fn new(base_url: String, api_key: String, template: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("build otp http client");
        Self {
            client,
            base_url,
            api_key,
            template,
        }
    }
}

impl OtpGateway for HttpOtpGateway {
    async fn request_code(&self, phone: &str) -> Result<(), IdentityServiceError> {
        let url = format!(
            "{}/{}/SMS/{}/AUTOGEN/{}",
            self.base_url, self.api_key, phone, self.template
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("otp provider unreachable: {err}");
                IdentityServiceError::GatewayUnavailable
            })?
            .json::<ProviderResponse>()
            .await
            .map_err(|err| {
                tracing::error!("otp provider returned malformed body: {err}");
                IdentityServiceError::GatewayUnavailable
            })?;

        if response.status != "Success" {
            tracing::error!(status = %response.status, "otp provider rejected send");
            return Err(IdentityServiceError::GatewayUnavailable);
        }
        Ok(())
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, IdentityServiceError> {
        let url = format!(
            "{}/{}/SMS/VERIFY3/{}/{}",
            self.base_url, self.api_key, phone, code
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("otp provider unreachable: {err}");
                IdentityServiceError::GatewayUnavailable
            })?
            .json::<ProviderResponse>()
            .await
            .map_err(|err| {
                tracing::error!("otp provider returned malformed body: {err}");
                IdentityServiceError::GatewayUnavailable
            })?;

        // The provider answers Success only for a matching, unexpired code.
        Ok(response.status == "Success")
    }
}

const MEMORY_CODE_TTL: Duration = Duration::from_secs(300);

struct IssuedCode {
    code: String,
    issued_at: Instant,
}

/// In-process gateway for local runs and tests. Codes are single use and
/// expire after five minutes, mirroring the provider's contract.
#[derive(Clone, Default)]
pub struct MemoryOtpGateway {
    codes: Arc<Mutex<HashMap<String, IssuedCode>>>,
}

impl MemoryOtpGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a known code for a phone. Test hook.
    pub fn preload(&self, phone: &str, code: &str) {
        self.codes.lock().unwrap().insert(
            phone.to_owned(),
            IssuedCode {
                code: code.to_owned(),
                issued_at: Instant::now(),
            },
        );
    }
}

impl OtpGateway for MemoryOtpGateway {
    async fn request_code(&self, phone: &str) -> Result<(), IdentityServiceError> {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));
        tracing::info!(%phone, %code, "issued in-memory otp");
        self.codes.lock().unwrap().insert(
            phone.to_owned(),
            IssuedCode {
                code,
                issued_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, IdentityServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let Some(issued) = codes.get(phone) else {
            return Ok(false);
        };
        if issued.issued_at.elapsed() > MEMORY_CODE_TTL {
            codes.remove(phone);
            return Ok(false);
        }
        if issued.code != code {
            return Ok(false);
        }
        codes.remove(phone);
        Ok(true)
    }
}

/// Static dispatch over the configured gateway so usecases stay generic
/// over one concrete type.
#[derive(Clone)]
pub enum AnyOtpGateway {
    Http(HttpOtpGateway),
    Memory(MemoryOtpGateway),
}

impl OtpGateway for AnyOtpGateway {
    async fn request_code(&self, phone: &str) -> Result<(), IdentityServiceError> {
        match self {
            Self::Http(gateway) => gateway.request_code(phone).await,
            Self::Memory(gateway) => gateway.request_code(phone).await,
        }
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<bool, IdentityServiceError> {
        match self {
            Self::Http(gateway) => gateway.verify_code(phone, code).await,
            Self::Memory(gateway) => gateway.verify_code(phone, code).await,
        }
    }
}
