//! Signing service adapters.

use crate::seal::{
    domain::{IssuedSignature, Vds},
    error::SignerError,
    ports::{StringEncoder, signer::{Signer, SignerResult}},
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use super::JsonStringEncoder;

/// Signer returning fixed demonstration values.
///
/// Seals signed this way carry no cryptographic proof and must never be
/// issued to holders.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSigner;

impl DemoSigner {
    /// Algorithm placed on demonstration seals.
    pub const ALGORITHM: &'static str = "DEMONSTRATION_ALGORITHM_ADDED_BY_DEMO_SIGNING_SERVICE";
    /// Certificate placed on demonstration seals.
    pub const CERTIFICATE: &'static str =
        "DEMONSTRATION_CERTIFICATE_ADDED_BY_DEMO_SIGNING_SERVICE";
    /// Signature value placed on demonstration seals.
    pub const VALUE: &'static str = "DEMONSTRATION_VALUE_ADDED_BY_DEMO_SIGNING_SERVICE";
}

#[async_trait]
impl Signer for DemoSigner {
    async fn sign(&self, _: &Vds) -> SignerResult<IssuedSignature> {
        Ok(IssuedSignature::new(
            Self::ALGORITHM,
            Self::CERTIFICATE,
            Self::VALUE,
        ))
    }
}

/// Configuration for [`HttpSigner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSignerConfig {
    /// Full URL of the signing endpoint.
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "HttpSignerConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpSignerConfig {
    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    const fn default_timeout_secs() -> u64 {
        30
    }
}

/// Signer that posts the signing payload to a remote signing service.
///
/// The payload is sent as the `application/json` request body. A success
/// response must carry a JSON object with `alg`, `cer` and `sigvl`.
/// Requests are not retried.
#[derive(Debug, Clone)]
pub struct HttpSigner<E = JsonStringEncoder> {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    encoder: E,
}

impl HttpSigner {
    /// Creates a signer that encodes payloads as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::Unavailable` if the endpoint is not a valid
    /// URL or the HTTP client cannot be built.
    pub fn new(config: &HttpSignerConfig) -> SignerResult<Self> {
        Self::with_encoder(config, JsonStringEncoder)
    }
}

impl<E: StringEncoder> HttpSigner<E> {
    /// Creates a signer with a custom payload encoder.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::Unavailable` if the endpoint is not a valid
    /// URL or the HTTP client cannot be built.
    pub fn with_encoder(config: &HttpSignerConfig, encoder: E) -> SignerResult<Self> {
        let endpoint = reqwest::Url::parse(&config.endpoint).map_err(|err| {
            SignerError::unavailable(format!("invalid endpoint '{}': {err}", config.endpoint))
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                SignerError::unavailable(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            client,
            endpoint,
            encoder,
        })
    }

    /// Returns the signing endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl<E: StringEncoder> Signer for HttpSigner<E> {
    #[instrument(name = "http_sign", skip_all, fields(endpoint = %self.endpoint))]
    async fn sign(&self, vds: &Vds) -> SignerResult<IssuedSignature> {
        let payload = self.encoder.encode_for_signing(vds)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| SignerError::unavailable(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SignerError::unavailable(err.to_string()))?;
        if !status.is_success() {
            return Err(SignerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(%status, "signing service responded");

        serde_json::from_str(&body).map_err(|err| SignerError::invalid_response(err.to_string()))
    }
}
