use crate::domain::checkout::{CheckoutSession, SessionRequest};
use crate::domain::order::OrderStatusResponse;
use crate::domain::ports::PaymentGateway;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_API_VERSION: u16 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const SERVICE: &str = "gateway";

/// Connection settings for the hosted-checkout gateway REST API.
#[derive(Debug, Clone)]
pub struct MpgsConfig {
    /// Gateway base URL, e.g. `https://ap-gateway.mastercard.com/`.
    pub host: String,
    pub merchant_id: String,
    pub api_password: String,
    pub api_version: u16,
    pub timeout: Duration,
}

/// Mastercard Payment Gateway Services client.
///
/// Authenticates with HTTP Basic auth as `merchant.<id>` and talks to the
/// `session` and `order` resources of the merchant.
#[derive(Clone)]
pub struct MpgsGateway {
    config: MpgsConfig,
    client: reqwest::Client,
}

impl MpgsGateway {
    pub fn new(config: MpgsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Merchant resource URL with `resource` appended as escaped path segments,
    /// so ids containing `/` or `?` stay inside their segment.
    fn merchant_url(&self, resource: &[&str]) -> Result<Url> {
        let invalid_host =
            || RelayError::ValidationError(format!("Invalid gateway host: {}", self.config.host));
        let mut url = Url::parse(&self.config.host).map_err(|_| invalid_host())?;
        let version = self.config.api_version.to_string();
        url.path_segments_mut()
            .map_err(|_| invalid_host())?
            .pop_if_empty()
            .extend(["api", "rest", "version", version.as_str(), "merchant"])
            .push(&self.config.merchant_id)
            .extend(resource);
        Ok(url)
    }

    fn username(&self) -> String {
        format!("merchant.{}", self.config.merchant_id)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::UpstreamError {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PaymentGateway for MpgsGateway {
    async fn initiate_checkout(&self, request: &SessionRequest) -> Result<CheckoutSession> {
        let url = self.merchant_url(&["session"])?;
        tracing::debug!(order_id = request.order_id(), %url, "creating checkout session");

        let response = self
            .client
            .post(url)
            .basic_auth(self.username(), Some(&self.config.api_password))
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn retrieve_order(&self, order_id: &str) -> Result<OrderStatusResponse> {
        let url = self.merchant_url(&["order", order_id])?;
        tracing::debug!(order_id, %url, "retrieving order");

        let response = self
            .client
            .get(url)
            .basic_auth(self.username(), Some(&self.config.api_password))
            .send()
            .await?;

        Self::decode(response).await
    }
}
