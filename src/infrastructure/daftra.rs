use crate::domain::invoice::InvoiceFinalization;
use crate::domain::ports::InvoicingPlatform;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

const SERVICE: &str = "invoicing";

#[derive(Debug, Clone)]
pub struct DaftraConfig {
    /// Account domain, e.g. `https://example.daftra.com`.
    pub domain: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Daftra API v2 client for the invoice resource.
#[derive(Clone)]
pub struct DaftraClient {
    domain: String,
    client: reqwest::Client,
}

impl DaftraClient {
    pub fn new(config: DaftraConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|_| {
                RelayError::ValidationError("Invoicing API key is not a valid header".to_string())
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            domain: config.domain.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn invoice_url(&self, invoice_id: &str) -> Result<Url> {
        let invalid_domain =
            || RelayError::ValidationError(format!("Invalid invoicing domain: {}", self.domain));
        let mut url = Url::parse(&self.domain).map_err(|_| invalid_domain())?;
        url.path_segments_mut()
            .map_err(|_| invalid_domain())?
            .pop_if_empty()
            .extend(["api2", "invoices", invoice_id]);
        Ok(url)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RelayError::UpstreamError {
            service: SERVICE,
            status: status.as_u16(),
            body,
        })
    }
}

/// Reads `data.Invoice.draft`, which Daftra reports as a bool, a number, or a
/// numeric string depending on the endpoint.
fn draft_flag(body: &Value) -> Option<bool> {
    let draft = body.pointer("/data/Invoice/draft")?;
    match draft {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait]
impl InvoicingPlatform for DaftraClient {
    async fn invoice_already_finalized(&self, invoice_id: &str) -> Result<bool> {
        let response = self.client.get(self.invoice_url(invoice_id)?).send().await?;
        let body: Value = Self::ensure_success(response).await?.json().await?;

        match draft_flag(&body) {
            Some(draft) => Ok(!draft),
            None => {
                tracing::warn!(invoice_id, "invoice response carries no draft flag");
                Ok(false)
            }
        }
    }

    async fn mark_invoice_paid(&self, finalization: &InvoiceFinalization) -> Result<()> {
        tracing::info!(invoice_id = %finalization.invoice_id, "marking invoice as paid");

        let response = self
            .client
            .post(self.invoice_url(&finalization.invoice_id)?)
            .json(&finalization.to_request())
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
