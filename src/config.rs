use crate::application::relay::{DEFAULT_SESSION_TTL, RelaySettings};
use crate::domain::checkout::MerchantProfile;
use crate::infrastructure::daftra::DaftraConfig;
use crate::infrastructure::mpgs::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT, MpgsConfig};
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Connection and policy settings, read from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct RelayConfig {
    /// Gateway base URL
    #[arg(long, env = "MPGS_HOST", default_value = "https://ap-gateway.mastercard.com/")]
    pub mpgs_host: String,

    /// Gateway merchant id
    #[arg(long, env = "MERCHANT_ID", default_value = "")]
    pub merchant_id: String,

    /// Gateway API password
    #[arg(long, env = "API_PASSWORD", default_value = "", hide_env_values = true)]
    pub api_password: String,

    /// Gateway REST API version
    #[arg(long, env = "MPGS_API_VERSION", default_value_t = DEFAULT_API_VERSION)]
    pub api_version: u16,

    /// Invoicing platform account domain
    #[arg(long, env = "DAFTRA_DOMAIN", default_value = "")]
    pub daftra_domain: String,

    /// Invoicing platform API key
    #[arg(long, env = "DAFTRA_API_KEY", default_value = "", hide_env_values = true)]
    pub daftra_api_key: String,

    /// Storefront base URL used for return and error redirects
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,

    /// Merchant name shown on the hosted checkout page
    #[arg(long, env = "MERCHANT_NAME", default_value = "Online Store")]
    pub merchant_name: String,

    /// Merchant logo shown on the hosted checkout page
    #[arg(long, env = "MERCHANT_LOGO_URL")]
    pub merchant_logo_url: Option<String>,

    /// Timeout for every upstream HTTP call, in seconds
    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// How long checkout customer details are kept, in seconds
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = DEFAULT_SESSION_TTL.as_secs())]
    pub session_ttl_secs: u64,

    /// Card fee added to the amount charged at the gateway, in percent
    #[arg(long, env = "CARD_SURCHARGE_PERCENT")]
    pub card_surcharge_percent: Option<Decimal>,

    /// JSON file that keeps checkout customers between runs. Uses memory if omitted.
    #[arg(long, env = "SESSION_STORE_FILE")]
    pub session_file: Option<PathBuf>,
}

impl RelayConfig {
    pub fn mpgs(&self) -> MpgsConfig {
        MpgsConfig {
            host: self.mpgs_host.clone(),
            merchant_id: self.merchant_id.clone(),
            api_password: self.api_password.clone(),
            api_version: self.api_version,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn daftra(&self) -> DaftraConfig {
        DaftraConfig {
            domain: self.daftra_domain.clone(),
            api_key: self.daftra_api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn settings(&self) -> RelaySettings {
        RelaySettings {
            merchant: MerchantProfile {
                name: self.merchant_name.clone(),
                logo_url: self.merchant_logo_url.clone(),
                site_url: self.site_url.clone(),
            },
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            surcharge_percent: self.card_surcharge_percent,
        }
    }
}
