/// Configuration management for the LeaseDesk client
///
/// This module loads configuration from environment variables (and a `.env`
/// file, if present) and provides a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `LEASEDESK_API_URL`: Tenant API base URL (default: http://192.168.68.122:3000)
/// - `LEASEDESK_DEFAULT_RENT`: Monthly rent for new tenants (default: 1200)
/// - `LEASEDESK_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: none)
/// - `LEASEDESK_AUTH_USER`: User the console signs in at startup (default: none)
/// - `RUST_LOG`: Log filter (default: leasedesk_app=info,leasedesk_shared=info)
///
/// # Example
///
/// ```no_run
/// use leasedesk_app::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Talking to {}", config.api.base_url);
/// # Ok(())
/// # }
/// ```

use leasedesk_shared::models::tenant::DEFAULT_RENT_PER_MONTH;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Base URL used when `LEASEDESK_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://192.168.68.122:3000";

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tenant API configuration
    pub api: ApiConfig,

    /// Defaults applied to new tenants
    pub tenants: TenantDefaults,

    /// Console sign-in configuration
    pub auth: AuthConfig,
}

/// Tenant API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without the `/tenants` path
    pub base_url: String,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

/// Defaults applied to new tenants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDefaults {
    /// Monthly rent put on every creation request
    pub rent_per_month: f64,
}

/// Console sign-in configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// User id signed in at startup
    pub user: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source
    ///
    /// Unset and empty variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable has an invalid value.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = var("LEASEDESK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let parsed = Url::parse(&base_url)
            .map_err(|e| anyhow::anyhow!("LEASEDESK_API_URL is not a valid URL: {}", e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("LEASEDESK_API_URL must use http or https");
        }

        let rent_per_month = match var("LEASEDESK_DEFAULT_RENT") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("LEASEDESK_DEFAULT_RENT is not a number: {}", e))?,
            None => DEFAULT_RENT_PER_MONTH,
        };
        if !rent_per_month.is_finite() || rent_per_month < 0.0 {
            anyhow::bail!("LEASEDESK_DEFAULT_RENT must be a non-negative amount");
        }

        let request_timeout = match var("LEASEDESK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    anyhow::anyhow!("LEASEDESK_REQUEST_TIMEOUT_SECS is not a whole number: {}", e)
                })?;
                if secs == 0 {
                    anyhow::bail!("LEASEDESK_REQUEST_TIMEOUT_SECS must be at least 1");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                request_timeout,
            },
            tenants: TenantDefaults { rent_per_month },
            auth: AuthConfig {
                user: var("LEASEDESK_AUTH_USER"),
            },
        })
    }
}
