//! # LeaseDesk Console
//!
//! Terminal front-end for the LeaseDesk tenant client. Reads commands from
//! stdin; logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! LEASEDESK_AUTH_USER=owner cargo run -p leasedesk-app
//! ```

use anyhow::Context;
use leasedesk_app::api::HttpTenantApi;
use leasedesk_app::config::Config;
use leasedesk_app::console::Console;
use leasedesk_shared::auth::{AuthUser, StaticAuthProvider};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leasedesk_app=info,leasedesk_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("LeaseDesk v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    let api = HttpTenantApi::new(&config.api).context("Failed to build tenant API client")?;
    tracing::info!(base_url = %api.base_url(), "tenant API configured");

    let provider = match &config.auth.user {
        Some(user) => StaticAuthProvider::signed_in(AuthUser::new(user.clone())),
        None => StaticAuthProvider::signed_out(),
    };

    let mut console = Console::new(
        Arc::new(provider),
        Arc::new(api),
        config.tenants.rent_per_month,
        std::io::stdout(),
    );
    console.run(BufReader::new(tokio::io::stdin())).await?;

    tracing::info!("Shutting down");
    Ok(())
}
