/// Tenant API client
///
/// The [`TenantApi`] trait is the only way screens reach the tenant backend.
/// Two implementations ship:
///
/// - [`HttpTenantApi`]: talks to the real backend over HTTP
/// - [`MockTenantApi`]: in-memory backend for tests and demos
///
/// # Endpoints
///
/// - `GET /tenants` - List every tenant
/// - `POST /tenants` - Create a tenant
/// - `DELETE /tenants/{id}` - Delete a tenant
///
/// # Example
///
/// ```no_run
/// use leasedesk_app::api::{HttpTenantApi, TenantApi};
/// use leasedesk_app::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let api = HttpTenantApi::new(&config.api)?;
///
/// for tenant in api.list_tenants().await? {
///     println!("{} ({})", tenant.name, tenant.effective_payment_status());
/// }
/// # Ok(())
/// # }
/// ```

pub mod http;
pub mod mock;

pub use http::HttpTenantApi;
pub use mock::{ApiCall, ApiOperation, MockTenantApi};

use crate::error::ClientResult;
use async_trait::async_trait;
use leasedesk_shared::models::tenant::{CreateTenant, Tenant, TenantId};

/// Tenant backend operations
#[async_trait]
pub trait TenantApi: Send + Sync {
    /// Fetches the full tenant collection
    async fn list_tenants(&self) -> ClientResult<Vec<Tenant>>;

    /// Creates a tenant
    ///
    /// Any success status counts; the response body is ignored.
    async fn create_tenant(&self, tenant: &CreateTenant) -> ClientResult<()>;

    /// Deletes the tenant with `id`
    async fn delete_tenant(&self, id: &TenantId) -> ClientResult<()>;
}
