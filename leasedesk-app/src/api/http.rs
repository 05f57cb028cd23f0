/// HTTP implementation of [`TenantApi`]
///
/// Requests carry no credentials. No retries are attempted; a timeout is
/// applied only when one is configured.

use crate::api::TenantApi;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use leasedesk_shared::models::tenant::{CreateTenant, Tenant, TenantId};
use reqwest::{Client, Response, Url};

/// Tenant API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpTenantApi {
    client: Client,
    base_url: Url,
}

impl HttpTenantApi {
    /// Creates a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTenantApi {
            client: builder.build()?,
            base_url,
        })
    }

    /// Returns the backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/tenants`
    pub fn tenants_url(&self) -> ClientResult<Url> {
        self.url_for(&["tenants"])
    }

    /// `{base}/tenants/{id}`, with the id percent-encoded
    pub fn tenant_url(&self, id: &TenantId) -> ClientResult<Url> {
        self.url_for(&["tenants", id.as_str()])
    }

    fn url_for(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns non-success responses into [`ClientError::Status`]
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[async_trait]
impl TenantApi for HttpTenantApi {
    async fn list_tenants(&self) -> ClientResult<Vec<Tenant>> {
        let url = self.tenants_url()?;
        tracing::debug!(%url, "GET tenants");

        let response = ensure_success(self.client.get(url).send().await?).await?;
        let body = response.bytes().await?;
        let tenants: Vec<Tenant> = serde_json::from_slice(&body)?;

        tracing::debug!(count = tenants.len(), "fetched tenants");
        Ok(tenants)
    }

    async fn create_tenant(&self, tenant: &CreateTenant) -> ClientResult<()> {
        let url = self.tenants_url()?;
        tracing::debug!(%url, name = %tenant.name, "POST tenant");

        ensure_success(self.client.post(url).json(tenant).send().await?).await?;
        Ok(())
    }

    async fn delete_tenant(&self, id: &TenantId) -> ClientResult<()> {
        let url = self.tenant_url(id)?;
        tracing::debug!(%url, "DELETE tenant");

        ensure_success(self.client.delete(url).send().await?).await?;
        Ok(())
    }
}
