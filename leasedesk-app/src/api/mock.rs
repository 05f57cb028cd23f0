/// In-memory tenant backend for testing and demos
///
/// `MockTenantApi` keeps tenants in memory, records every call in order and
/// can be told to fail or stall individual operations. It is useful for:
/// - Testing screens without a running backend
/// - Exercising cancellation (via an artificial delay)
/// - Demoing the console front-end offline
///
/// # Example
///
/// ```
/// use leasedesk_app::api::{ApiCall, ApiOperation, MockTenantApi, TenantApi};
///
/// # async fn example() {
/// let api = MockTenantApi::new();
/// api.fail(ApiOperation::List, true);
///
/// assert!(api.list_tenants().await.is_err());
/// assert_eq!(api.calls(), vec![ApiCall::List]);
/// # }
/// ```

use crate::api::TenantApi;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use leasedesk_shared::models::tenant::{CreateTenant, Tenant, TenantId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Create,
    Delete,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(CreateTenant),
    Delete(TenantId),
}

#[derive(Debug, Default)]
struct MockState {
    tenants: Vec<Tenant>,
    calls: Vec<ApiCall>,
    failing: HashSet<ApiOperation>,
    delay: Option<Duration>,
}

/// In-memory [`TenantApi`]
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockTenantApi {
    state: Arc<Mutex<MockState>>,
}

impl MockTenantApi {
    /// Creates an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-loaded with `tenants`
    pub fn with_tenants(tenants: Vec<Tenant>) -> Self {
        let api = Self::new();
        api.state().tenants = tenants;
        api
    }

    /// Makes `operation` fail with a 500 until switched off
    pub fn fail(&self, operation: ApiOperation, failing: bool) {
        let mut state = self.state();
        if failing {
            state.failing.insert(operation);
        } else {
            state.failing.remove(&operation);
        }
    }

    /// Delays every call by `delay` before it takes effect
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state().delay = delay;
    }

    /// Returns the stored tenants
    pub fn tenants(&self) -> Vec<Tenant> {
        self.state().tenants.clone()
    }

    /// Returns every call made so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `call`, waits out the configured delay and applies failure injection
    async fn begin(&self, call: ApiCall, operation: ApiOperation) -> ClientResult<()> {
        let delay = {
            let mut state = self.state();
            state.calls.push(call);
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.state().failing.contains(&operation) {
            return Err(ClientError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TenantApi for MockTenantApi {
    async fn list_tenants(&self) -> ClientResult<Vec<Tenant>> {
        self.begin(ApiCall::List, ApiOperation::List).await?;
        Ok(self.tenants())
    }

    async fn create_tenant(&self, tenant: &CreateTenant) -> ClientResult<()> {
        self.begin(ApiCall::Create(tenant.clone()), ApiOperation::Create)
            .await?;

        self.state().tenants.push(Tenant {
            id: TenantId::new(Uuid::new_v4().to_string()),
            name: tenant.name.clone(),
            email: tenant.email.clone(),
            address: tenant.address.clone(),
            phone: tenant.phone.clone(),
            lease_start: Some(tenant.lease_start),
            lease_end: Some(tenant.lease_end),
            payment_status: Some(tenant.payment_status),
            rent_per_month: Some(tenant.rent_per_month),
        });
        Ok(())
    }

    async fn delete_tenant(&self, id: &TenantId) -> ClientResult<()> {
        self.begin(ApiCall::Delete(id.clone()), ApiOperation::Delete)
            .await?;

        let mut state = self.state();
        let before = state.tenants.len();
        state.tenants.retain(|tenant| &tenant.id != id);
        if state.tenants.len() == before {
            return Err(ClientError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                body: "Not Found".to_string(),
            });
        }
        Ok(())
    }
}
