/// Owner dashboard
///
/// Mounted at the `OwnerDashboard` route. Fetches every tenant on mount,
/// shows one row per tenant (name and payment status), opens a detail
/// overlay on tap and deletes on swipe. The local tenant list is a
/// transient copy: it is replaced on every fetch and pruned only after the
/// backend confirms a delete.
///
/// # Refresh
///
/// The creation form does not call back into the dashboard. It publishes a
/// `Created` event; the dashboard drains its subscription in
/// [`OwnerDashboard::on_focus`] and re-fetches when one arrived.

use crate::alert::Alert;
use crate::navigation::{NavigationError, Route};
use crate::scope::{ScopeGuard, ScreenScope};
use crate::screens::{ActionOutcome, ScreenContext};
use chrono::{DateTime, Utc};
use leasedesk_shared::events::TenantEvent;
use leasedesk_shared::models::tenant::{PaymentStatus, Tenant, TenantId};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Dashboard heading
pub const DASHBOARD_TITLE: &str = "Welcome to Owner Dashboard!";

/// Heading above the tenant rows
pub const SECTION_TITLE: &str = "Tenant Overview";

/// Shown instead of the list when there are no tenants
pub const EMPTY_PLACEHOLDER: &str = "No tenants added yet.";

/// Shown while a fetch is in flight
pub const LOADING_TEXT: &str = "Loading tenants...";

/// Shown in the detail overlay for a missing lease date
pub const MISSING_DATE: &str = "Not set";

/// One dismissible tenant row
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRow {
    pub id: TenantId,
    pub name: String,
    pub payment_status: PaymentStatus,
}

impl TenantRow {
    fn from_tenant(tenant: &Tenant) -> Self {
        TenantRow {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            payment_status: tenant.effective_payment_status(),
        }
    }

    /// Payment status text shown on the row
    pub fn status_label(&self) -> &'static str {
        self.payment_status.as_str()
    }
}

/// Detail overlay contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    /// Lease start as a UTC calendar date, e.g. `1/31/2024`
    ///
    /// Dates are shown in UTC, the same zone the console reads them in, so a
    /// date entered as `2024-01-31` is displayed as `1/31/2024` everywhere.
    pub lease_start: String,
    /// Lease end as a UTC calendar date
    pub lease_end: String,
}

impl TenantDetails {
    fn from_tenant(tenant: &Tenant) -> Self {
        TenantDetails {
            name: tenant.name.clone(),
            email: tenant.email.clone(),
            address: tenant.address.clone(),
            phone: tenant.phone.clone(),
            lease_start: calendar_date(tenant.lease_start),
            lease_end: calendar_date(tenant.lease_end),
        }
    }
}

/// Main area of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardBody {
    /// A fetch is in flight
    Loading,

    /// No tenants; show [`EMPTY_PLACEHOLDER`]
    Empty,

    /// One row per tenant, in backend order
    List(Vec<TenantRow>),
}

/// Everything the dashboard draws
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub body: DashboardBody,
    pub details: Option<TenantDetails>,
}

/// Owner dashboard state
pub struct OwnerDashboard {
    ctx: ScreenContext,
    scope: ScreenScope,
    tenants: Vec<Tenant>,
    loading: bool,
    selected: Option<Tenant>,
    events: Option<broadcast::Receiver<TenantEvent>>,
}

impl OwnerDashboard {
    /// Creates an empty, unmounted dashboard
    pub fn new(ctx: &ScreenContext) -> Self {
        OwnerDashboard {
            ctx: ctx.clone(),
            scope: ctx.new_scope(),
            tenants: Vec::new(),
            loading: false,
            selected: None,
            events: None,
        }
    }

    /// Subscribes to tenant events and fetches the tenant list
    pub async fn mount(&mut self) -> ActionOutcome {
        if self.events.is_none() {
            self.events = Some(self.ctx.events.subscribe());
        }
        self.fetch_tenants().await
    }

    /// Replaces the local list with the backend's
    ///
    /// On failure the current list is kept and an error alert is shown.
    pub async fn fetch_tenants(&mut self) -> ActionOutcome {
        self.loading = true;
        let result = self.scope.run(self.ctx.api.list_tenants()).await;
        self.loading = false;

        match result {
            Ok(tenants) => {
                tracing::debug!(count = tenants.len(), "dashboard tenants refreshed");
                self.tenants = tenants;
                ActionOutcome::Done
            }
            Err(err) if err.is_cancelled() => {
                tracing::debug!("dashboard unmounted before fetch finished");
                ActionOutcome::Cancelled
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching tenants");
                self.ctx.alerts.present(Alert::error("Failed to fetch tenants."));
                ActionOutcome::Failed
            }
        }
    }

    /// Deletes a tenant, removing it locally once the backend confirms
    pub async fn delete_tenant(&mut self, id: &TenantId) -> ActionOutcome {
        let result = self.scope.run(self.ctx.api.delete_tenant(id)).await;
        match result {
            Ok(()) => {
                tracing::info!(%id, "tenant deleted");
                self.tenants.retain(|tenant| &tenant.id != id);
                if self.selected.as_ref().is_some_and(|tenant| &tenant.id == id) {
                    self.selected = None;
                }
                self.ctx
                    .alerts
                    .present(Alert::success("Tenant deleted successfully"));
                self.ctx.events.publish(TenantEvent::Deleted { id: id.clone() });
                ActionOutcome::Done
            }
            Err(err) if err.is_cancelled() => {
                tracing::debug!(%id, "dashboard unmounted before delete finished");
                ActionOutcome::Cancelled
            }
            Err(err) => {
                tracing::error!(%id, error = %err, "error deleting tenant");
                self.ctx.alerts.present(Alert::error("Failed to delete tenant."));
                ActionOutcome::Failed
            }
        }
    }

    /// Applies tenant events published while the dashboard was covered
    ///
    /// Re-fetches if a tenant was created elsewhere; returns true if it did.
    pub async fn on_focus(&mut self) -> bool {
        let mut refresh = false;

        if let Some(events) = self.events.as_mut() {
            loop {
                match events.try_recv() {
                    Ok(TenantEvent::Created { name }) => {
                        tracing::debug!(%name, "tenant created elsewhere");
                        refresh = true;
                    }
                    Ok(TenantEvent::Deleted { id }) => {
                        self.tenants.retain(|tenant| tenant.id != id);
                    }
                    Err(TryRecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "tenant events lagged, refreshing");
                        refresh = true;
                    }
                    Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                }
            }
        }

        if refresh {
            self.fetch_tenants().await;
        }
        refresh
    }

    /// Opens the detail overlay for `id`; returns false if unknown
    pub fn show_details(&mut self, id: &TenantId) -> bool {
        self.selected = self.tenants.iter().find(|tenant| &tenant.id == id).cloned();
        self.selected.is_some()
    }

    /// Closes the detail overlay
    pub fn close_details(&mut self) {
        self.selected = None;
    }

    /// Detail overlay contents, if open
    pub fn details(&self) -> Option<TenantDetails> {
        self.selected.as_ref().map(TenantDetails::from_tenant)
    }

    /// Opens the creation form
    pub fn add_tenant(&self) -> Result<(), NavigationError> {
        self.ctx.navigator.navigate(Route::TenantList)
    }

    /// Local tenant copy
    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current view model
    pub fn view(&self) -> DashboardView {
        let body = if self.loading {
            DashboardBody::Loading
        } else if self.tenants.is_empty() {
            DashboardBody::Empty
        } else {
            DashboardBody::List(self.tenants.iter().map(TenantRow::from_tenant).collect())
        };

        DashboardView {
            body,
            details: self.details(),
        }
    }

    /// Handle that unmounts this screen's requests from elsewhere
    pub fn lifetime(&self) -> ScopeGuard {
        self.scope.guard()
    }

    /// Cancels in-flight requests and drops the event subscription
    pub fn unmount(&mut self) {
        self.scope.cancel();
        self.events = None;
    }
}

fn calendar_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}
