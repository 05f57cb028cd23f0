/// Headless screens
///
/// Each screen is a plain struct holding its view state. Methods correspond
/// to user actions; `view()`-style accessors expose what a front-end should
/// draw. Screens are driven through `&mut self`, so their state is only ever
/// touched by their own handlers.
///
/// # Screens
///
/// - [`tenant_list`]: Tenant creation form (the `TenantList` route)
/// - [`owner_dashboard`]: Tenant overview with detail and delete (the `OwnerDashboard` route)
///
/// # Example
///
/// ```no_run
/// use leasedesk_app::screens::{ScreenContext, owner_dashboard::OwnerDashboard};
///
/// # async fn example(ctx: ScreenContext) {
/// let mut dashboard = OwnerDashboard::new(&ctx);
/// dashboard.mount().await;
/// println!("{:?}", dashboard.view().body);
/// # }
/// ```

pub mod owner_dashboard;
pub mod tenant_list;

use crate::alert::AlertPresenter;
use crate::api::TenantApi;
use crate::navigation::Navigator;
use crate::scope::ScreenScope;
use leasedesk_shared::events::TenantEvents;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Collaborators every screen needs
///
/// Built once by the app shell and handed to each screen on creation.
#[derive(Clone)]
pub struct ScreenContext {
    /// Tenant backend
    pub api: Arc<dyn TenantApi>,

    /// Where alerts go
    pub alerts: Arc<dyn AlertPresenter>,

    /// Shared navigation stack
    pub navigator: Navigator,

    /// Tenant change notifications
    pub events: TenantEvents,

    /// Monthly rent put on new tenants
    pub rent_per_month: f64,

    lifetime: CancellationToken,
}

impl ScreenContext {
    /// Creates a context whose screens live until `lifetime` is cancelled
    pub fn new(
        api: Arc<dyn TenantApi>,
        alerts: Arc<dyn AlertPresenter>,
        navigator: Navigator,
        events: TenantEvents,
        rent_per_month: f64,
        lifetime: CancellationToken,
    ) -> Self {
        ScreenContext {
            api,
            alerts,
            navigator,
            events,
            rent_per_month,
            lifetime,
        }
    }

    /// Creates the request scope for a newly mounted screen
    pub fn new_scope(&self) -> ScreenScope {
        ScreenScope::child_of(&self.lifetime)
    }
}

/// Result of a screen action that talks to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request succeeded and the screen was updated
    Done,

    /// The request failed; an error alert was shown
    Failed,

    /// The screen unmounted first; nothing was changed
    Cancelled,
}
