/// App shell
///
/// Owns the auth state and the navigation stack. While the auth state is
/// `Unknown` the shell shows a loading indicator; once the provider has
/// answered it exposes the route table starting at `StartScreen`.
///
/// # Lifecycle
///
/// ```text
/// new() ──► mount() ──► [provider subscription + auth guard task] ──► unmount()/drop
/// ```
///
/// `mount` must be called from within a Tokio runtime.

use crate::alert::AlertPresenter;
use crate::api::TenantApi;
use crate::navigation::{Navigator, Route, ROUTE_TABLE, START_ROUTE};
use crate::scope::ScreenScope;
use crate::screens::ScreenContext;
use leasedesk_shared::auth::{AuthProvider, AuthState, AuthStateHolder};
use leasedesk_shared::events::TenantEvents;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What the shell draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    /// Auth state not known yet
    Loading,

    /// Navigator is live
    Ready {
        current: Route,
        routes: &'static [Route],
    },
}

/// Root of the app
pub struct AppShell {
    provider: Arc<dyn AuthProvider>,
    auth: AuthStateHolder,
    navigator: Navigator,
    root: ScreenScope,
    context: ScreenContext,
    guard: Option<JoinHandle<()>>,
}

impl AppShell {
    /// Builds an unmounted shell
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        api: Arc<dyn TenantApi>,
        alerts: Arc<dyn AlertPresenter>,
        rent_per_month: f64,
    ) -> Self {
        let auth = AuthStateHolder::new();
        let navigator = Navigator::new(START_ROUTE, auth.subscribe());
        let root = ScreenScope::new();
        let context = ScreenContext::new(
            api,
            alerts,
            navigator.clone(),
            TenantEvents::default(),
            rent_per_month,
            root.token().clone(),
        );

        AppShell {
            provider,
            auth,
            navigator,
            root,
            context,
            guard: None,
        }
    }

    /// Subscribes to the auth provider
    ///
    /// Also starts a task that drops protected routes from the stack
    /// whenever the user signs out.
    pub fn mount(&mut self) {
        self.auth.start(Arc::clone(&self.provider));

        if self.guard.is_none() {
            let mut state_rx = self.auth.subscribe();
            let navigator = self.navigator.clone();
            self.guard = Some(tokio::spawn(async move {
                while state_rx.changed().await.is_ok() {
                    navigator.enforce_auth();
                }
            }));
        }
        self.apply_auth_state();
    }

    /// Tears down the auth subscription and cancels every screen request
    pub fn unmount(&mut self) {
        self.auth.stop();
        if let Some(guard) = self.guard.take() {
            guard.abort();
        }
        self.root.cancel();
    }

    /// Returns true between `mount` and `unmount`
    pub fn is_mounted(&self) -> bool {
        self.auth.is_running()
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    /// Subscribes to auth state changes
    pub fn subscribe_auth(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }

    /// Resets navigation if a protected route is showing while signed out
    pub fn apply_auth_state(&self) -> bool {
        self.navigator.enforce_auth()
    }

    pub fn view(&self) -> ShellView {
        if self.auth_state().is_unknown() {
            ShellView::Loading
        } else {
            ShellView::Ready {
                current: self.navigator.current(),
                routes: &ROUTE_TABLE,
            }
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Context for screens mounted under this shell
    pub fn context(&self) -> ScreenContext {
        self.context.clone()
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.unmount();
    }
}
