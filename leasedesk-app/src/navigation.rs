/// Route table and navigation stack
///
/// The app has a fixed set of named routes. [`Navigator`] is a cheap,
/// clonable handle to one navigation stack; screens hold a clone to move
/// forward (`navigate`) or return (`go_back`).
///
/// # Route Table
///
/// ```text
/// StartScreen               (start route, public)
/// LoginScreen               (public)
/// RegistrationScreen        (public)
/// TenantRegistrationScreen  (public)
/// OwnerRegistrationScreen   (public)
/// ForgotPasswordScreen      (public)
/// TenantDashboard           (signed-in only)
/// OwnerDashboard            (signed-in only)
/// TenantList                (signed-in only)
/// ```

use leasedesk_shared::auth::AuthState;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Named screen in the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    StartScreen,
    LoginScreen,
    RegistrationScreen,
    TenantRegistrationScreen,
    OwnerRegistrationScreen,
    ForgotPasswordScreen,
    TenantDashboard,
    OwnerDashboard,
    TenantList,
}

/// Every route, in declaration order
pub const ROUTE_TABLE: [Route; 9] = [
    Route::StartScreen,
    Route::LoginScreen,
    Route::RegistrationScreen,
    Route::TenantRegistrationScreen,
    Route::OwnerRegistrationScreen,
    Route::ForgotPasswordScreen,
    Route::TenantDashboard,
    Route::OwnerDashboard,
    Route::TenantList,
];

/// Route every navigation stack starts at
pub const START_ROUTE: Route = Route::StartScreen;

impl Route {
    /// Route name as used in the route table
    pub fn name(&self) -> &'static str {
        match self {
            Route::StartScreen => "StartScreen",
            Route::LoginScreen => "LoginScreen",
            Route::RegistrationScreen => "RegistrationScreen",
            Route::TenantRegistrationScreen => "TenantRegistrationScreen",
            Route::OwnerRegistrationScreen => "OwnerRegistrationScreen",
            Route::ForgotPasswordScreen => "ForgotPasswordScreen",
            Route::TenantDashboard => "TenantDashboard",
            Route::OwnerDashboard => "OwnerDashboard",
            Route::TenantList => "TenantList",
        }
    }

    /// Returns true for routes that show tenant data
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::TenantDashboard | Route::OwnerDashboard | Route::TenantList
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Route needs a signed-in user
    #[error("{0} requires a signed-in user")]
    Unauthenticated(Route),
}

/// Handle to a navigation stack
///
/// Clones share the same stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Arc<Mutex<Vec<Route>>>,
    start: Route,
    auth: watch::Receiver<AuthState>,
}

impl Navigator {
    /// Creates a stack at `start`, guarded by the given auth state
    pub fn new(start: Route, auth: watch::Receiver<AuthState>) -> Self {
        Navigator {
            stack: Arc::new(Mutex::new(vec![start])),
            start,
            auth,
        }
    }

    fn stack(&self) -> MutexGuard<'_, Vec<Route>> {
        self.stack
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pushes `route` onto the stack
    ///
    /// Navigating to the route already on top is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Unauthenticated`] if `route` shows tenant
    /// data and nobody is signed in.
    pub fn navigate(&self, route: Route) -> Result<(), NavigationError> {
        if route.requires_auth() && !self.auth.borrow().is_authenticated() {
            tracing::warn!(%route, "navigation refused, not signed in");
            return Err(NavigationError::Unauthenticated(route));
        }

        let mut stack = self.stack();
        if stack.last() != Some(&route) {
            tracing::debug!(from = ?stack.last(), to = %route, "navigate");
            stack.push(route);
        }
        Ok(())
    }

    /// Pops the top route; returns false at the root
    pub fn go_back(&self) -> bool {
        let mut stack = self.stack();
        if stack.len() > 1 {
            let left = stack.pop();
            tracing::debug!(?left, "navigate back");
            true
        } else {
            false
        }
    }

    /// Returns the route on top of the stack
    pub fn current(&self) -> Route {
        self.stack().last().copied().unwrap_or(self.start)
    }

    /// Returns the whole stack, root first
    pub fn history(&self) -> Vec<Route> {
        self.stack().clone()
    }

    /// Returns true if `route` is anywhere on the stack
    pub fn contains(&self, route: Route) -> bool {
        self.stack().contains(&route)
    }

    /// Clears the stack back to the start route
    pub fn reset(&self) {
        let mut stack = self.stack();
        stack.clear();
        stack.push(self.start);
        tracing::debug!(start = %self.start, "navigation reset");
    }

    /// Drops back to the start route if a protected route is showing
    /// while nobody is signed in; returns true if it did
    pub fn enforce_auth(&self) -> bool {
        if self.auth.borrow().is_authenticated() {
            return false;
        }
        if self.stack().iter().any(Route::requires_auth) {
            tracing::info!("signed out, leaving protected routes");
            self.reset();
            return true;
        }
        false
    }
}
