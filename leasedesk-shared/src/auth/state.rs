/// Auth state holder
///
/// [`AuthStateHolder`] follows an [`AuthProvider`] subscription and exposes
/// the result as a three-valued [`AuthState`]. It has an explicit
/// `start`/`stop` lifecycle: `start` acquires exactly one subscription and
/// spawns the listener task, `stop` (or dropping the holder) aborts it.
///
/// # State Machine
///
/// ```text
///            provider resolves
/// Unknown ─────────────────────┬──> Authenticated
///                              └──> Unauthenticated
///
/// Authenticated <──── sign-in / sign-out ────> Unauthenticated
/// ```

use crate::auth::provider::{AuthProvider, CurrentUser};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Authentication state as seen by the app shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Provider has not reported yet
    #[default]
    Unknown,

    /// A user is signed in
    Authenticated,

    /// Nobody is signed in
    Unauthenticated,
}

impl AuthState {
    /// Returns true once a user is signed in
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated)
    }

    /// Returns true while the provider has not reported
    pub fn is_unknown(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }
}

impl From<&CurrentUser> for AuthState {
    fn from(current: &CurrentUser) -> Self {
        match current {
            CurrentUser::Unresolved => AuthState::Unknown,
            CurrentUser::SignedOut => AuthState::Unauthenticated,
            CurrentUser::SignedIn(_) => AuthState::Authenticated,
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unknown => write!(f, "unknown"),
            AuthState::Authenticated => write!(f, "authenticated"),
            AuthState::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}

/// Observable auth state fed by a provider subscription
pub struct AuthStateHolder {
    state_tx: Arc<watch::Sender<AuthState>>,
    listener: Option<JoinHandle<()>>,
}

impl AuthStateHolder {
    /// Creates a holder in the `Unknown` state
    pub fn new() -> Self {
        let (state_tx, _rx) = watch::channel(AuthState::Unknown);
        AuthStateHolder {
            state_tx: Arc::new(state_tx),
            listener: None,
        }
    }

    /// Subscribes to `provider` and starts following it
    ///
    /// The provider's current value is applied before this returns; later
    /// changes are applied by a background task. Calling `start` while
    /// already running is a no-op.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self, provider: Arc<dyn AuthProvider>) {
        if self.is_running() {
            tracing::debug!("auth state holder already running");
            return;
        }

        let mut user_rx = provider.subscribe();
        let initial = AuthState::from(&*user_rx.borrow_and_update());
        self.state_tx.send_replace(initial);
        tracing::info!(provider = provider.name(), state = %initial, "auth subscription started");

        let state_tx = Arc::clone(&self.state_tx);
        self.listener = Some(tokio::spawn(async move {
            while user_rx.changed().await.is_ok() {
                let next = AuthState::from(&*user_rx.borrow_and_update());
                let previous = state_tx.send_replace(next);
                if previous != next {
                    tracing::info!(from = %previous, to = %next, "auth state changed");
                }
            }
            tracing::debug!("auth provider closed its channel");
        }));
    }

    /// Tears down the provider subscription
    ///
    /// The last observed state is kept.
    pub fn stop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            tracing::info!("auth subscription stopped");
        }
    }

    /// Returns true between `start` and `stop`
    pub fn is_running(&self) -> bool {
        self.listener
            .as_ref()
            .map(|listener| !listener.is_finished())
            .unwrap_or(false)
    }

    /// Returns the current state
    pub fn state(&self) -> AuthState {
        *self.state_tx.borrow()
    }

    /// Subscribes to state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }
}

impl Default for AuthStateHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AuthStateHolder {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::provider::{AuthUser, StaticAuthProvider};
    use std::time::Duration;

    #[test]
    fn test_auth_state_from_current_user() {
        assert_eq!(AuthState::from(&CurrentUser::Unresolved), AuthState::Unknown);
        assert_eq!(AuthState::from(&CurrentUser::SignedOut), AuthState::Unauthenticated);
        assert_eq!(
            AuthState::from(&CurrentUser::SignedIn(AuthUser::new("u1"))),
            AuthState::Authenticated
        );
    }

    #[test]
    fn test_auth_state_display() {
        assert_eq!(AuthState::Unknown.to_string(), "unknown");
        assert_eq!(AuthState::Authenticated.to_string(), "authenticated");
        assert_eq!(AuthState::Unauthenticated.to_string(), "unauthenticated");
    }

    #[tokio::test]
    async fn test_holder_applies_current_value_on_start() {
        let provider = Arc::new(StaticAuthProvider::signed_in(AuthUser::new("u1")));
        let mut holder = AuthStateHolder::new();
        assert_eq!(holder.state(), AuthState::Unknown);

        holder.start(provider);
        assert_eq!(holder.state(), AuthState::Authenticated);
        assert!(holder.is_running());
    }

    #[tokio::test]
    async fn test_holder_follows_provider() {
        let provider = Arc::new(StaticAuthProvider::new());
        let mut holder = AuthStateHolder::new();
        holder.start(provider.clone());
        assert_eq!(holder.state(), AuthState::Unknown);

        let mut rx = holder.subscribe();
        provider.sign_out();
        rx.wait_for(|s| *s == AuthState::Unauthenticated).await.unwrap();

        provider.sign_in(AuthUser::new("u1"));
        rx.wait_for(|s| *s == AuthState::Authenticated).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_is_single_acquire() {
        let provider = Arc::new(StaticAuthProvider::new());
        let mut holder = AuthStateHolder::new();

        holder.start(provider.clone());
        holder.start(provider.clone());
        assert_eq!(provider.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_stop_releases_subscription() {
        let provider = Arc::new(StaticAuthProvider::signed_out());
        let mut holder = AuthStateHolder::new();
        holder.start(provider.clone());
        assert_eq!(provider.subscriber_count(), 1);

        holder.stop();
        assert!(!holder.is_running());

        // Aborted tasks drop their receiver once the runtime polls them
        for _ in 0..50 {
            if provider.subscriber_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(provider.subscriber_count(), 0);

        provider.sign_in(AuthUser::new("u1"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(holder.state(), AuthState::Unauthenticated);
    }
}
