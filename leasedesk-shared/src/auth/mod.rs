/// Authentication state for the LeaseDesk client
///
/// The client never handles credentials itself. An external provider pushes
/// "current user changed" notifications and the client only cares whether
/// somebody is signed in.
///
/// # Modules
///
/// - [`provider`]: The `AuthProvider` seam and an in-process implementation
/// - [`state`]: `AuthState` and the holder that follows a provider
///
/// # Example
///
/// ```no_run
/// use leasedesk_shared::auth::{AuthState, AuthStateHolder, AuthUser, StaticAuthProvider};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let provider = Arc::new(StaticAuthProvider::new());
/// let mut holder = AuthStateHolder::new();
/// holder.start(provider.clone());
/// assert_eq!(holder.state(), AuthState::Unknown);
///
/// provider.sign_in(AuthUser::new("owner-1"));
/// let mut rx = holder.subscribe();
/// rx.wait_for(|state| *state == AuthState::Authenticated).await.unwrap();
///
/// holder.stop();
/// # }
/// ```

pub mod provider;
pub mod state;

pub use provider::{AuthProvider, AuthUser, CurrentUser, StaticAuthProvider};
pub use state::{AuthState, AuthStateHolder};
