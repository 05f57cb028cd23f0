/// Authentication provider seam
///
/// An [`AuthProvider`] publishes what it knows about the signed-in user over
/// a `tokio::sync::watch` channel. Subscribers see the current value
/// immediately and are woken on every change, which is the push-style
/// "current user changed" contract the rest of the client relies on.

use tokio::sync::watch;

/// Signed-in user as reported by the provider
///
/// The client treats the user as a presence flag; the id is shown and
/// logged only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Provider-assigned user id
    pub uid: String,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        AuthUser { uid: uid.into() }
    }
}

/// What the provider currently knows about the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrentUser {
    /// The provider has not reported yet
    #[default]
    Unresolved,

    /// Nobody is signed in
    SignedOut,

    /// A user is signed in
    SignedIn(AuthUser),
}

impl CurrentUser {
    /// Returns the signed-in user, if any
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            CurrentUser::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

/// External authentication provider
pub trait AuthProvider: Send + Sync {
    /// Returns the provider name (used in logs)
    fn name(&self) -> &str;

    /// Subscribes to current-user changes
    ///
    /// The returned receiver holds the provider's current knowledge and is
    /// notified on every subsequent change. Dropping it unsubscribes.
    fn subscribe(&self) -> watch::Receiver<CurrentUser>;
}

/// In-process provider driven by explicit sign-in/sign-out calls
///
/// Used by the console front-end (which signs in a configured user) and by
/// tests that need to script auth transitions.
#[derive(Debug)]
pub struct StaticAuthProvider {
    tx: watch::Sender<CurrentUser>,
}

impl StaticAuthProvider {
    /// Creates a provider that has not resolved the session yet
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CurrentUser::Unresolved);
        StaticAuthProvider { tx }
    }

    /// Creates a provider with `user` already signed in
    pub fn signed_in(user: AuthUser) -> Self {
        let provider = Self::new();
        provider.sign_in(user);
        provider
    }

    /// Creates a provider that resolved to "nobody signed in"
    pub fn signed_out() -> Self {
        let provider = Self::new();
        provider.sign_out();
        provider
    }

    /// Signs `user` in and notifies subscribers
    pub fn sign_in(&self, user: AuthUser) {
        tracing::debug!(uid = %user.uid, "auth provider: user signed in");
        self.tx.send_replace(CurrentUser::SignedIn(user));
    }

    /// Signs the current user out and notifies subscribers
    pub fn sign_out(&self) {
        tracing::debug!("auth provider: signed out");
        self.tx.send_replace(CurrentUser::SignedOut);
    }

    /// Returns the provider's current knowledge
    pub fn current(&self) -> CurrentUser {
        self.tx.borrow().clone()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for StaticAuthProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn subscribe(&self) -> watch::Receiver<CurrentUser> {
        self.tx.subscribe()
    }
}
