/// Screen-scoped request lifetimes
///
/// Every request a screen issues runs through its [`ScreenScope`]. When the
/// screen unmounts (or the scope is dropped) the scope's cancellation token
/// fires and any request still in flight resolves to
/// [`ClientError::Cancelled`] instead of its real result, so a late response
/// never lands on a disposed screen.
///
/// Scopes form a tree: a scope made with [`ScreenScope::child_of`] is cancelled
/// together with its parent, which lets the app shell tear down every screen
/// at once.
///
/// # Example
///
/// ```
/// use leasedesk_app::scope::ScreenScope;
/// use leasedesk_app::error::ClientResult;
///
/// # async fn example() {
/// let scope = ScreenScope::new();
/// let guard = scope.guard();
///
/// guard.cancel();
/// let result: ClientResult<u32> = scope.run(async { Ok(1) }).await;
/// assert!(result.unwrap_err().is_cancelled());
/// # }
/// ```

use crate::error::{ClientError, ClientResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Cancellation scope owned by one mounted screen
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

/// Handle that can end a scope from elsewhere (e.g. a navigation handler)
#[derive(Debug, Clone)]
pub struct ScopeGuard {
    token: CancellationToken,
}

impl ScreenScope {
    /// Creates a root scope
    pub fn new() -> Self {
        ScreenScope {
            token: CancellationToken::new(),
        }
    }

    /// Creates a scope under an existing token
    pub fn child_of(parent: &CancellationToken) -> ScreenScope {
        ScreenScope {
            token: parent.child_token(),
        }
    }

    /// Returns a handle that can cancel this scope
    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            token: self.token.clone(),
        }
    }

    /// Returns the underlying token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the scope and every scope below it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the scope is cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `request` unless the scope ends first
    ///
    /// A request that finishes after the scope was cancelled is discarded.
    pub async fn run<F, T>(&self, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => return Err(ClientError::Cancelled),
            result = request => result,
        };

        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        result
    }
}

impl ScopeGuard {
    /// Cancels the scope
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the scope is cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
