//! Screen liveness for discarding late network responses

use tokio_util::sync::CancellationToken;

/// Tracks whether the screen that started a request is still current.
///
/// Clones share state: the navigation layer keeps one clone and calls
/// [`ScreenLifetime::navigate_away`]; the screen checks
/// [`ScreenLifetime::is_alive`] before applying a response.
#[derive(Debug, Clone, Default)]
pub struct ScreenLifetime {
    token: CancellationToken,
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Mark the screen as gone; in-flight responses will be dropped
    pub fn navigate_away(&self) {
        self.token.cancel();
    }

    /// Resolves once the screen is gone
    pub async fn closed(&self) {
        self.token.cancelled().await
    }
}
