use tokio_util::sync::CancellationToken;

/// Holds the token of the one countdown a session may have running.
/// Tokens are children of the session root, so ending the session stops everything.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    root: CancellationToken,
    active: Option<CancellationToken>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any running countdown and hands out a fresh token.
    pub fn arm(&mut self) -> CancellationToken {
        self.cancel_active();
        let token = self.root.child_token();
        self.active = Some(token.clone());
        token
    }

    /// Returns true if a countdown was actually running.
    pub fn cancel_active(&mut self) -> bool {
        match self.active.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// The countdown finished on its own.
    pub fn disarm(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    pub fn shutdown(&mut self) {
        self.root.cancel();
        self.active = None;
    }
}
