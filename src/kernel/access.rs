use serde::{Deserialize, Serialize};

/// Authorization state of one interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccessState {
    /// No secret submitted yet.
    #[default]
    Unauthenticated,
    /// Last submission did not match. The login prompt is shown again.
    Rejected,
    /// Correct secret seen. Stays here until the session ends.
    Authenticated,
}

impl AccessState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AccessState::Authenticated)
    }
}

/// Requests that may move the gate. The graph decides whether they apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequest {
    SecretMatched,
    SecretMismatched,
    SessionEnd,
}

pub struct AccessGraph;

impl AccessGraph {
    /// Pure function: (Current State, Request) -> New State
    /// Returns None if the request does not apply in the current state.
    pub fn transition(current: AccessState, request: AccessRequest) -> Option<AccessState> {
        use AccessRequest::*;
        use AccessState::*;

        match (current, request) {
            (Unauthenticated, SecretMatched) | (Rejected, SecretMatched) => Some(Authenticated),
            (Unauthenticated, SecretMismatched) | (Rejected, SecretMismatched) => Some(Rejected),

            // Session end always resets, from anywhere.
            (_, SessionEnd) => Some(Unauthenticated),

            // Already in. Further submissions are ignored, never demote.
            (Authenticated, SecretMatched) | (Authenticated, SecretMismatched) => None,
        }
    }
}

/// Decides whether a submitted secret is acceptable.
/// The gate only sees the bool, so storage and comparison can change freely.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, secret: &str) -> bool;
}

/// Plain equality against one configured value.
/// No hashing, no lockout: a single shared secret for a single-tenant tool.
#[derive(Clone)]
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, secret: &str) -> bool {
        secret == self.secret
    }
}

/// Runs one secret submission through the verifier and the graph.
pub fn submit_secret(
    current: AccessState,
    verifier: &dyn CredentialVerifier,
    secret: &str,
) -> AccessState {
    let request = if verifier.verify(secret) {
        AccessRequest::SecretMatched
    } else {
        AccessRequest::SecretMismatched
    };
    AccessGraph::transition(current, request).unwrap_or(current)
}
