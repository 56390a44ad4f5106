use malikay::kernel::access::{
    submit_secret, AccessGraph, AccessRequest, AccessState, CredentialVerifier,
    SharedSecretVerifier,
};

#[test]
fn test_access_initial_state() {
    assert_eq!(
        AccessState::default(),
        AccessState::Unauthenticated,
        "Sessions must start locked"
    );
}

#[test]
fn test_access_transitions_valid() {
    let verifier = SharedSecretVerifier::new("1234");

    // 1. Wrong secret -> Rejected
    let state = submit_secret(AccessState::Unauthenticated, &verifier, "0000");
    assert_eq!(state, AccessState::Rejected);

    // 2. Retry with wrong secret stays Rejected
    let state = submit_secret(state, &verifier, "4321");
    assert_eq!(state, AccessState::Rejected);

    // 3. Correct secret from Rejected -> Authenticated
    let state = submit_secret(state, &verifier, "1234");
    assert_eq!(state, AccessState::Authenticated);
}

#[test]
fn test_correct_secret_from_unauthenticated() {
    let verifier = SharedSecretVerifier::new("1234");
    let state = submit_secret(AccessState::Unauthenticated, &verifier, "1234");
    assert_eq!(state, AccessState::Authenticated);
}

#[test]
fn test_authenticated_is_never_demoted_by_submissions() {
    let verifier = SharedSecretVerifier::new("1234");
    let state = submit_secret(AccessState::Authenticated, &verifier, "wrong");
    assert_eq!(state, AccessState::Authenticated, "A stray submission must not log the user out");

    let authed = AccessState::Authenticated;
    assert!(AccessGraph::transition(authed, AccessRequest::SecretMismatched).is_none());
    assert!(AccessGraph::transition(authed, AccessRequest::SecretMatched).is_none());
}

#[test]
fn test_session_end_resets_from_every_state() {
    for state in [AccessState::Unauthenticated, AccessState::Rejected, AccessState::Authenticated] {
        assert_eq!(
            AccessGraph::transition(state, AccessRequest::SessionEnd),
            Some(AccessState::Unauthenticated)
        );
    }
}

#[test]
fn test_secret_comparison_is_exact() {
    let verifier = SharedSecretVerifier::new("1234");
    assert!(verifier.verify("1234"));
    assert!(!verifier.verify("1234 "));
    assert!(!verifier.verify(""));
}

struct PrefixVerifier;

impl CredentialVerifier for PrefixVerifier {
    fn verify(&self, secret: &str) -> bool {
        secret.starts_with("ok-")
    }
}

#[test]
fn test_verifier_is_swappable() {
    let state = submit_secret(AccessState::Unauthenticated, &PrefixVerifier, "ok-anything");
    assert_eq!(state, AccessState::Authenticated);

    let state = submit_secret(AccessState::Unauthenticated, &PrefixVerifier, "1234");
    assert_eq!(state, AccessState::Rejected);
}

#[test]
fn test_verifier_debug_hides_secret() {
    let verifier = SharedSecretVerifier::new("hunter2");
    assert!(!format!("{:?}", verifier).contains("hunter2"));
}
