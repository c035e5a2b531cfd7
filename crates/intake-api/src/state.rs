use intake_core::AdmissionPolicy;
use intake_storage::CredentialIssuer;
use std::sync::Arc;

/// Main application state
///
/// Immutable for the process lifetime: the policy is built once from
/// configuration and the issuer holds its own client.
#[derive(Clone)]
pub struct AppState {
    pub policy: AdmissionPolicy,
    pub issuer: Arc<dyn CredentialIssuer>,
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
