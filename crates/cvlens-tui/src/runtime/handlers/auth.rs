//! Credential submission, session checks and token persistence.

use std::time::Duration;

use cvlens_core::credentials::{CredentialStore, redact};
use cvlens_core::error::WorkflowError;
use cvlens_core::service::{CredentialMode, ServiceClient};
use cvlens_core::session;
use tokio_util::sync::CancellationToken;

use crate::events::{CheckPurpose, UiEvent};

pub async fn submit_credentials(
    client: ServiceClient,
    mode: CredentialMode,
    email: String,
    password: String,
) -> UiEvent {
    let result = client
        .submit_credentials(mode, &email, &password)
        .await
        .map(|grant| grant.access_token)
        .map_err(|e| WorkflowError::from_credentials(&e));
    UiEvent::CredentialsSubmitted { mode, result }
}

/// Waits out the success screen unless cancelled first.
pub async fn success_delay(delay: Duration, cancel: Option<CancellationToken>) -> UiEvent {
    let cancelled = match cancel {
        Some(cancel) => {
            tokio::select! {
                () = tokio::time::sleep(delay) => false,
                () = cancel.cancelled() => true,
            }
        }
        None => {
            tokio::time::sleep(delay).await;
            false
        }
    };
    if cancelled {
        tracing::debug!("success delay cancelled");
    }
    UiEvent::SuccessDelayFinished { cancelled }
}

pub async fn check_session(client: ServiceClient, purpose: CheckPurpose, token: String) -> UiEvent {
    tracing::debug!(?purpose, token = %redact(&token), "checking session");
    let validation = session::validate(&client, &token).await;
    UiEvent::SessionChecked {
        purpose,
        validation,
    }
}

pub fn persist_token(store: &dyn CredentialStore, token: &str) {
    if let Err(e) = store.save(token) {
        tracing::warn!(error = %e, "failed to persist session token");
    }
}

pub fn clear_credentials(store: &dyn CredentialStore) {
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "failed to clear session token");
    }
}

#[cfg(test)]
mod tests {
    use cvlens_core::credentials::MemoryCredentialStore;
    use cvlens_core::error::UNREACHABLE_MESSAGE;
    use cvlens_core::session::Validation;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ServiceClient {
        ServiceClient::new(&server.uri(), Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains("username=a%40b.com"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "tok", "token_type": "bearer"})),
            )
            .mount(&server)
            .await;

        let event = submit_credentials(
            client(&server),
            CredentialMode::Login,
            "a@b.com".to_string(),
            "pw".to_string(),
        )
        .await;

        match event {
            UiEvent::CredentialsSubmitted { mode, result } => {
                assert_eq!(mode, CredentialMode::Login);
                assert_eq!(result.unwrap(), "tok");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejection_is_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"detail": "Email already registered"})),
            )
            .mount(&server)
            .await;

        let event = submit_credentials(
            client(&server),
            CredentialMode::Register,
            "a@b.com".to_string(),
            "pw".to_string(),
        )
        .await;

        let UiEvent::CredentialsSubmitted { result, .. } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(result.unwrap_err().message, "Email already registered");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_generic_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ServiceClient::new(&format!("http://{addr}"), Some(Duration::from_secs(5))).unwrap();

        let event =
            submit_credentials(client, CredentialMode::Login, "a".to_string(), "b".to_string()).await;

        let UiEvent::CredentialsSubmitted { result, .. } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(result.unwrap_err().message, UNREACHABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_check_session_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": 1, "email": "a@b.com", "is_active": true}),
            ))
            .mount(&server)
            .await;

        let event = check_session(client(&server), CheckPurpose::Restore, "tok".to_string()).await;

        match event {
            UiEvent::SessionChecked {
                purpose,
                validation,
            } => {
                assert_eq!(purpose, CheckPurpose::Restore);
                assert!(validation.is_valid());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_session_invalid_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let event = check_session(client(&server), CheckPurpose::Preflight, "dead".to_string()).await;

        let UiEvent::SessionChecked { validation, .. } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(validation, Validation::Invalid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_delay_elapses() {
        let event = success_delay(Duration::from_secs(2), Some(CancellationToken::new())).await;
        assert!(matches!(
            event,
            UiEvent::SuccessDelayFinished { cancelled: false }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_delay_cancelled() {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(success_delay(Duration::from_secs(2), Some(cancel.clone())));
        cancel.cancel();

        let event = handle.await.unwrap();
        assert!(matches!(
            event,
            UiEvent::SuccessDelayFinished { cancelled: true }
        ));
    }

    #[test]
    fn test_persist_and_clear() {
        let store = MemoryCredentialStore::default();
        persist_token(&store, "tok");
        assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
        clear_credentials(&store);
        clear_credentials(&store);
        assert_eq!(store.load().unwrap(), None);
    }
}
