//! Session state and validation.
//!
//! `SessionContext` is the single owner of the in-memory session. Dependents
//! observe changes through `subscribe()` instead of reading shared globals.
//!
//! There is no refresh protocol: a token the service rejects is dead for
//! this client instance. Staleness is only discovered lazily, at startup
//! restore and as a pre-flight check before each analysis submission.

use tokio::sync::watch;

use crate::credentials::redact;
use crate::service::{ServiceClient, User};

/// Token plus the user it was last validated as.
///
/// `user` is only present while `token` is present and was validated live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// True when a token has been validated and a user is attached.
    pub fn is_live(&self) -> bool {
        self.user.is_some()
    }
}

/// Notification sent to session subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Nothing has happened yet.
    Initial,
    /// A token is held but not yet validated.
    Pending,
    /// The token was validated; the user is attached.
    Established(User),
    /// Token and user were discarded.
    Cleared,
}

/// Owner of the session, with change notification.
#[derive(Debug)]
pub struct SessionContext {
    session: Session,
    tx: watch::Sender<SessionChange>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionChange::Initial);
        Self {
            session: Session::default(),
            tx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Returns a receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<SessionChange> {
        self.tx.subscribe()
    }

    /// Holds a token that has not been validated yet. Any previous user is dropped.
    pub fn begin(&mut self, token: String) {
        tracing::debug!(token = %redact(&token), "session pending validation");
        self.session = Session {
            token: Some(token),
            user: None,
        };
        self.tx.send_replace(SessionChange::Pending);
    }

    /// Attaches a validated user. Returns false (and changes nothing) without a token.
    pub fn establish(&mut self, user: User) -> bool {
        if self.session.token.is_none() {
            tracing::warn!("refusing to establish a session without a token");
            return false;
        }
        tracing::info!(user_id = user.id, email = %user.email, "session established");
        self.session.user = Some(user.clone());
        self.tx.send_replace(SessionChange::Established(user));
        true
    }

    /// Discards token and user.
    pub fn clear(&mut self) {
        if self.session != Session::default() {
            tracing::info!("session cleared");
        }
        self.session = Session::default();
        self.tx.send_replace(SessionChange::Cleared);
    }
}

/// Outcome of asking the service whether a token is live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(User),
    Invalid,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

/// Validates `token` against `GET /me`.
///
/// Any non-2xx response, transport failure, or malformed payload is `Invalid`.
pub async fn validate(client: &ServiceClient, token: &str) -> Validation {
    match client.me(token).await {
        Ok(user) => Validation::Valid(user),
        Err(e) => {
            tracing::info!(
                token = %redact(token),
                kind = %e.kind,
                error = %e,
                "session token rejected"
            );
            Validation::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn user() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_establish_requires_token() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.establish(user()));
        assert_eq!(ctx.user(), None);

        ctx.begin("tok".to_string());
        assert!(ctx.establish(user()));
        assert!(ctx.session().is_live());
        assert_eq!(ctx.token(), Some("tok"));
    }

    #[test]
    fn test_begin_drops_previous_user() {
        let mut ctx = SessionContext::new();
        ctx.begin("one".to_string());
        ctx.establish(user());
        ctx.begin("two".to_string());
        assert_eq!(ctx.user(), None);
        assert_eq!(ctx.token(), Some("two"));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut ctx = SessionContext::new();
        let mut rx = ctx.subscribe();
        assert!(!rx.has_changed().unwrap());

        ctx.begin("tok".to_string());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionChange::Pending);

        ctx.establish(user());
        assert_eq!(*rx.borrow_and_update(), SessionChange::Established(user()));

        ctx.clear();
        assert_eq!(*rx.borrow_and_update(), SessionChange::Cleared);
        assert_eq!(ctx.session(), &Session::default());
    }

    async fn validate_against(template: ResponseTemplate) -> Validation {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(template)
            .mount(&server)
            .await;
        let client = ServiceClient::new(&server.uri(), Some(Duration::from_secs(5))).unwrap();
        validate(&client, "tok").await
    }

    #[tokio::test]
    async fn test_validate_ok_returns_user() {
        let validation = validate_against(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "id": 1, "email": "a@b.com", "is_active": true }),
        ))
        .await;
        assert_eq!(validation, Validation::Valid(user()));
    }

    #[tokio::test]
    async fn test_validate_non_2xx_is_invalid() {
        for status in [401, 403, 500] {
            let validation = validate_against(ResponseTemplate::new(status)).await;
            assert_eq!(validation, Validation::Invalid, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_validate_malformed_user_is_invalid() {
        let validation = validate_against(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })),
        )
        .await;
        assert_eq!(validation, Validation::Invalid);
    }
}
