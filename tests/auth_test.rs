//! Integration tests for the authentication gate.

use std::collections::HashMap;

use courtdocs::auth::{
    AuthErrorCode, AuthGate, AuthOutcome, AuthProvider, Identity, ProviderError,
    ShellVisibility, GENERIC_AUTH_MESSAGE,
};

/// In-memory provider keyed by email.
#[derive(Default)]
struct MemoryProvider {
    accounts: HashMap<String, String>,
    session: Option<Identity>,
    fail_logout: bool,
}

impl MemoryProvider {
    fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.insert(email.to_string(), password.to_string());
        self
    }

    fn identity(email: &str) -> Identity {
        Identity::new(format!("uid-{}", email), email)
    }
}

impl AuthProvider for MemoryProvider {
    fn current_session(&self) -> Option<Identity> {
        self.session.clone()
    }

    fn login(&mut self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        match self.accounts.get(email) {
            None => Err(ProviderError::new("auth/user-not-found", "no user record")),
            Some(stored) if stored != password => {
                Err(ProviderError::new("auth/wrong-password", "password is invalid"))
            }
            Some(_) => {
                let identity = Self::identity(email);
                self.session = Some(identity.clone());
                Ok(identity)
            }
        }
    }

    fn register(&mut self, email: &str, password: &str) -> Result<Identity, ProviderError> {
        if !email.contains('@') {
            return Err(ProviderError::new("auth/invalid-email", "badly formatted"));
        }
        if self.accounts.contains_key(email) {
            return Err(ProviderError::new("auth/email-already-in-use", "in use"));
        }
        self.accounts.insert(email.to_string(), password.to_string());
        self.login(email, password)
    }

    fn logout(&mut self) -> Result<(), ProviderError> {
        if self.fail_logout {
            return Err(ProviderError::new("auth/network-request-failed", "Network error"));
        }
        self.session = None;
        Ok(())
    }
}

#[test]
fn test_existing_session_shows_app() {
    let provider = MemoryProvider {
        session: Some(MemoryProvider::identity("jane@example.com")),
        ..Default::default()
    };
    let mut gate = AuthGate::new(provider);
    assert_eq!(gate.visibility(), ShellVisibility::Loading);

    let user = gate.refresh().cloned();
    assert_eq!(user.map(|u| u.email), Some("jane@example.com".to_string()));
    assert!(gate.is_app_visible());
}

#[test]
fn test_login_error_messages() {
    let provider = MemoryProvider::default().with_account("jane@example.com", "secret1");
    let mut gate = AuthGate::new(provider);
    gate.refresh();

    assert_eq!(
        gate.login("sam@example.com", "secret1"),
        AuthOutcome::failure("No account found with this email. Please register first.")
    );
    assert_eq!(
        gate.login("jane@example.com", "wrong!"),
        AuthOutcome::failure("Incorrect password. Please try again.")
    );
    assert_eq!(gate.visibility(), ShellVisibility::SignIn);

    assert!(gate.login(" jane@example.com ", "secret1").is_success());
    assert_eq!(gate.visibility(), ShellVisibility::App);
}

#[test]
fn test_register_flow() {
    let provider = MemoryProvider::default().with_account("jane@example.com", "secret1");
    let mut gate = AuthGate::new(provider);

    assert_eq!(
        gate.register("sam@example.com", "secret1", "secret2").message(),
        Some("Passwords do not match")
    );
    assert_eq!(
        gate.register("jane@example.com", "secret1", "secret1").message(),
        Some("This email is already registered. Please log in instead.")
    );
    assert_eq!(
        gate.register("not-an-email", "secret1", "secret1").message(),
        Some("Please enter a valid email address.")
    );

    assert!(gate.register("sam@example.com", "secret1", "secret1").is_success());
    assert_eq!(gate.current_user().unwrap().email, "sam@example.com");
    assert!(gate.provider().accounts.contains_key("sam@example.com"));
}

#[test]
fn test_logout_failure_keeps_user() {
    let provider = MemoryProvider {
        fail_logout: true,
        ..Default::default()
    }
    .with_account("jane@example.com", "secret1");
    let mut gate = AuthGate::new(provider);
    gate.login("jane@example.com", "secret1");

    let outcome = gate.logout();
    assert_eq!(outcome.message(), Some("Network error"));
    assert!(gate.is_app_visible());
}

#[test]
fn test_error_code_table() {
    let cases = [
        ("auth/invalid-credential", "Incorrect email or password. Please try again."),
        ("auth/too-many-requests", "Too many failed attempts. Please try again later."),
        ("auth/weak-password", "Password is too weak. Please use at least 6 characters."),
        ("auth/internal-error", GENERIC_AUTH_MESSAGE),
    ];
    for (code, message) in cases {
        assert_eq!(AuthErrorCode::from_code(code).message(), message);
    }
}

#[test]
fn test_outcome_serializes_with_status_tag() {
    let json = serde_json::to_string(&AuthOutcome::failure("Nope")).unwrap();
    assert_eq!(json, r#"{"status":"failure","message":"Nope"}"#);
}
