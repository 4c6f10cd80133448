//! Authentication gate.
//!
//! The identity provider is an external capability behind [`AuthProvider`].
//! [`AuthGate`] wraps a provider, turns its error codes into the messages
//! shown on the sign-in form, and decides whether the application shell
//! is visible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fallback message for unrecognised provider errors.
pub const GENERIC_AUTH_MESSAGE: &str = "An error occurred. Please try again.";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Provider user id
    pub uid: String,

    /// Email address shown in the header
    pub email: String,
}

impl Identity {
    /// Create an identity.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// An error reported by the identity provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    /// Provider error code, e.g. "auth/wrong-password"
    pub code: String,

    /// Provider's own description
    pub message: String,
}

impl ProviderError {
    /// Create a provider error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Known provider error codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    TooManyRequests,
    /// Any other code, kept verbatim
    Unknown(String),
}

impl AuthErrorCode {
    /// Parse a provider code, with or without the "auth/" prefix.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        match code.strip_prefix("auth/").unwrap_or(code) {
            "email-already-in-use" => AuthErrorCode::EmailAlreadyInUse,
            "invalid-email" => AuthErrorCode::InvalidEmail,
            "weak-password" => AuthErrorCode::WeakPassword,
            "user-not-found" => AuthErrorCode::UserNotFound,
            "wrong-password" => AuthErrorCode::WrongPassword,
            "invalid-credential" => AuthErrorCode::InvalidCredential,
            "too-many-requests" => AuthErrorCode::TooManyRequests,
            _ => AuthErrorCode::Unknown(code.to_string()),
        }
    }

    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => {
                "This email is already registered. Please log in instead."
            }
            AuthErrorCode::InvalidEmail => "Please enter a valid email address.",
            AuthErrorCode::WeakPassword => {
                "Password is too weak. Please use at least 6 characters."
            }
            AuthErrorCode::UserNotFound => {
                "No account found with this email. Please register first."
            }
            AuthErrorCode::WrongPassword => "Incorrect password. Please try again.",
            AuthErrorCode::InvalidCredential => "Incorrect email or password. Please try again.",
            AuthErrorCode::TooManyRequests => "Too many failed attempts. Please try again later.",
            AuthErrorCode::Unknown(_) => GENERIC_AUTH_MESSAGE,
        }
    }
}

/// Registration input rejected before it reaches the provider.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the minimum.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Check a registration password and its confirmation.
pub fn validate_registration(password: &str, confirm: &str) -> Result<(), RegistrationError> {
    if password != confirm {
        return Err(RegistrationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegistrationError::PasswordTooShort);
    }
    Ok(())
}

/// Result of a login, registration or logout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuthOutcome {
    /// The operation succeeded.
    Success,
    /// The operation failed with a message for the user.
    Failure {
        /// User-facing message
        message: String,
    },
}

impl AuthOutcome {
    /// Failure carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        AuthOutcome::Failure {
            message: message.into(),
        }
    }

    /// Check if the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure { message } => Some(message),
        }
    }
}

/// Email and password identity provider.
pub trait AuthProvider {
    /// The signed-in identity, if any.
    fn current_session(&self) -> Option<Identity>;

    /// Sign in with email and password.
    fn login(&mut self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Create an account and sign in.
    fn register(&mut self, email: &str, password: &str) -> Result<Identity, ProviderError>;

    /// Sign out.
    fn logout(&mut self) -> Result<(), ProviderError>;
}

/// What the page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellVisibility {
    /// Session state not yet known; show neither
    Loading,
    /// Nobody signed in; show the sign-in form
    SignIn,
    /// Signed in; show the application
    App,
}

/// Gate between the identity provider and the application shell.
pub struct AuthGate<P: AuthProvider> {
    provider: P,
    current: Option<Identity>,
    loaded: bool,
}

impl<P: AuthProvider> AuthGate<P> {
    /// Wrap a provider. The state is unknown until [`refresh`](Self::refresh).
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
            loaded: false,
        }
    }

    /// Re-read the session from the provider.
    pub fn refresh(&mut self) -> Option<&Identity> {
        self.current = self.provider.current_session();
        self.loaded = true;
        match self.current {
            Some(ref user) => log::info!("user signed in: {}", user.email),
            None => log::info!("no user signed in"),
        }
        self.current.as_ref()
    }

    /// The signed-in identity as last observed.
    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Which part of the page is visible.
    pub fn visibility(&self) -> ShellVisibility {
        match (self.loaded, &self.current) {
            (false, _) => ShellVisibility::Loading,
            (true, None) => ShellVisibility::SignIn,
            (true, Some(_)) => ShellVisibility::App,
        }
    }

    /// Check if the application shell is visible.
    pub fn is_app_visible(&self) -> bool {
        self.visibility() == ShellVisibility::App
    }

    /// Sign in. The email is trimmed; the password is passed as typed.
    pub fn login(&mut self, email: &str, password: &str) -> AuthOutcome {
        match self.provider.login(email.trim(), password) {
            Ok(identity) => self.signed_in(identity),
            Err(e) => Self::rejected(e),
        }
    }

    /// Register after checking the password and its confirmation.
    pub fn register(&mut self, email: &str, password: &str, confirm: &str) -> AuthOutcome {
        if let Err(e) = validate_registration(password, confirm) {
            return AuthOutcome::failure(e.to_string());
        }
        match self.provider.register(email.trim(), password) {
            Ok(identity) => self.signed_in(identity),
            Err(e) => Self::rejected(e),
        }
    }

    /// Sign out. Provider failures surface the provider's own message.
    pub fn logout(&mut self) -> AuthOutcome {
        match self.provider.logout() {
            Ok(()) => {
                self.current = None;
                self.loaded = true;
                AuthOutcome::Success
            }
            Err(e) => {
                log::warn!("sign out failed: {} ({})", e.message, e.code);
                AuthOutcome::failure(e.message)
            }
        }
    }

    /// Borrow the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn signed_in(&mut self, identity: Identity) -> AuthOutcome {
        log::info!("user signed in: {}", identity.email);
        self.current = Some(identity);
        self.loaded = true;
        AuthOutcome::Success
    }

    fn rejected(error: ProviderError) -> AuthOutcome {
        let code = AuthErrorCode::from_code(&error.code);
        log::debug!("provider rejected request: {:?}", code);
        AuthOutcome::failure(code.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FixedProvider {
        session: Option<Identity>,
        error: Option<ProviderError>,
    }

    impl AuthProvider for FixedProvider {
        fn current_session(&self) -> Option<Identity> {
            self.session.clone()
        }

        fn login(&mut self, email: &str, _password: &str) -> Result<Identity, ProviderError> {
            match self.error.clone() {
                Some(e) => Err(e),
                None => Ok(Identity::new("u1", email)),
            }
        }

        fn register(&mut self, email: &str, password: &str) -> Result<Identity, ProviderError> {
            self.login(email, password)
        }

        fn logout(&mut self) -> Result<(), ProviderError> {
            match self.error.clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_error_code_messages() {
        assert_eq!(
            AuthErrorCode::from_code("auth/wrong-password").message(),
            "Incorrect password. Please try again."
        );
        assert_eq!(
            AuthErrorCode::from_code("too-many-requests"),
            AuthErrorCode::TooManyRequests
        );
        assert_eq!(
            AuthErrorCode::from_code("auth/network-request-failed").message(),
            GENERIC_AUTH_MESSAGE
        );
    }

    #[test]
    fn test_registration_checks() {
        assert_eq!(
            validate_registration("secret1", "secret2"),
            Err(RegistrationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("abc", "abc").unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );
        assert!(validate_registration("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_gate_visibility() {
        let mut gate = AuthGate::new(FixedProvider::default());
        assert_eq!(gate.visibility(), ShellVisibility::Loading);
        gate.refresh();
        assert_eq!(gate.visibility(), ShellVisibility::SignIn);

        assert!(gate.login("  jane@example.com ", "secret1").is_success());
        assert!(gate.is_app_visible());
        assert_eq!(gate.current_user().unwrap().email, "jane@example.com");

        assert!(gate.logout().is_success());
        assert_eq!(gate.visibility(), ShellVisibility::SignIn);
    }

    #[test]
    fn test_gate_maps_provider_errors() {
        let mut gate = AuthGate::new(FixedProvider {
            session: None,
            error: Some(ProviderError::new("auth/user-not-found", "There is no user record.")),
        });
        let outcome = gate.login("x@example.com", "secret1");
        assert_eq!(
            outcome.message(),
            Some("No account found with this email. Please register first.")
        );
        assert!(!gate.is_app_visible());

        // Logout surfaces the provider's own message.
        assert_eq!(gate.logout().message(), Some("There is no user record."));
    }

    #[test]
    fn test_register_rejected_before_provider() {
        let mut gate = AuthGate::new(FixedProvider::default());
        let outcome = gate.register("a@example.com", "abc", "abc");
        assert_eq!(
            outcome,
            AuthOutcome::failure("Password must be at least 6 characters")
        );
        assert!(gate.current_user().is_none());
    }
}
