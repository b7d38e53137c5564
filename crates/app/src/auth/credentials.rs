//! Login credentials and local checks.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use zeroize::Zeroizing;

/// Shortest password the login form accepts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length from which a mixed password counts as strong.
pub const STRONG_PASSWORD_LENGTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("username is required")]
    BlankUsername,

    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

/// Username and password typed by the user. The password is wiped on drop.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        self.username.trim()
    }

    /// Check the credentials before they are sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is blank or the password is too short.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username().is_empty() {
            return Err(CredentialsError::BlankUsername);
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialsError::PasswordTooShort);
        }

        Ok(())
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::of(&self.password)
    }

    pub(crate) fn body(&self) -> LoginBody<'_> {
        LoginBody {
            username: self.username(),
            password: &self.password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Body of `POST /usuarios/login/`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Rough password strength shown next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        let length = password.chars().count();
        let mixed = password.chars().any(char::is_uppercase)
            && password.chars().any(|c| c.is_ascii_digit());

        if length >= STRONG_PASSWORD_LENGTH && mixed {
            PasswordStrength::Strong
        } else if length >= MIN_PASSWORD_LENGTH {
            PasswordStrength::Medium
        } else {
            PasswordStrength::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "débil",
            PasswordStrength::Medium => "media",
            PasswordStrength::Strong => "fuerte",
        }
    }
}
