//! Auth data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::members::records::MemberUuid;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

/// Registration payload.
#[derive(Clone)]
pub struct NewMember {
    pub uuid: MemberUuid,
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub display_name: Option<String>,
}

impl NewMember {
    /// Check the fields the database cannot check for us.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let username_ok = USERNAME_LEN.contains(&self.username.chars().count())
            && self
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !username_ok {
            return Err(RegistrationError::InvalidUsername);
        }

        let email_ok = self
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());

        if !email_ok {
            return Err(RegistrationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort {
                minimum: MIN_PASSWORD_LEN,
            });
        }

        Ok(())
    }

    /// Display name to store, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

impl fmt::Debug for NewMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewMember")
            .field("uuid", &self.uuid)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl PartialEq for NewMember {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.username == other.username
            && self.email == other.email
            && *self.password == *other.password
            && self.display_name == other.display_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("username must be 3 to 32 letters, digits or underscores")]
    InvalidUsername,

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("password must be at least {minimum} characters")]
    PasswordTooShort { minimum: usize },
}

/// Stored login material for a member.
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub uuid: MemberUuid,
    pub password_hash: String,
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Member UUID.
    pub sub: Uuid,

    /// Issued at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Bearer token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(username: &str, email: &str, password: &str) -> NewMember {
        NewMember {
            uuid: MemberUuid::new(),
            username: username.to_string(),
            email: email.to_string(),
            password: Zeroizing::new(password.to_string()),
            display_name: None,
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert_eq!(
            member("book_worm", "worm@example.com", "correct horse").validate(),
            Ok(())
        );
    }

    #[test]
    fn rejects_bad_usernames() {
        for username in ["ab", "has space", "dash-ed", &"x".repeat(33)] {
            assert_eq!(
                member(username, "a@b.c", "long enough").validate(),
                Err(RegistrationError::InvalidUsername),
                "{username:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_emails_without_both_sides() {
        for email in ["plain", "@example.com", "someone@"] {
            assert_eq!(
                member("reader", email, "long enough").validate(),
                Err(RegistrationError::InvalidEmail),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_short_passwords() {
        assert_eq!(
            member("reader", "r@example.com", "short").validate(),
            Err(RegistrationError::PasswordTooShort {
                minimum: MIN_PASSWORD_LEN
            })
        );
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut new_member = member("reader", "r@example.com", "long enough");

        assert_eq!(new_member.display_name(), "reader");

        new_member.display_name = Some("  ".to_string());
        assert_eq!(new_member.display_name(), "reader");

        new_member.display_name = Some("Avid Reader".to_string());
        assert_eq!(new_member.display_name(), "Avid Reader");
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", member("reader", "r@example.com", "hunter22"));

        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("redacted"));
    }
}
