//! Authentication primitives: roles, credentials, and password digests.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

/// Staff role attached to every authenticated user.
///
/// The role is stored on the credential record and gates the
/// employee-management routes in the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full access, including employee management.
    Admin,
    /// Day-to-day catalogue and circulation access.
    Staff,
}

impl StaffRole {
    /// Stable wire label for the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    /// Parse the stable wire label.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised by [`LoginCredentials::try_from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// The username was empty after trimming.
    EmptyUsername,
    /// The password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct credentials from request fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Username as submitted, trimmed.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Credential verification failures distinguished internally.
///
/// Only a small, fixed message set ever reaches clients; unknown users and
/// wrong passwords are indistinguishable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    /// No credential record exists for the username.
    UnknownUser,
    /// The password digest did not match.
    WrongPassword,
    /// The record exists but has been deactivated.
    Disabled,
}

impl CredentialFailure {
    /// User-facing message for the failure.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::UnknownUser | Self::WrongPassword => "invalid credentials",
            Self::Disabled => "account is disabled",
        }
    }
}

/// Salted SHA-256 password digest.
///
/// Stored as two lowercase hex strings (salt and digest). Verification
/// re-derives the digest from the candidate password and the stored salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest {
    salt: String,
    digest: String,
}

impl PasswordDigest {
    /// Derive a digest for a new password with a random salt.
    pub fn generate(password: &str) -> Self {
        let mut salt_bytes = [0_u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);
        let digest = Self::derive(password, &salt);
        Self { salt, digest }
    }

    /// Reconstruct a digest from stored parts.
    pub const fn from_parts(salt: String, digest: String) -> Self {
        Self { salt, digest }
    }

    /// Check a candidate password against the stored digest.
    pub fn verify(&self, password: &str) -> bool {
        Self::derive(password, &self.salt) == self.digest
    }

    /// Stored salt, hex encoded.
    pub fn salt(&self) -> &str {
        self.salt.as_str()
    }

    /// Stored digest, hex encoded.
    pub fn digest(&self) -> &str {
        self.digest.as_str()
    }

    fn derive(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  ", "secret", LoginValidationError::EmptyUsername)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password).unwrap_err(),
            expected
        );
    }

    #[rstest]
    fn trims_username() {
        let credentials =
            LoginCredentials::try_from_parts(" admin ", "secret").expect("valid credentials");
        assert_eq!(credentials.username(), "admin");
    }

    #[rstest]
    fn digest_verifies_matching_password_only() {
        let digest = PasswordDigest::generate("correct horse");
        assert!(digest.verify("correct horse"));
        assert!(!digest.verify("battery staple"));
    }

    #[rstest]
    fn same_password_gets_distinct_salts() {
        let a = PasswordDigest::generate("secret");
        let b = PasswordDigest::generate("secret");
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.digest(), b.digest());
    }

    #[rstest]
    #[case(CredentialFailure::UnknownUser, "invalid credentials")]
    #[case(CredentialFailure::WrongPassword, "invalid credentials")]
    #[case(CredentialFailure::Disabled, "account is disabled")]
    fn failure_messages_do_not_enumerate_users(
        #[case] failure: CredentialFailure,
        #[case] message: &str,
    ) {
        assert_eq!(failure.user_message(), message);
    }

    #[rstest]
    #[case("admin", Some(StaffRole::Admin))]
    #[case("staff", Some(StaffRole::Staff))]
    #[case("root", None)]
    fn parses_role_labels(#[case] raw: &str, #[case] expected: Option<StaffRole>) {
        assert_eq!(StaffRole::parse(raw), expected);
    }
}
