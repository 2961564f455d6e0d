//! Shared contact-detail newtypes used by client and employee records.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum length for a phone number.
pub const PHONE_MAX: usize = 30;

/// Validation errors raised by the contact newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// The email was empty after trimming.
    EmptyEmail,
    /// The email did not match the accepted shape.
    InvalidEmail,
    /// The email exceeded [`EMAIL_MAX`] characters.
    EmailTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The phone number contained characters outside digits, spaces, `+`, or `-`.
    InvalidPhone,
    /// The phone number exceeded [`PHONE_MAX`] characters.
    PhoneTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidPhone => write!(
                f,
                "phone may only contain digits, spaces, plus, or hyphen"
            ),
            Self::PhoneTooLong { max } => write!(f, "phone must be at most {max} characters"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately lenient; delivery problems surface elsewhere.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        let pattern = r"^\+?[0-9][0-9 \-]*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ContactValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(ContactValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(ContactValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    pub fn new(raw: impl Into<String>) -> Result<Self, ContactValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.chars().count() > PHONE_MAX {
            return Err(ContactValidationError::PhoneTooLong { max: PHONE_MAX });
        }
        if !phone_regex().is_match(trimmed) {
            return Err(ContactValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("reader@example.com", true)]
    #[case("  reader@example.com  ", true)]
    #[case("no-at-sign", false)]
    #[case("a b@example.com", false)]
    #[case("", false)]
    fn validates_email(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(EmailAddress::new(raw).is_ok(), ok);
    }

    #[rstest]
    #[case("+46 70-123 45 67", true)]
    #[case("0701234567", true)]
    #[case("call me", false)]
    fn validates_phone(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(PhoneNumber::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn overlong_email_is_rejected() {
        let raw = format!("{}@example.com", "x".repeat(EMAIL_MAX));
        assert_eq!(
            EmailAddress::new(raw),
            Err(ContactValidationError::EmailTooLong { max: EMAIL_MAX })
        );
    }
}
