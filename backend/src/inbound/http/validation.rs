//! Shared validation helpers for inbound HTTP adapters.

use pagination::{Cursor, PageRequest};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::book::{BookValidationError, Isbn};
use crate::domain::contact::{ContactValidationError, EmailAddress, PhoneNumber};

pub(crate) fn invalid_uuid_error(field: &str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Parse a path or query UUID, reporting the offending field on failure.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Decode an optional continuation cursor and clamp the page limit.
pub(crate) fn page_request(
    cursor: Option<String>,
    limit: Option<usize>,
) -> Result<PageRequest, Error> {
    PageRequest::new(cursor.map(Cursor::from), limit.unwrap_or(0)).map_err(|_| {
        Error::invalid_request("cursor is not a valid continuation token").with_details(json!({
            "field": "cursor",
            "code": "malformed_cursor",
        }))
    })
}

/// Parse an optional ISBN field.
pub(crate) fn parse_isbn(raw: Option<String>) -> Result<Option<Isbn>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(Isbn::new)
        .transpose()
        .map_err(|err: BookValidationError| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "isbn",
                "code": "invalid_isbn",
            }))
        })
}

/// Parse a required email field.
pub(crate) fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err: ContactValidationError| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "email",
            "code": "invalid_email",
        }))
    })
}

/// Parse a staff role label.
pub(crate) fn parse_role(raw: &str) -> Result<crate::domain::auth::StaffRole, Error> {
    crate::domain::auth::StaffRole::parse(raw).ok_or_else(|| {
        Error::invalid_request(format!("unknown role: {raw}")).with_details(json!({
            "field": "role",
            "code": "unknown_role",
        }))
    })
}

/// Parse an optional phone field, treating blank input as absent.
pub(crate) fn parse_phone(raw: Option<String>) -> Result<Option<PhoneNumber>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(PhoneNumber::new)
        .transpose()
        .map_err(|err: ContactValidationError| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "phone",
                "code": "invalid_phone",
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_malformed_uuid_with_field_details() {
        let error = parse_uuid("bookId", "not-a-uuid").expect_err("rejected");
        let details = error.details().expect("details");
        assert_eq!(
            details.get("field").and_then(|v| v.as_str()),
            Some("bookId")
        );
    }

    #[rstest]
    fn default_page_request_has_default_limit() {
        let request = page_request(None, None).expect("valid");
        assert_eq!(request.limit(), pagination::DEFAULT_LIMIT);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    fn malformed_cursor_is_invalid_request() {
        let error = page_request(Some("%%%".to_owned()), Some(10)).expect_err("rejected");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn blank_optional_fields_are_absent() {
        assert_eq!(parse_isbn(Some("  ".to_owned())).expect("valid"), None);
        assert_eq!(parse_phone(Some(String::new())).expect("valid"), None);
    }
}
