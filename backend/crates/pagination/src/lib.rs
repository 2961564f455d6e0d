//! Opaque cursor and pagination envelope primitives shared by list endpoints.
//!
//! Cursors wrap a plain offset in a base64url token so clients treat them as
//! opaque continuation handles. Endpoints hand the decoded request to
//! [`paginate`] and return the resulting [`Page`] envelope.
//!
//! # Examples
//! ```
//! use pagination::{paginate, PageRequest};
//!
//! let request = PageRequest::first_page(2);
//! let page = paginate(vec![1, 2, 3], &request).expect("valid request");
//! assert_eq!(page.items, vec![1, 2]);
//! let next = PageRequest::new(page.next_cursor, 2).expect("valid cursor");
//! let rest = paginate(vec![1, 2, 3], &next).expect("valid request");
//! assert_eq!(rest.items, vec![3]);
//! assert!(rest.next_cursor.is_none());
//! ```

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Default page size applied when a request does not name one.
pub const DEFAULT_LIMIT: usize = 25;
/// Upper bound on the page size a client may request.
pub const MAX_LIMIT: usize = 100;

/// Failures raised while decoding a continuation cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token is not valid base64url or does not contain cursor JSON.
    #[error("cursor is not a valid continuation token")]
    Malformed,
}

#[derive(Debug, Serialize, Deserialize)]
struct CursorPayload {
    offset: u64,
}

/// Opaque continuation token identifying where the next page starts.
///
/// The wire form is base64url over a small JSON payload; clients must not
/// construct or interpret it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a start offset as an opaque token.
    pub fn from_offset(offset: u64) -> Self {
        let payload = CursorPayload { offset };
        // A two-field struct of primitives always serialises.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        Self(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode the token back into a start offset.
    pub fn offset(&self) -> Result<u64, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .map_err(|_| CursorError::Malformed)?;
        let payload: CursorPayload =
            serde_json::from_slice(&bytes).map_err(|_| CursorError::Malformed)?;
        Ok(payload.offset)
    }

    /// Borrow the raw token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for Cursor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded pagination request: a validated start offset plus a clamped limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: usize,
}

impl PageRequest {
    /// Build a request from an optional continuation cursor.
    ///
    /// Limits of zero fall back to [`DEFAULT_LIMIT`]; limits above
    /// [`MAX_LIMIT`] are clamped.
    pub fn new(cursor: Option<Cursor>, limit: usize) -> Result<Self, CursorError> {
        let offset = match cursor {
            Some(cursor) => cursor.offset()?,
            None => 0,
        };
        Ok(Self {
            offset,
            limit: clamp_limit(limit),
        })
    }

    /// Request the first page with the given limit.
    pub fn first_page(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: clamp_limit(limit),
        }
    }

    /// Start offset decoded from the cursor.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Effective page size after clamping.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first_page(DEFAULT_LIMIT)
    }
}

fn clamp_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

/// One page of results plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in the caller's ordering.
    pub items: Vec<T>,
    /// Continuation token; absent on the final page.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Map the item type while preserving the continuation cursor.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Slice an in-memory result set into the requested page.
///
/// Offsets at or beyond the end of the collection produce an empty final
/// page rather than an error, so stale cursors degrade gracefully.
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> Result<Page<T>, CursorError> {
    let offset = usize::try_from(request.offset()).map_err(|_| CursorError::Malformed)?;
    let total = items.len();
    let page: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(request.limit())
        .collect();
    let consumed = offset.saturating_add(page.len());
    let next_cursor = if consumed < total && !page.is_empty() {
        Some(Cursor::from_offset(consumed as u64))
    } else {
        None
    };
    Ok(Page {
        items: page,
        next_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn cursor_round_trips_offset() {
        let cursor = Cursor::from_offset(42);
        assert_eq!(cursor.offset(), Ok(42));
    }

    #[rstest]
    #[case("not base64!!")]
    #[case("bm90IGpzb24")]
    fn malformed_cursor_is_rejected(#[case] raw: &str) {
        let cursor = Cursor::from(raw.to_owned());
        assert_eq!(cursor.offset(), Err(CursorError::Malformed));
    }

    #[rstest]
    #[case(0, DEFAULT_LIMIT)]
    #[case(10, 10)]
    #[case(MAX_LIMIT + 50, MAX_LIMIT)]
    fn limits_are_clamped(#[case] requested: usize, #[case] effective: usize) {
        let request = PageRequest::first_page(requested);
        assert_eq!(request.limit(), effective);
    }

    #[rstest]
    fn paginate_walks_pages_in_order() {
        let items: Vec<u32> = (0..5).collect();
        let first = paginate(items.clone(), &PageRequest::first_page(2)).expect("first page");
        assert_eq!(first.items, vec![0, 1]);
        let cursor = first.next_cursor.expect("continuation");

        let second_request = PageRequest::new(Some(cursor), 2).expect("valid cursor");
        let second = paginate(items.clone(), &second_request).expect("second page");
        assert_eq!(second.items, vec![2, 3]);

        let third_request =
            PageRequest::new(second.next_cursor, 2).expect("valid cursor");
        let third = paginate(items, &third_request).expect("third page");
        assert_eq!(third.items, vec![4]);
        assert!(third.next_cursor.is_none());
    }

    #[rstest]
    fn stale_cursor_past_end_yields_empty_page() {
        let request = PageRequest::new(Some(Cursor::from_offset(99)), 10).expect("valid cursor");
        let page = paginate(vec![1, 2, 3], &request).expect("page");
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[rstest]
    fn map_preserves_cursor() {
        let page = Page {
            items: vec![1, 2],
            next_cursor: Some(Cursor::from_offset(2)),
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert!(mapped.next_cursor.is_some());
    }
}
