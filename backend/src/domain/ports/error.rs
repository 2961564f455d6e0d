//! Shared error shape for driven (repository) ports.

use crate::domain::Error;

/// Persistence errors raised by repository adapters.
///
/// Every repository in this domain fails in the same two ways, so one shared
/// enum replaces a per-port error zoo. Services translate it into the domain
/// error taxonomy with [`RepositoryError::into_domain`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl RepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Map onto the domain error taxonomy.
    ///
    /// `subject` names the repository for log and message context, e.g.
    /// `"book repository"`.
    pub fn into_domain(self, subject: &str) -> Error {
        match self {
            Self::Connection { message } => {
                Error::service_unavailable(format!("{subject} unavailable: {message}"))
            }
            Self::Query { message } => Error::internal(format!("{subject} error: {message}")),
        }
    }
}
