use std::fmt;

use catalog_core::{ListingReference, RequestId, ResultPage};
use thiserror::Error;

/// One slice of the full catalog in stable catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPage {
    pub total: u64,
    pub references: Vec<ListingReference>,
    /// Upstream reported more data beyond this slice.
    pub has_continuation: bool,
}

/// Category vocabulary entry. `id` is the 1-based position in the upstream
/// response, not an upstream identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Resolved {
        request_id: RequestId,
        result: Result<ResultPage, ResolveError>,
    },
    Categories(Result<Vec<Category>, FetchError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    NotFound,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Superseded before completion. Never shown to the user.
    #[error("resolution cancelled")]
    Cancelled,
    #[error(transparent)]
    Remote(#[from] FetchError),
}
