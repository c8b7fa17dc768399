//! Error types for the vPIC client core.
//!
//! # Design
//! HTTP failures are classified into a single `ApiError` carrying an
//! `ErrorKind` discriminant instead of one type per status. The 400 status is
//! refined in-band: vPIC reports parameter-binding failures with a detail
//! string that starts with "The parameters dictionary", and those become
//! `InvalidParameters`. Every `ApiError` keeps the originating response so
//! callers can inspect headers such as `Retry-After`.
//!
//! Typed-mapping failures are `SchemaError`s. Neither kind is retried or
//! downgraded inside the crate.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;

/// Message used when the upstream body does not provide one.
pub const DEFAULT_MESSAGE: &str = "An unknown error occurred";

const PARAMETERS_DICTIONARY: &str = "The parameters dictionary";

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant for a classified HTTP failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400, any other reason.
    InvalidRequest,
    /// 400 caused by a parameter the upstream could not bind.
    InvalidParameters,
    /// 404; the endpoint does not exist.
    MethodNotFound,
    /// 429; consult `Retry-After`.
    TooManyRequests,
    /// 500.
    InternalError,
    /// 503; consult `Retry-After`.
    ServiceUnavailable,
    /// Any other status >= 400.
    Other,
}

impl ErrorKind {
    /// Map a status code and the body's detail text to a kind.
    pub fn classify(status: u16, detail: &str) -> Self {
        match status {
            400 if detail.starts_with(PARAMETERS_DICTIONARY) => ErrorKind::InvalidParameters,
            400 => ErrorKind::InvalidRequest,
            404 => ErrorKind::MethodNotFound,
            429 => ErrorKind::TooManyRequests,
            500 => ErrorKind::InternalError,
            503 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::InvalidParameters => "invalid parameters",
            ErrorKind::MethodNotFound => "method not found",
            ErrorKind::TooManyRequests => "too many requests",
            ErrorKind::InternalError => "internal error",
            ErrorKind::ServiceUnavailable => "service unavailable",
            ErrorKind::Other => "api error",
        }
    }
}

/// A string member of a JSON object body. Anything else counts as absent.
fn body_text<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// A failed vPIC response, classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .kind.as_str())]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: String,
    pub response: HttpResponse,
}

impl ApiError {
    /// Classify a response with status >= 400.
    ///
    /// Never fails. Each of `message` and `messageDetail` is read only when
    /// the body is a JSON object holding a string under that key; otherwise
    /// the default message and an empty detail are used.
    pub fn from_response(response: HttpResponse) -> Self {
        let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
        let message = body_text(&body, "message")
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MESSAGE)
            .to_string();
        let detail = body_text(&body, "messageDetail").unwrap_or_default().to_string();
        let kind = ErrorKind::classify(response.status, &detail);

        tracing::debug!(status = response.status, kind = kind.as_str(), "classified vPIC error");

        Self {
            kind,
            message,
            detail,
            response,
        }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    /// Seconds from the `Retry-After` header, when it is an integer.
    pub fn retry_after(&self) -> Option<u64> {
        self.response
            .header("Retry-After")
            .and_then(|v| v.trim().parse().ok())
    }

    /// Whether the caller may reasonably retry after backing off.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TooManyRequests | ErrorKind::ServiceUnavailable
        )
    }
}

/// Failures while mapping a normalized mapping into a record.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{record}: unknown field `{field}`")]
    UnknownField { record: &'static str, field: String },

    #[error("{record}: missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record}: field `{field}` has an invalid value: {reason}")]
    InvalidValue {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("{record}: expected a JSON object, found {found}")]
    NotAnObject {
        record: &'static str,
        found: &'static str,
    },

    #[error("{record}: {source}")]
    Deserialize {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by the vPIC clients.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A caller argument was rejected before building a request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configured host could not be joined with an endpoint path.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A success response whose body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("response has no `Results` member")]
    MissingResults,

    #[error("response `Results` is empty")]
    EmptyResults,
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// The classified kind, when this is an HTTP failure.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind),
            _ => None,
        }
    }
}
