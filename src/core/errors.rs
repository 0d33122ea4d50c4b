use spin_sdk::http::Response;
use std::fmt;

/// Domain failures surfaced by store operations. All are synchronous and
/// non-retriable; a failing operation mutates nothing. `Internal` is the
/// one fatal category (hashing/persistence faults), kept apart from the
/// validation kinds that map to 4xx.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    DuplicateUsername,
    InvalidCredentials,
    SelfFollow,
    NotFound(&'static str),
    Internal(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateUsername => write!(f, "Username already exists"),
            StoreError::InvalidCredentials => write!(f, "Invalid username or password"),
            StoreError::SelfFollow => write!(f, "You cannot follow yourself"),
            StoreError::NotFound(what) => write!(f, "{} not found", what),
            StoreError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => ApiError::Conflict(err.to_string()),
            // Missing user and wrong password collapse into one
            // indistinguishable 401.
            StoreError::InvalidCredentials => ApiError::Unauthorized,
            StoreError::SelfFollow => ApiError::BadRequest(err.to_string()),
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let (status, msg) = match err {
            ApiError::BadRequest(msg) => (400, msg),
            ApiError::Unauthorized => (401, "Unauthorized".to_string()),
            ApiError::NotFound(msg) => (404, msg),
            ApiError::Conflict(msg) => (409, msg),
            ApiError::InternalError(msg) => (500, msg),
        };
        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(&serde_json::json!({ "error": msg })).unwrap_or_default())
            .build()
    }
}
