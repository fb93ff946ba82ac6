use axum::http::StatusCode;
use std::fmt;

/// Why a render pass could not use the shared data document.
#[derive(Debug)]
pub enum RenderError {
    /// The document could not be read at all (I/O or network failure).
    Fetch(String),
    /// The remote answered with a non-success status.
    Status(u16),
    /// The body is not valid JSON.
    Decode(String),
    /// The JSON does not have a shape the renderer can use.
    Shape(String),
    /// A strict preset was pointed at a page without one of its regions.
    MissingElement(String),
}

impl RenderError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(message) => write!(f, "failed to load download-data.json: {message}"),
            Self::Status(code) => {
                write!(f, "failed to load download-data.json: status {code}")
            }
            Self::Decode(message) => write!(f, "download-data.json is not valid JSON: {message}"),
            Self::Shape(message) => write!(f, "unexpected data shape: {message}"),
            Self::MissingElement(id) => write!(f, "page has no element with id '{id}'"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Fetch(err.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::MissingElement(_) => Self::internal(err),
            other => Self::bad_gateway(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
