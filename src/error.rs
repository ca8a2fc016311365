use std::{fmt, sync::Arc};

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("api returned status {0}")]
    Status(StatusCode),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base url {0} cannot carry path segments")]
    BaseUrl(url::Url),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid url: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
    #[error("{var} must be an http(s) url, got {value}")]
    NotHttp { var: &'static str, value: String },
}

/// A failed remote call as carried in UI messages.
///
/// Transport failures, bad statuses and malformed bodies all collapse into
/// this one outcome once they leave the client.
#[derive(Debug, Clone)]
pub struct FetchFailed(Arc<ApiError>);

impl From<ApiError> for FetchFailed {
    fn from(err: ApiError) -> Self {
        Self(Arc::new(err))
    }
}

impl fmt::Display for FetchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub type Fetched<T> = Result<T, FetchFailed>;
