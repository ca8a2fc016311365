use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, ClientBuilder, RequestBuilder,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, ApiResult};

pub fn build_client() -> ApiResult<Client> {
    let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(ClientBuilder::default()
        .user_agent(user_agent)
        .default_headers(headers)
        .build()?)
}

/// Append percent-encoded path segments to `base`.
///
/// An empty final segment yields a trailing slash (`users/`).
pub fn join(base: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::BaseUrl(base.clone()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub async fn send(request: RequestBuilder) -> ApiResult<reqwest::Response> {
    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(response)
}

pub async fn fetch_json<T>(request: RequestBuilder) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let body = send(request).await?.text().await?;

    Ok(serde_json::from_str(&body)?)
}
