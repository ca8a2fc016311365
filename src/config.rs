use url::Url;

use crate::error::ConfigError;

const DEFAULT_DECK_API: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_CATALOG_API: &str = "https://api.scryfall.com";
const DEFAULT_QUERY: &str = "cmc=1";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base of the deck/user backend, e.g. `http://host/api/v1`.
    pub deck_api: Url,
    pub catalog_api: Url,
    /// Query used for the unfiltered first page of the card browser.
    pub default_query: String,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Ok(Self {
            deck_api: parse_url("DECK_API_URL", &value("DECK_API_URL", DEFAULT_DECK_API))?,
            catalog_api: parse_url(
                "CATALOG_API_URL",
                &value("CATALOG_API_URL", DEFAULT_CATALOG_API),
            )?,
            default_query: value("CATALOG_DEFAULT_QUERY", DEFAULT_QUERY),
            log_filter: value("DECK_BUILDER_LOG", DEFAULT_LOG_FILTER),
        })
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::NotHttp {
            var,
            value: raw.to_owned(),
        }),
    }
}
