//! HTTP client for the FRED web API.

use std::time::Duration;

use chrono::NaiveDate;
use url::Url;

use crate::{
    query::{
        CategorySeriesQuery, ObservationsQuery, Query, ReleaseSeriesQuery, SeriesQuery,
        SeriesSearchQuery, VintageDatesQuery,
    },
    types::{vintage_dates, Observation, SearchPage, SeriesInfo},
    xml::{parse_document, XmlElement},
    Error,
};

/// Root of the production API.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Transport settings applied when the underlying `reqwest::Client` is built.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub base_url: String,
    /// Proxy URL used for every scheme, e.g. `http://proxy.internal:3128`.
    pub proxy: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the FRED web API.
///
/// Every request carries the API key as the last query parameter and is
/// answered in XML. One `reqwest::Client` is built at construction and
/// reused for every call.
pub struct Client {
    http: reqwest::Client,
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client pointing at the production FRED API.
    pub fn new(api_key: String) -> Result<Self, Error> {
        Self::with_options(ClientOptions::default(), api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, Error> {
        Self::with_options(
            ClientOptions {
                base_url: base_url.to_string(),
                ..ClientOptions::default()
            },
            api_key,
        )
    }

    pub fn with_options(options: ClientOptions, api_key: String) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().timeout(options.timeout);
        if let Some(proxy) = &options.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|e| {
                tracing::error!("Invalid proxy URL: {}", e);
                Error::RequestFailed(format!("invalid proxy '{}'", proxy))
            })?;
            builder = builder.proxy(proxy);
        }
        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed(e.to_string())
        })?;
        Ok(Self {
            http,
            base_api_url: options.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}/{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed(format!("invalid URL for '{}'", path))
        })?;
        let mut url = query.add_to_url(&url);
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Sends one GET request and parses the XML body into its root element.
    pub async fn fetch<Q: Query>(&self, path: &str, query: &Q) -> Result<XmlElement, Error> {
        let url = self.get_url(path, query)?;
        tracing::debug!(path, "Requesting FRED resource");

        let resp = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to get resource {}: {}", path, e);
            Error::RequestFailed(e.to_string())
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let err = rejection(status.as_u16(), &body);
            tracing::error!("Request to {} failed: {}", path, err);
            return Err(err);
        }

        parse_document(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            e
        })
    }

    /// Fetches observations. One row per date, or one per revision when the
    /// query carries a realtime window.
    pub async fn get_observations(
        &self,
        query: &ObservationsQuery,
    ) -> Result<Vec<Observation>, Error> {
        let root = self.fetch("series/observations", query).await?;
        Observation::from_document(&root)
    }

    /// Fetches the metadata elements for a series. Empty when FRED knows no such id.
    pub async fn get_series(&self, query: &SeriesQuery) -> Result<Vec<SeriesInfo>, Error> {
        let root = self.fetch("series", query).await?;
        root.children.iter().map(SeriesInfo::try_from).collect()
    }

    /// Fetches the dates on which a series was revised or extended.
    pub async fn get_vintage_dates(
        &self,
        query: &VintageDatesQuery,
    ) -> Result<Vec<NaiveDate>, Error> {
        let root = self.fetch("series/vintagedates", query).await?;
        vintage_dates(&root)
    }

    /// Fetches one page of full-text search results.
    pub async fn search_series(&self, query: &SeriesSearchQuery) -> Result<SearchPage, Error> {
        let root = self.fetch("series/search", query).await?;
        SearchPage::try_from(&root)
    }

    /// Fetches one page of the series belonging to a release.
    pub async fn get_release_series(
        &self,
        query: &ReleaseSeriesQuery,
    ) -> Result<SearchPage, Error> {
        let root = self.fetch("release/series", query).await?;
        SearchPage::try_from(&root)
    }

    /// Fetches one page of the series filed under a category.
    pub async fn get_category_series(
        &self,
        query: &CategorySeriesQuery,
    ) -> Result<SearchPage, Error> {
        let root = self.fetch("category/series", query).await?;
        SearchPage::try_from(&root)
    }
}

/// Builds the error for a non-success response, preferring FRED's own
/// `<error code=".." message=".."/>` element over the raw body.
fn rejection(status: u16, body: &str) -> Error {
    if let Ok(root) = parse_document(body) {
        if root.name == "error" {
            if let Some(message) = root.attr("message") {
                return Error::Upstream {
                    status,
                    code: root.attr("code").map(str::to_string),
                    message: message.to_string(),
                };
            }
        }
    }
    Error::HttpStatus {
        status,
        body: truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    match body.char_indices().nth(MAX) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}...[truncated]", &body[..cut]),
    }
}
