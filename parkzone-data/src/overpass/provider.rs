//! HTTP-based `GraphProvider` backed by the Overpass API.
//!
//! The [`GraphProvider`] trait is synchronous so the processor can drive
//! retries on the calling thread. This provider bridges the async HTTP client
//! to that interface by blocking on a Tokio runtime internally.

use std::thread;
use std::time::Duration;

use geo::Coord;
use log::debug;
use parkzone_core::{FetchError, GraphProvider, StreetGraph};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::query::highway_query;
use super::response::parse_street_graph;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "parkzone/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Error type for [`OverpassGraphProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid Overpass endpoint '{endpoint}': {source}")]
    Endpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`OverpassGraphProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassConfig {
    /// Interpreter URL receiving the query.
    pub endpoint: String,
    /// Request timeout, also sent to the server as the query budget.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Street graph provider querying an Overpass interpreter.
///
/// The provider owns a current-thread Tokio runtime reused across calls.
///
/// # Runtime behaviour
///
/// When called from inside a multi-threaded Tokio runtime (detected via
/// [`Handle::try_current()`] and [`RuntimeFlavor::MultiThread`]) the request
/// runs on that runtime under [`tokio::task::block_in_place`]. Otherwise,
/// including from a `current_thread` runtime, the provider blocks on its own
/// runtime.
pub struct OverpassGraphProvider {
    client: Client,
    config: OverpassConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for OverpassGraphProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassGraphProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OverpassGraphProvider {
    /// Create a provider for the public Overpass endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassConfig::default())
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a URL or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|source| ProviderBuildError::Endpoint {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// Fetch and decode the street graph asynchronously.
    async fn fetch_graph_async(
        &self,
        center: Coord<f64>,
        radius_meters: u32,
    ) -> Result<StreetGraph, FetchError> {
        let url = self.endpoint.as_str();
        let query = highway_query(center, radius_meters, self.config.timeout.as_secs());
        debug!("POST {url}: {query}");

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        parse_street_graph(&body)
    }

    /// Convert a reqwest error to a `FetchError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FetchError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl GraphProvider for OverpassGraphProvider {
    /// Fetch every highway within `radius_meters` of `center`.
    ///
    /// # Runtime requirements
    ///
    /// Inside a multi-threaded Tokio runtime the request runs on the caller's
    /// runtime via `block_in_place`. Inside a `current_thread` runtime it runs
    /// on the internal runtime from a scoped helper thread, blocking the
    /// caller's runtime until the response arrives. Outside any runtime it
    /// runs on the internal runtime directly.
    fn fetch(&self, center: Coord<f64>, radius_meters: u32) -> Result<StreetGraph, FetchError> {
        let future = self.fetch_graph_async(center, radius_meters);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => thread::scope(|scope| {
                scope
                    .spawn(|| self.runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(FetchError::Other {
                            message: "Overpass request thread panicked".to_owned(),
                        })
                    })
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = OverpassConfig::new("http://overpass.example/api/interpreter")
            .with_timeout(Duration::from_secs(90))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.endpoint, "http://overpass.example/api/interpreter");
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn default_config_targets_public_endpoint() {
        let provider = OverpassGraphProvider::new().expect("provider should build");

        assert_eq!(provider.config().endpoint, DEFAULT_OVERPASS_URL);
        assert_eq!(provider.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(
            provider.config().timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[rstest]
    #[case("")]
    #[case("not a url")]
    #[case("/api/interpreter")]
    fn invalid_endpoint_is_rejected(#[case] endpoint: &str) {
        let err = OverpassGraphProvider::with_config(OverpassConfig::new(endpoint))
            .expect_err("endpoint should be rejected");

        match err {
            ProviderBuildError::Endpoint { endpoint: actual, .. } => assert_eq!(actual, endpoint),
            other => panic!("expected Endpoint error, got {other:?}"),
        }
    }

    #[rstest]
    fn debug_output_hides_runtime_internals() {
        let provider = OverpassGraphProvider::new().expect("provider should build");

        let rendered = format!("{provider:?}");

        assert!(rendered.contains("<tokio::runtime::Runtime>"));
        assert!(rendered.contains(DEFAULT_OVERPASS_URL));
    }

    #[rstest]
    fn fetch_inside_current_thread_runtime_reports_errors_instead_of_panicking() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let endpoint = format!(
            "http://{}/api/interpreter",
            listener.local_addr().expect("local address")
        );
        drop(listener);
        let provider = OverpassGraphProvider::with_config(
            OverpassConfig::new(endpoint).with_timeout(Duration::from_secs(5)),
        )
        .expect("provider should build");
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build");

        let result = runtime.block_on(async { provider.fetch(Coord { x: 20.0, y: 45.0 }, 100) });

        match result {
            Err(FetchError::Network { .. }) => {}
            other => panic!("expected a network error, got {other:?}"),
        }
    }
}
