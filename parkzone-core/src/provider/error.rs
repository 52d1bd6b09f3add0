use thiserror::Error;

/// Words in a failure message that point at a connectivity problem or an
/// overloaded service.
const CONNECTIVITY_INDICATORS: [&str; 10] = [
    "connection",
    "connect",
    "network",
    "timed out",
    "timeout",
    "dns",
    "unreachable",
    "refused",
    "out of memory",
    "rate_limited",
];

/// How a failed fetch should be reported once retries are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    /// The service could not be reached or did not answer in time.
    Connection,
    /// The service answered but yielded no usable street data.
    NoData,
}

/// Errors from [`crate::GraphProvider::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was contacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Endpoint that was contacted.
        url: String,
        /// Response status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse street data: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service reported an error inside an otherwise valid response.
    #[error("street data service reported: {message}")]
    Service {
        /// Service-provided description.
        message: String,
    },
    /// The service returned a graph without any node.
    #[error("no streets found in area")]
    EmptyGraph,
    /// Failure from a collaborator that cannot classify its own errors.
    #[error("{message}")]
    Other {
        /// Free-form description.
        message: String,
    },
}

impl FetchError {
    /// Classify the failure.
    ///
    /// Typed transport variants map directly. [`FetchError::Service`] and
    /// [`FetchError::Other`] fall back to looking for connectivity words in
    /// their message, which is best-effort: a service that gave up on a query
    /// under load is a connection problem, any other remark means no data.
    ///
    /// # Examples
    /// ```
    /// use parkzone_core::{FetchError, FetchFailureKind};
    ///
    /// let err = FetchError::Other { message: "Connection reset by peer".into() };
    /// assert_eq!(err.kind(), FetchFailureKind::Connection);
    /// assert_eq!(FetchError::EmptyGraph.kind(), FetchFailureKind::NoData);
    /// ```
    #[must_use]
    pub fn kind(&self) -> FetchFailureKind {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => FetchFailureKind::Connection,
            Self::Http { status, .. } if *status == 429 || *status >= 500 => {
                FetchFailureKind::Connection
            }
            Self::Http { .. } | Self::Parse { .. } | Self::EmptyGraph => FetchFailureKind::NoData,
            Self::Service { message } | Self::Other { message } => classify_message(message),
        }
    }
}

fn classify_message(message: &str) -> FetchFailureKind {
    let lowered = message.to_lowercase();
    if CONNECTIVITY_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
    {
        FetchFailureKind::Connection
    } else {
        FetchFailureKind::NoData
    }
}
