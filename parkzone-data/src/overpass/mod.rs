//! Street graphs from the Overpass API.
//!
//! [`OverpassGraphProvider`] asks an Overpass endpoint for every way tagged
//! `highway` within a radius of a centre point, together with the nodes
//! those ways reference, and turns the answer into a
//! [`StreetGraph`](parkzone_core::StreetGraph).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use geo::Coord;
//! use parkzone_core::GraphProvider;
//! use parkzone_data::overpass::{OverpassConfig, OverpassGraphProvider};
//!
//! let config = OverpassConfig::default()
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let provider = OverpassGraphProvider::with_config(config)?;
//!
//! let graph = provider.fetch(Coord { x: 20.39373, y: 45.38096 }, 1_000)?;
//! println!("{} nodes", graph.node_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod provider;
mod query;
mod response;

pub use provider::{
    DEFAULT_OVERPASS_URL, DEFAULT_USER_AGENT, OverpassConfig, OverpassGraphProvider,
    ProviderBuildError,
};
pub use query::highway_query;
pub use response::{OverpassElement, OverpassResponse, parse_street_graph};
