//! Overpass JSON response types and their conversion into street graphs.
//!
//! Only the fields needed to rebuild the street network are decoded; unknown
//! element types (relations, areas) are skipped.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL#JSON>

use std::collections::HashMap;

use geo::Coord;
use log::{debug, warn};
use parkzone_core::{FetchError, StreetGraph, StreetName};
use serde::Deserialize;

/// Top-level Overpass response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    /// Elements matched by the query.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// Diagnostic the server attaches when a query fails at runtime.
    #[serde(default)]
    pub remark: Option<String>,
}

/// One OSM element in an Overpass response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    /// A point with coordinates.
    Node {
        /// OSM node identifier.
        id: u64,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// An ordered list of node references.
    Way {
        /// OSM way identifier.
        id: u64,
        /// Referenced node identifiers in drawing order.
        #[serde(default)]
        nodes: Vec<u64>,
        /// Way tags such as `name` and `highway`.
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    /// Any other element type.
    #[serde(other)]
    Other,
}

impl OverpassResponse {
    /// Convert the response into a street graph.
    ///
    /// Every consecutive pair of nodes in a way becomes one edge named after
    /// the way. Nodes with non-finite coordinates are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Service`] when the server reported a runtime
    /// error and returned no elements.
    pub fn into_street_graph(self) -> Result<StreetGraph, FetchError> {
        if let Some(remark) = self.remark {
            if self.elements.is_empty() {
                return Err(FetchError::Service { message: remark });
            }
            warn!("Overpass returned partial data: {remark}");
        }

        let mut graph = StreetGraph::new();
        let mut ways = 0_usize;
        for element in self.elements {
            match element {
                OverpassElement::Node { id, lat, lon } => {
                    if lat.is_finite() && lon.is_finite() {
                        graph.add_node(id, Coord { x: lon, y: lat });
                    }
                }
                OverpassElement::Way { id, nodes, tags } => {
                    ways += 1;
                    if nodes.len() < 2 {
                        debug!("skipping way {id} with fewer than two nodes");
                        continue;
                    }
                    let name = street_name(&tags);
                    for pair in nodes.windows(2) {
                        if let [from, to] = *pair {
                            graph.add_edge(from, to, name.clone());
                        }
                    }
                }
                OverpassElement::Other => {}
            }
        }
        debug!(
            "decoded {ways} ways into {} nodes and {} edges",
            graph.node_count(),
            graph.edges().len()
        );
        Ok(graph)
    }
}

/// Decode an Overpass JSON body into a street graph.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] for malformed JSON and
/// [`FetchError::Service`] for server-side runtime errors.
pub fn parse_street_graph(body: &str) -> Result<StreetGraph, FetchError> {
    let response: OverpassResponse =
        serde_json::from_str(body).map_err(|err| FetchError::Parse {
            message: err.to_string(),
        })?;
    response.into_street_graph()
}

/// Name candidates of a way: `name` values first, then `alt_name` values.
///
/// OSM separates multiple values of one tag with `;`.
fn street_name(tags: &HashMap<String, String>) -> Option<StreetName> {
    StreetName::from_candidates(tag_values(tags, "name").chain(tag_values(tags, "alt_name")))
}

fn tag_values<'a>(
    tags: &'a HashMap<String, String>,
    key: &'static str,
) -> impl Iterator<Item = &'a str> + 'a {
    tags.get(key)
        .into_iter()
        .flat_map(|value| value.split(';'))
        .map(str::trim)
}
