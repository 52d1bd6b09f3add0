//! Group matched street segments by parking zone.
//!
//! [`aggregate`] walks the edges of a [`StreetGraph`] in order, matches each
//! edge's name candidates against a [`StreetZoneIndex`] and collects one
//! [`ZoneSegment`] per matched edge. Edges whose endpoints are missing from
//! the node set are logged and skipped; they never abort the run.

use std::collections::{BTreeMap, BTreeSet};

use geo::Coord;
use log::{debug, warn};
use thiserror::Error;

use crate::index::normalise_street_name;
use crate::{StreetEdge, StreetGraph, StreetZoneIndex, Zone};

/// One matched street segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSegment {
    /// Segment endpoints, `x = longitude`, `y = latitude`.
    pub points: [Coord<f64>; 2],
    /// The matched name exactly as it appeared on the edge.
    pub street_name: String,
}

impl ZoneSegment {
    /// Endpoints as `(latitude, longitude)` pairs, the order web maps expect.
    #[must_use]
    pub const fn lat_lon(&self) -> [(f64, f64); 2] {
        let [start, end] = self.points;
        [(start.y, start.x), (end.y, end.x)]
    }
}

/// Matched segments per zone, each sequence in edge iteration order.
pub type ZoneGeometryCollection = BTreeMap<Zone, Vec<ZoneSegment>>;

/// Errors returned by [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The graph contained no nodes.
    #[error("empty input graph")]
    EmptyGraph,
}

/// Output of a single aggregation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    /// Segments grouped by zone.
    pub geometries: ZoneGeometryCollection,
    /// Normalised names of every street that matched at least once.
    pub found: BTreeSet<String>,
}

impl Aggregation {
    /// Whether no segment matched in any zone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometries.values().all(Vec::is_empty)
    }

    /// Total number of matched segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.geometries.values().map(Vec::len).sum()
    }
}

/// Match graph edges against `index` and group them by zone.
///
/// Every zone present in `index` gets an entry, possibly empty. For each edge
/// the first name candidate found in the index wins, so an edge contributes
/// at most one segment even when several aliases match.
///
/// # Errors
///
/// Returns [`AggregateError::EmptyGraph`] when `graph` has no nodes.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkzone_core::{StreetGraph, StreetZoneIndex, Zone, ZoneConfig, aggregate};
///
/// let index = StreetZoneIndex::build(&ZoneConfig::empty().with_streets(Zone::Red, ["Main"]));
/// let mut graph = StreetGraph::new();
/// graph.add_node(1, Coord { x: 0.0, y: 0.0 });
/// graph.add_node(2, Coord { x: 1.0, y: 1.0 });
/// graph.add_edge(1, 2, Some("MAIN".into()));
///
/// let aggregation = aggregate(&graph, &index)?;
/// assert_eq!(aggregation.geometries[&Zone::Red].len(), 1);
/// assert!(aggregation.found.contains("main"));
/// # Ok::<(), parkzone_core::AggregateError>(())
/// ```
pub fn aggregate(
    graph: &StreetGraph,
    index: &StreetZoneIndex,
) -> Result<Aggregation, AggregateError> {
    if graph.is_empty() {
        return Err(AggregateError::EmptyGraph);
    }

    let mut aggregation = Aggregation {
        geometries: index.zones().into_iter().map(|zone| (zone, Vec::new())).collect(),
        found: BTreeSet::new(),
    };

    for edge in graph.edges() {
        let Some((zone, name, normalised)) = match_edge(edge, index) else {
            continue;
        };
        let Some(points) = endpoints(graph, edge) else {
            warn!(
                "skipping edge {} -> {} ({name}): endpoint missing from graph",
                edge.from, edge.to
            );
            continue;
        };
        aggregation
            .geometries
            .entry(zone)
            .or_default()
            .push(ZoneSegment {
                points,
                street_name: name.to_owned(),
            });
        aggregation.found.insert(normalised);
    }

    if aggregation.is_empty() {
        warn!("no configured street matched any edge of the graph");
    } else {
        debug!(
            "matched {} segments across {} streets",
            aggregation.segment_count(),
            aggregation.found.len()
        );
    }
    Ok(aggregation)
}

fn match_edge<'e>(
    edge: &'e StreetEdge,
    index: &StreetZoneIndex,
) -> Option<(Zone, &'e str, String)> {
    edge.name.as_ref()?.candidates().find_map(|name| {
        let normalised = normalise_street_name(name);
        index.get(&normalised).map(|zone| (zone, name, normalised))
    })
}

fn endpoints(graph: &StreetGraph, edge: &StreetEdge) -> Option<[Coord<f64>; 2]> {
    Some([graph.node(edge.from)?, graph.node(edge.to)?])
}
