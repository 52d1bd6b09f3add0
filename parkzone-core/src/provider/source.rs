//! Street-graph provider trait.

use geo::Coord;

use crate::StreetGraph;

use super::error::FetchError;

/// Fetch the street network around a point.
///
/// Implementations return every street segment within `radius_meters` of
/// `center` (`x = longitude`, `y = latitude`). An empty result may be
/// returned either as [`FetchError::EmptyGraph`] or as a graph without
/// nodes; callers treat both as "no data".
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use parkzone_core::{FetchError, GraphProvider, StreetGraph};
///
/// struct SingleNode;
///
/// impl GraphProvider for SingleNode {
///     fn fetch(&self, center: Coord<f64>, _radius_meters: u32) -> Result<StreetGraph, FetchError> {
///         let mut graph = StreetGraph::new();
///         graph.add_node(1, center);
///         Ok(graph)
///     }
/// }
///
/// let graph = SingleNode.fetch(Coord { x: 20.0, y: 45.0 }, 500)?;
/// assert_eq!(graph.node_count(), 1);
/// # Ok::<(), FetchError>(())
/// ```
pub trait GraphProvider {
    /// Return the street graph around `center`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why no graph could be produced.
    fn fetch(&self, center: Coord<f64>, radius_meters: u32) -> Result<StreetGraph, FetchError>;
}

impl<P: GraphProvider + ?Sized> GraphProvider for &P {
    fn fetch(&self, center: Coord<f64>, radius_meters: u32) -> Result<StreetGraph, FetchError> {
        (**self).fetch(center, radius_meters)
    }
}

impl<P: GraphProvider + ?Sized> GraphProvider for Box<P> {
    fn fetch(&self, center: Coord<f64>, radius_meters: u32) -> Result<StreetGraph, FetchError> {
        (**self).fetch(center, radius_meters)
    }
}
