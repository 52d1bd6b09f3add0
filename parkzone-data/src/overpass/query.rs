//! Overpass QL query construction.

use geo::Coord;

/// Build the query selecting highway ways around `center` plus their nodes.
///
/// `timeout_secs` is forwarded as the server-side query budget so that the
/// service gives up no later than the client does. The recursion `(._;>;)`
/// pulls in every node referenced by the selected ways.
#[must_use]
pub fn highway_query(center: Coord<f64>, radius_meters: u32, timeout_secs: u64) -> String {
    format!(
        "[out:json][timeout:{timeout_secs}];\
         way[\"highway\"](around:{radius_meters},{lat},{lon});\
         (._;>;);\
         out body;",
        lat = center.y,
        lon = center.x,
    )
}
