//! Facade crate for the parkzone map generator.
//!
//! This crate re-exports the core zone-matching types and exposes the
//! Overpass street-graph provider and the HTML map renderer behind feature
//! flags.

#![forbid(unsafe_code)]

pub use parkzone_core::{
    AggregateError, Aggregation, FetchError, FetchFailureKind, GraphProvider, MapSettings,
    ParkingZoneProcessor, ProcessingSummary, ProcessorConfig, ProcessorError, StreetEdge,
    StreetGraph, StreetName, StreetZoneIndex, TileProvider, Zone, ZoneConfig,
    ZoneGeometryCollection, ZoneSegment, aggregate,
};

#[cfg(feature = "overpass")]
pub use parkzone_data::{OverpassConfig, OverpassGraphProvider};

#[cfg(feature = "render")]
pub use parkzone_render::{MapDocument, RenderError};
