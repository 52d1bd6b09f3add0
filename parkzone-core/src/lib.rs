//! Core domain types for the parkzone map generator.
//!
//! The crate turns a street network into parking-zone geometry: a
//! [`StreetZoneIndex`] maps configured street names to [`Zone`]s,
//! [`aggregate`] groups matching graph edges by zone, and
//! [`ParkingZoneProcessor`] wraps fetching (through a [`GraphProvider`]),
//! aggregation and reporting. Constructors validate eagerly and return
//! `Result` to surface invalid input early.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod graph;
pub mod index;
pub mod processor;
pub mod provider;
pub mod summary;
pub mod tiles;
pub mod zone;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use aggregate::{AggregateError, Aggregation, ZoneGeometryCollection, ZoneSegment, aggregate};
pub use config::{Location, MapSettings, ZoneConfig};
pub use graph::{StreetEdge, StreetGraph, StreetName};
pub use index::StreetZoneIndex;
pub use processor::{
    DEFAULT_MAX_RETRIES, ParkingZoneProcessor, ProcessorConfig, ProcessorError,
};
pub use provider::{FetchError, FetchFailureKind, GraphProvider};
pub use summary::ProcessingSummary;
pub use tiles::TileProvider;
pub use zone::Zone;
