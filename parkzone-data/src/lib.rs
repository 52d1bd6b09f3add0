//! Street data retrieval for the parkzone map generator.
//!
//! Responsibilities:
//! - Implement [`parkzone_core::GraphProvider`] against remote services.
//! - Decode service payloads into [`parkzone_core::StreetGraph`] values.
//! - Translate transport failures into typed [`parkzone_core::FetchError`]s.
//!
//! Boundaries:
//! - Do not encode zone rules (live in `parkzone-core`).
//! - Keep the provider interface synchronous; async clients are driven
//!   internally.

pub mod overpass;

pub use overpass::{
    DEFAULT_OVERPASS_URL, DEFAULT_USER_AGENT, OverpassConfig, OverpassGraphProvider,
    ProviderBuildError,
};
