//! Interactive HTML maps of parking zones.
//!
//! [`MapDocument`] collects zone polylines, a legend and a centre marker and
//! renders them as a standalone Leaflet page. Rendering is a thin emitter:
//! the page pulls Leaflet from a CDN and draws from an embedded JSON payload.

#![forbid(unsafe_code)]

mod document;
mod error;
mod html;

pub use document::{LEAFLET_VERSION, MapDocument, POLYLINE_OPACITY, POLYLINE_WEIGHT};
pub use error::RenderError;
pub use html::escape_html;
