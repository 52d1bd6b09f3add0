//! Retrieve street graphs around a centre point.
//!
//! The `GraphProvider` trait abstracts the street-network service. Callers
//! supply a centre coordinate and a radius and receive a
//! [`StreetGraph`](crate::StreetGraph).
//!
//! Failures are typed so the processor can tell connectivity problems from
//! areas without data.

mod error;
mod source;

pub use error::{FetchError, FetchFailureKind};
pub use source::GraphProvider;
