//! Error types emitted by the parkzone CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use parkzone_core::ProcessorError;
use parkzone_data::ProviderBuildError;
use parkzone_render::RenderError;
use thiserror::Error;

/// Errors emitted by the parkzone CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Two options that cannot be combined were both supplied.
    #[error("--{field} cannot be combined with --{other}")]
    ConflictingArguments {
        /// Flag that was rejected.
        field: &'static str,
        /// Flag it conflicts with.
        other: &'static str,
    },
    /// The named location preset does not exist.
    #[error("unknown location '{id}' (run `parkzone locations` to list presets)")]
    UnknownLocation {
        /// Identifier as given.
        id: String,
    },
    /// Constructing the street data provider failed.
    #[error("failed to build street data provider for {endpoint:?}: {source}")]
    BuildProvider {
        /// Configured Overpass endpoint.
        endpoint: String,
        /// Underlying construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Fetching or processing the street data failed.
    #[error(transparent)]
    Process(#[from] ProcessorError),
    /// Rendering or saving the map failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Serialising the processing summary failed.
    #[error("failed to serialise processing summary: {0}")]
    SerialiseSummary(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
