//! Render command implementation for the parkzone CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkzone_core::config::DEFAULT_MAP_FILENAME;
use parkzone_render::MapDocument;
use serde::{Deserialize, Serialize};

use crate::area::{AreaConfig, AreaOptions, CoordinateEnv, ProviderBuilder, process_area};
use crate::{
    ARG_LAT, ARG_LOCATION, ARG_LON, ARG_OUTPUT, ARG_OVERPASS_URL, ARG_RADIUS, ARG_RETRIES,
    ARG_TILE_PROVIDER, ARG_ZOOM, CliError, ENV_RENDER_LAT, ENV_RENDER_LON,
};

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "render",
    long_about = "Fetch the street network around a centre point, match it \
                 against the configured parking zones and save an interactive \
                 HTML map. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Render the parking zone map"
)]
#[ortho_config(prefix = "PARKZONE")]
pub(crate) struct RenderArgs {
    /// Latitude of the map centre (requires --lon).
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the map centre (requires --lat).
    #[arg(long = ARG_LON, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Named location preset used instead of --lat/--lon.
    #[arg(long = ARG_LOCATION, value_name = "id")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Destination of the HTML map (default `parking_map.html`).
    #[arg(long = ARG_OUTPUT, short = 'o', value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Background tile provider identifier.
    #[arg(long = ARG_TILE_PROVIDER, value_name = "id")]
    #[serde(default)]
    pub(crate) tile_provider: Option<String>,
    /// Street search radius in metres.
    #[arg(long = ARG_RADIUS, value_name = "m")]
    #[serde(default)]
    pub(crate) radius: Option<u32>,
    /// Initial zoom level.
    #[arg(long = ARG_ZOOM, value_name = "level")]
    #[serde(default)]
    pub(crate) zoom: Option<u8>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Total fetch attempts before giving up.
    #[arg(long = ARG_RETRIES, value_name = "n")]
    #[serde(default)]
    pub(crate) retries: Option<u32>,
}

impl RenderArgs {
    pub(crate) fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

/// Resolved `render` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RenderConfig {
    /// Area, processor and network settings.
    pub(crate) area: AreaConfig,
    /// Destination of the HTML map.
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let output = args
            .output
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MAP_FILENAME));
        let options = AreaOptions {
            lat: args.lat,
            lon: args.lon,
            location: args.location,
            tile_provider: args.tile_provider,
            radius: args.radius,
            zoom: args.zoom,
            overpass_url: args.overpass_url,
            retries: args.retries,
        };
        let env = CoordinateEnv {
            lat: ENV_RENDER_LAT,
            lon: ENV_RENDER_LON,
        };
        Ok(Self {
            area: AreaConfig::resolve(options, env)?,
            output,
        })
    }
}

pub(crate) fn run_render_with(
    args: RenderArgs,
    builder: &dyn ProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_render(&config, builder, writer)
}

/// Fetch, process and save the map described by `config`.
pub(crate) fn execute_render(
    config: &RenderConfig,
    builder: &dyn ProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let processor = process_area(&config.area, builder)?;

    let mut map = MapDocument::new(
        processor.center(),
        processor.zoom(),
        processor.tile_provider(),
    );
    map.add_zone_polylines(processor.zone_geometries());
    map.add_legend();
    map.add_marker(processor.center(), processor.marker_label());
    map.save(&config.output)?;

    writeln!(writer, "{}", config.output).map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RenderConfig, CliError> {
    let merged = RenderArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RenderConfig::try_from(merged)
}
