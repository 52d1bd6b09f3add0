//! Summary command: process an area and report the outcome as JSON.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parkzone_core::ProcessingSummary;
use serde::{Deserialize, Serialize};

use crate::area::{AreaConfig, AreaOptions, CoordinateEnv, ProviderBuilder, process_area};
use crate::{
    ARG_LAT, ARG_LOCATION, ARG_LON, ARG_OVERPASS_URL, ARG_RADIUS, ARG_RETRIES, CliError,
    ENV_SUMMARY_LAT, ENV_SUMMARY_LON,
};

/// CLI arguments for the `summary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "summary",
    long_about = "Fetch the street network around a centre point, match it \
                 against the configured parking zones and print per-zone \
                 segment counts and missing streets as JSON.",
    about = "Print the parking zone processing summary"
)]
#[ortho_config(prefix = "PARKZONE")]
pub(crate) struct SummaryArgs {
    /// Latitude of the centre (requires --lon).
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the centre (requires --lat).
    #[arg(long = ARG_LON, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Named location preset used instead of --lat/--lon.
    #[arg(long = ARG_LOCATION, value_name = "id")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Street search radius in metres.
    #[arg(long = ARG_RADIUS, value_name = "m")]
    #[serde(default)]
    pub(crate) radius: Option<u32>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Total fetch attempts before giving up.
    #[arg(long = ARG_RETRIES, value_name = "n")]
    #[serde(default)]
    pub(crate) retries: Option<u32>,
}

impl SummaryArgs {
    fn into_config(self) -> Result<AreaConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AreaConfig::try_from(merged)
    }
}

impl TryFrom<SummaryArgs> for AreaConfig {
    type Error = CliError;

    fn try_from(args: SummaryArgs) -> Result<Self, Self::Error> {
        let options = AreaOptions {
            lat: args.lat,
            lon: args.lon,
            location: args.location,
            radius: args.radius,
            overpass_url: args.overpass_url,
            retries: args.retries,
            ..AreaOptions::default()
        };
        let env = CoordinateEnv {
            lat: ENV_SUMMARY_LAT,
            lon: ENV_SUMMARY_LON,
        };
        Self::resolve(options, env)
    }
}

pub(crate) fn run_summary_with(
    args: SummaryArgs,
    builder: &dyn ProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let processor = process_area(&config, builder)?;
    write_summary(writer, &processor.processing_summary())
}

fn write_summary(writer: &mut dyn Write, summary: &ProcessingSummary) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(summary).map_err(CliError::SerialiseSummary)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
