//! Command-line interface for the parkzone map generator.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use parkzone_core::config::LOCATIONS;
use parkzone_core::tiles::TILE_PROVIDERS;

mod area;
mod error;
mod render;
mod summary;

pub use error::CliError;

use area::{OverpassProviderBuilder, ProviderBuilder};
use render::RenderArgs;
use summary::SummaryArgs;

pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_TILE_PROVIDER: &str = "tile-provider";
pub(crate) const ARG_RADIUS: &str = "radius";
pub(crate) const ARG_ZOOM: &str = "zoom";
pub(crate) const ARG_OVERPASS_URL: &str = "overpass-url";
pub(crate) const ARG_RETRIES: &str = "retries";
pub(crate) const ENV_RENDER_LAT: &str = "PARKZONE_CMDS_RENDER_LAT";
pub(crate) const ENV_RENDER_LON: &str = "PARKZONE_CMDS_RENDER_LON";
pub(crate) const ENV_SUMMARY_LAT: &str = "PARKZONE_CMDS_SUMMARY_LAT";
pub(crate) const ENV_SUMMARY_LON: &str = "PARKZONE_CMDS_SUMMARY_LON";

/// Run the parkzone CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure; argument errors
/// (including `--help`) surface as [`CliError::ArgumentParsing`].
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &OverpassProviderBuilder, &mut stdout)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already installed");
    }
}

fn dispatch(
    command: Command,
    builder: &dyn ProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Render(args) => render::run_render_with(args, builder, writer),
        Command::Summary(args) => summary::run_summary_with(args, builder, writer),
        Command::Providers => write_providers(writer),
        Command::Locations => write_locations(writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parkzone",
    about = "Generate interactive maps of parking zones from OpenStreetMap data",
    version
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch street data and save an HTML map of the parking zones.
    Render(RenderArgs),
    /// Fetch street data and print the processing summary as JSON.
    Summary(SummaryArgs),
    /// List the available background tile providers.
    Providers,
    /// List the named location presets.
    Locations,
}

fn write_providers(writer: &mut dyn Write) -> Result<(), CliError> {
    for provider in &TILE_PROVIDERS {
        writeln!(
            writer,
            "{:<20} {} (zoom {}-{})",
            provider.id, provider.name, provider.min_zoom, provider.max_zoom
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

fn write_locations(writer: &mut dyn Write) -> Result<(), CliError> {
    for preset in &LOCATIONS {
        writeln!(
            writer,
            "{:<20} {} ({}, {})",
            preset.id, preset.name, preset.center.y, preset.center.x
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
