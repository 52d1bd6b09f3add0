//! Area selection shared by the `render` and `summary` commands.
//!
//! Both commands accept the same location and network options; this module
//! resolves them into processor and provider configuration and runs the
//! fetch → aggregate pipeline.

use geo::Coord;
use parkzone_core::config::{DEFAULT_CENTER, location};
use parkzone_core::{
    DEFAULT_MAX_RETRIES, GraphProvider, MapSettings, ParkingZoneProcessor, ProcessorConfig,
};
use parkzone_data::{OverpassConfig, OverpassGraphProvider};

use crate::{ARG_LAT, ARG_LOCATION, ARG_LON, CliError};

/// Processor driven by whichever provider the builder produced.
pub(crate) type AreaProcessor = ParkingZoneProcessor<Box<dyn GraphProvider>>;

/// Area and network options after configuration merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AreaOptions {
    pub(crate) lat: Option<f64>,
    pub(crate) lon: Option<f64>,
    pub(crate) location: Option<String>,
    pub(crate) tile_provider: Option<String>,
    pub(crate) radius: Option<u32>,
    pub(crate) zoom: Option<u8>,
    pub(crate) overpass_url: Option<String>,
    pub(crate) retries: Option<u32>,
}

/// Environment variables that can supply the coordinate pair.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordinateEnv {
    pub(crate) lat: &'static str,
    pub(crate) lon: &'static str,
}

/// Resolved area configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AreaConfig {
    /// Processor inputs with the chosen centre applied.
    pub(crate) processor: ProcessorConfig,
    /// Overpass client configuration.
    pub(crate) overpass: OverpassConfig,
    /// Total fetch attempts.
    pub(crate) retries: u32,
}

impl AreaConfig {
    /// Resolve `options`, naming `env` in missing-coordinate errors.
    pub(crate) fn resolve(options: AreaOptions, env: CoordinateEnv) -> Result<Self, CliError> {
        let center = resolve_center(options.lat, options.lon, options.location, env)?;

        let mut settings = MapSettings::default();
        if let Some(radius) = options.radius {
            settings = settings.with_radius(radius);
        }
        if let Some(zoom) = options.zoom {
            settings = settings.with_zoom(zoom);
        }
        let mut processor = ProcessorConfig::default()
            .with_settings(settings)
            .with_center(center.y, center.x);
        if let Some(tiles) = options.tile_provider {
            processor = processor.with_tile_provider(tiles);
        }

        let overpass = options
            .overpass_url
            .map_or_else(OverpassConfig::default, OverpassConfig::new);

        Ok(Self {
            processor,
            overpass,
            retries: options.retries.unwrap_or(DEFAULT_MAX_RETRIES),
        })
    }
}

fn resolve_center(
    lat: Option<f64>,
    lon: Option<f64>,
    preset: Option<String>,
    env: CoordinateEnv,
) -> Result<Coord<f64>, CliError> {
    match (lat, lon, preset) {
        (Some(_), _, Some(_)) => Err(CliError::ConflictingArguments {
            field: ARG_LOCATION,
            other: ARG_LAT,
        }),
        (_, Some(_), Some(_)) => Err(CliError::ConflictingArguments {
            field: ARG_LOCATION,
            other: ARG_LON,
        }),
        (Some(lat), Some(lon), None) => Ok(Coord { x: lon, y: lat }),
        (Some(_), None, None) => Err(CliError::MissingArgument {
            field: ARG_LON,
            env: env.lon,
        }),
        (None, Some(_), None) => Err(CliError::MissingArgument {
            field: ARG_LAT,
            env: env.lat,
        }),
        (None, None, Some(id)) => location(&id)
            .map(|preset| preset.center)
            .ok_or(CliError::UnknownLocation { id }),
        (None, None, None) => Ok(DEFAULT_CENTER),
    }
}

/// Builds the street data provider for one invocation.
pub(crate) trait ProviderBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn GraphProvider>, CliError>;
}

/// Production builder targeting an Overpass endpoint.
pub(crate) struct OverpassProviderBuilder;

impl ProviderBuilder for OverpassProviderBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn GraphProvider>, CliError> {
        let provider = OverpassGraphProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildProvider {
                endpoint: config.endpoint.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

/// Fetch and aggregate the street data for `area`.
pub(crate) fn process_area(
    area: &AreaConfig,
    builder: &dyn ProviderBuilder,
) -> Result<AreaProcessor, CliError> {
    let provider = builder.build(&area.overpass)?;
    let mut processor = ParkingZoneProcessor::new(provider, area.processor.clone())?;
    processor.fetch_map_data(area.retries)?;
    processor.process_zones()?;
    processor.log_processing_summary();
    Ok(processor)
}
