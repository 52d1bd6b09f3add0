//! Fetch, aggregate and summarise parking-zone street data.
//!
//! [`ParkingZoneProcessor`] owns the run configuration and drives the
//! pipeline:
//!
//! 1. [`ParkingZoneProcessor::fetch_map_data`] retrieves the street graph with
//!    bounded, linearly backed-off retries.
//! 2. [`ParkingZoneProcessor::process_zones`] matches the graph against the
//!    street index.
//! 3. [`ParkingZoneProcessor::processing_summary`] and
//!    [`ParkingZoneProcessor::missing_streets`] report the outcome.
//!
//! A processor serves a single run and is not shared between threads.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use geo::Coord;
use log::{debug, info, warn};
use thiserror::Error;

use crate::tiles::tile_provider;
use crate::{
    AggregateError, Aggregation, FetchError, FetchFailureKind, GraphProvider, MapSettings,
    ProcessingSummary, StreetGraph, StreetZoneIndex, TileProvider, ZoneConfig,
    ZoneGeometryCollection, aggregate,
};

/// Default number of fetch attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff unit; attempt `n` waits `n` times this before retrying.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_secs(2);

/// Errors returned by [`ParkingZoneProcessor`].
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// A constructor input was invalid.
    #[error("invalid {field}: {reason}")]
    Config {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The street data service could not be reached.
    #[error("failed to fetch street data after {attempts} attempts: {source}")]
    Connection {
        /// Number of attempts made.
        attempts: u32,
        /// Failure of the last attempt.
        #[source]
        source: FetchError,
    },
    /// The service answered but produced no usable streets.
    #[error("no streets found in area after {attempts} attempts: {source}")]
    NoData {
        /// Number of attempts made.
        attempts: u32,
        /// Failure of the last attempt.
        #[source]
        source: FetchError,
    },
    /// A method was called out of order.
    #[error("{message}")]
    State {
        /// What the caller must do first.
        message: &'static str,
    },
    /// Aggregation failed.
    #[error("failed to process street data: {source}")]
    Data {
        /// Underlying aggregation failure.
        #[from]
        source: AggregateError,
    },
}

impl ProcessorError {
    fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }

    fn from_fetch(attempts: u32, source: FetchError) -> Self {
        match source.kind() {
            FetchFailureKind::Connection => Self::Connection { attempts, source },
            FetchFailureKind::NoData => Self::NoData { attempts, source },
        }
    }
}

/// Inputs to [`ParkingZoneProcessor::new`].
///
/// `center` and `tile_provider` fall back to `settings` when unset. A value
/// that is set but invalid is rejected rather than replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Streets assigned to each zone.
    pub zones: ZoneConfig,
    /// Process-wide defaults.
    pub settings: MapSettings,
    /// Requested map centre, `x = longitude`, `y = latitude`.
    pub center: Option<Coord<f64>>,
    /// Requested tile provider identifier.
    pub tile_provider: Option<String>,
    /// Backoff unit between fetch attempts.
    pub backoff_step: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            zones: ZoneConfig::default(),
            settings: MapSettings::default(),
            center: None,
            tile_provider: None,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl ProcessorConfig {
    /// Request a map centre from latitude and longitude.
    #[must_use]
    pub fn with_center(mut self, latitude: f64, longitude: f64) -> Self {
        self.center = Some(Coord {
            x: longitude,
            y: latitude,
        });
        self
    }

    /// Request a tile provider by identifier.
    #[must_use]
    pub fn with_tile_provider(mut self, id: impl Into<String>) -> Self {
        self.tile_provider = Some(id.into());
        self
    }

    /// Replace the zone street lists.
    #[must_use]
    pub fn with_zones(mut self, zones: ZoneConfig) -> Self {
        self.zones = zones;
        self
    }

    /// Replace the process-wide defaults.
    #[must_use]
    pub fn with_settings(mut self, settings: MapSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the backoff unit between fetch attempts.
    #[must_use]
    pub fn with_backoff_step(mut self, backoff_step: Duration) -> Self {
        self.backoff_step = backoff_step;
        self
    }
}

/// Drives fetch → aggregate → summarise for one run.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use parkzone_core::test_support::{ScriptedGraphProvider, sample_graph};
/// use parkzone_core::{ParkingZoneProcessor, ProcessorConfig, Zone};
///
/// # fn main() -> Result<(), parkzone_core::ProcessorError> {
/// let provider = ScriptedGraphProvider::always(Ok(sample_graph()));
/// let config = ProcessorConfig::default().with_backoff_step(Duration::ZERO);
/// let mut processor = ParkingZoneProcessor::new(provider, config)?;
/// processor.fetch_map_data(3)?;
/// processor.process_zones()?;
/// assert!(!processor.zone_geometries()[&Zone::Red].is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ParkingZoneProcessor<P> {
    provider: P,
    index: StreetZoneIndex,
    center: Coord<f64>,
    radius_meters: u32,
    zoom: u8,
    tile_provider: &'static TileProvider,
    marker_label: String,
    backoff_step: Duration,
    graph: Option<StreetGraph>,
    aggregation: Aggregation,
}

impl<P: GraphProvider> ParkingZoneProcessor<P> {
    /// Validate `config` and build a processor around `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Config`] naming the field when the centre is
    /// out of range, the tile provider is unknown, the radius is zero or the
    /// zoom is outside the provider's range.
    pub fn new(provider: P, config: ProcessorConfig) -> Result<Self, ProcessorError> {
        let ProcessorConfig {
            zones,
            settings,
            center,
            tile_provider: requested_tiles,
            backoff_step,
        } = config;

        let center = center.unwrap_or(settings.center);
        validate_center(center)?;

        let tiles_id = requested_tiles.unwrap_or(settings.tile_provider);
        let tiles = tile_provider(&tiles_id).ok_or_else(|| {
            ProcessorError::config("tile_provider", format!("unknown tile provider '{tiles_id}'"))
        })?;

        if settings.radius_meters == 0 {
            return Err(ProcessorError::config(
                "radius_meters",
                "search radius must be positive",
            ));
        }
        if !tiles.supports_zoom(settings.zoom) {
            return Err(ProcessorError::config(
                "zoom",
                format!(
                    "zoom {} is outside {}..={} supported by {}",
                    settings.zoom, tiles.min_zoom, tiles.max_zoom, tiles.id
                ),
            ));
        }

        Ok(Self {
            provider,
            index: StreetZoneIndex::build(&zones),
            center,
            radius_meters: settings.radius_meters,
            zoom: settings.zoom,
            tile_provider: tiles,
            marker_label: settings.marker_label,
            backoff_step,
            graph: None,
            aggregation: Aggregation::default(),
        })
    }

    /// Fetch the street graph, retrying up to `max_retries` attempts in total.
    ///
    /// A graph without nodes counts as a failed attempt. A `max_retries` of
    /// zero still makes one attempt. On success the graph replaces any
    /// previous one and earlier aggregation results are discarded.
    ///
    /// # Errors
    ///
    /// After the last attempt fails, returns [`ProcessorError::Connection`]
    /// for connectivity failures and [`ProcessorError::NoData`] otherwise.
    pub fn fetch_map_data(&mut self, max_retries: u32) -> Result<(), ProcessorError> {
        let attempts = max_retries.max(1);
        let mut last_error = FetchError::EmptyGraph;
        for attempt in 1..=attempts {
            info!(
                "Retrieving map data for point ({}, {}) within {}m (attempt {attempt}/{attempts})...",
                self.center.y, self.center.x, self.radius_meters
            );
            match self.provider.fetch(self.center, self.radius_meters) {
                Ok(graph) if !graph.is_empty() => {
                    debug!(
                        "received {} nodes and {} edges",
                        graph.node_count(),
                        graph.edges().len()
                    );
                    self.graph = Some(graph);
                    self.aggregation = Aggregation::default();
                    return Ok(());
                }
                Ok(_) => {
                    warn!("attempt {attempt}/{attempts} returned an empty street graph");
                    last_error = FetchError::EmptyGraph;
                }
                Err(err) => {
                    warn!("attempt {attempt}/{attempts} failed: {err}");
                    last_error = err;
                }
            }
            if attempt < attempts {
                self.back_off(attempt);
            }
        }
        Err(ProcessorError::from_fetch(attempts, last_error))
    }

    fn back_off(&self, attempt: u32) {
        let delay = self.backoff_step.saturating_mul(attempt);
        if !delay.is_zero() {
            debug!("waiting {delay:?} before retrying");
            thread::sleep(delay);
        }
    }
}

impl<P> ParkingZoneProcessor<P> {
    /// Match the fetched graph against the street index.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::State`] when no graph has been fetched and
    /// [`ProcessorError::Data`] when aggregation fails.
    pub fn process_zones(&mut self) -> Result<(), ProcessorError> {
        let graph = self.graph.as_ref().ok_or(ProcessorError::State {
            message: "no map data available: call fetch_map_data before process_zones",
        })?;
        info!("Processing graph edges to find parking zones...");
        self.aggregation = aggregate(graph, &self.index)?;
        Ok(())
    }

    /// Indexed streets that did not match any edge.
    #[must_use]
    pub fn missing_streets(&self) -> BTreeSet<String> {
        self.index
            .street_names()
            .into_iter()
            .filter(|name| !self.aggregation.found.contains(*name))
            .map(str::to_owned)
            .collect()
    }

    /// Per-zone counts and the sorted missing-street list.
    #[must_use]
    pub fn processing_summary(&self) -> ProcessingSummary {
        ProcessingSummary {
            zone_counts: self
                .aggregation
                .geometries
                .iter()
                .map(|(zone, segments)| (*zone, segments.len()))
                .collect(),
            missing_streets: self.missing_streets().into_iter().collect(),
        }
    }

    /// Log the processing summary.
    pub fn log_processing_summary(&self) {
        self.processing_summary().log();
    }

    /// Matched segments grouped by zone.
    #[must_use]
    pub const fn zone_geometries(&self) -> &ZoneGeometryCollection {
        &self.aggregation.geometries
    }

    /// Normalised names of every matched street.
    #[must_use]
    pub const fn found_streets(&self) -> &BTreeSet<String> {
        &self.aggregation.found
    }

    /// The street-graph provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// The most recently fetched graph.
    #[must_use]
    pub const fn graph(&self) -> Option<&StreetGraph> {
        self.graph.as_ref()
    }

    /// The street-name index.
    #[must_use]
    pub const fn index(&self) -> &StreetZoneIndex {
        &self.index
    }

    /// Map centre, `x = longitude`, `y = latitude`.
    #[must_use]
    pub const fn center(&self) -> Coord<f64> {
        self.center
    }

    /// Street search radius in metres.
    #[must_use]
    pub const fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    /// Initial map zoom.
    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Selected tile provider.
    #[must_use]
    pub const fn tile_provider(&self) -> &'static TileProvider {
        self.tile_provider
    }

    /// Popup text of the centre marker.
    #[must_use]
    pub fn marker_label(&self) -> &str {
        &self.marker_label
    }
}

fn validate_center(center: Coord<f64>) -> Result<(), ProcessorError> {
    let Coord {
        x: longitude,
        y: latitude,
    } = center;
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ProcessorError::config(
            "center",
            format!("latitude {latitude} is outside [-90, 90]"),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ProcessorError::config(
            "center",
            format!("longitude {longitude} is outside [-180, 180]"),
        ));
    }
    Ok(())
}
