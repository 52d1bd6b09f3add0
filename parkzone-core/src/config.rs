//! Static configuration values: zone street lists, map defaults and
//! location presets.
//!
//! Everything here is a plain value passed into constructors. Nothing is read
//! from module-level mutable state, so processors can be built in tests with
//! arbitrary configurations.

use std::collections::BTreeMap;

use geo::Coord;

use crate::Zone;
use crate::tiles::DEFAULT_TILE_PROVIDER;

/// Default map centre: Zrenjanin city centre. `x = longitude`, `y = latitude`.
pub const DEFAULT_CENTER: Coord<f64> = Coord {
    x: 20.393_73,
    y: 45.380_96,
};

/// Default street search radius around the centre.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Default initial zoom level of the rendered map.
pub const DEFAULT_ZOOM: u8 = 14;

/// Default file name of the rendered map.
pub const DEFAULT_MAP_FILENAME: &str = "parking_map.html";

/// Default popup text of the centre marker.
pub const DEFAULT_MARKER_LABEL: &str = "Центар";

const RED_STREETS: [&str; 9] = [
    "Пупинова",
    "Светосавска",
    "Јеврејска",
    "Гимназијска",
    "Краља Александра Првог Карађорђевића",
    "Краља Петра Првог",
    "Сарајлијина",
    "Немањина",
    "Др Славка Жупанског",
];

const YELLOW_STREETS: [&str; 4] = [
    "Слободана Бурсаћа",
    "Савезничка",
    "Цара Душана",
    "Мирослава Тирша",
];

const GREEN_STREETS: [&str; 11] = [
    "Кеј другог октобра",
    "Обала Соње Маринковић",
    "Обилићева",
    "Петефијева",
    "Даничићева",
    "Марка Орешковића",
    "Иве Лоле Рибара",
    "Косте Абрашевића",
    "20. октобра",
    "Југ Богдана",
    "Саве Текелије",
];

/// Street names assigned to each parking zone.
///
/// A street should belong to at most one zone; this is not validated.
///
/// # Examples
/// ```
/// use parkzone_core::{Zone, ZoneConfig};
///
/// let config = ZoneConfig::empty()
///     .with_streets(Zone::Red, ["Main Street"])
///     .with_streets(Zone::Green, ["Park Lane", "Mill Road"]);
/// assert_eq!(config.street_count(), 3);
/// assert_eq!(config.streets(Zone::Green).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfig {
    zones: BTreeMap<Zone, Vec<String>>,
}

impl ZoneConfig {
    /// Configuration without any streets.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            zones: BTreeMap::new(),
        }
    }

    /// Append `streets` to the list for `zone`.
    #[must_use]
    pub fn with_streets<I, S>(mut self, zone: Zone, streets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zones
            .entry(zone)
            .or_default()
            .extend(streets.into_iter().map(Into::into));
        self
    }

    /// The built-in Zrenjanin parking-zone street lists.
    #[must_use]
    pub fn zrenjanin() -> Self {
        Self::empty()
            .with_streets(Zone::Red, RED_STREETS)
            .with_streets(Zone::Yellow, YELLOW_STREETS)
            .with_streets(Zone::Green, GREEN_STREETS)
    }

    /// Streets configured for `zone`, in configuration order.
    #[must_use]
    pub fn streets(&self, zone: Zone) -> &[String] {
        self.zones.get(&zone).map_or(&[], Vec::as_slice)
    }

    /// Iterate `(zone, streets)` pairs in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &[String])> + '_ {
        self.zones
            .iter()
            .map(|(zone, streets)| (*zone, streets.as_slice()))
    }

    /// Total number of configured street names, duplicates included.
    #[must_use]
    pub fn street_count(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::zrenjanin()
    }
}

/// Process-wide map defaults used when a caller leaves a value unset.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Map centre and street search origin.
    pub center: Coord<f64>,
    /// Street search radius in metres.
    pub radius_meters: u32,
    /// Initial zoom level of the rendered map.
    pub zoom: u8,
    /// Identifier of the default tile provider.
    pub tile_provider: String,
    /// Popup text of the centre marker.
    pub marker_label: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            radius_meters: DEFAULT_RADIUS_METERS,
            zoom: DEFAULT_ZOOM,
            tile_provider: DEFAULT_TILE_PROVIDER.to_owned(),
            marker_label: DEFAULT_MARKER_LABEL.to_owned(),
        }
    }
}

impl MapSettings {
    /// Set the street search radius.
    #[must_use]
    pub fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Set the initial zoom level.
    #[must_use]
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }
}

/// A named map centre offered to interactive users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Centre coordinate, `x = longitude`, `y = latitude`.
    pub center: Coord<f64>,
}

/// Known location presets.
pub const LOCATIONS: [Location; 1] = [Location {
    id: "zrenjanin",
    name: "Зрењанин",
    center: DEFAULT_CENTER,
}];

/// Look up a location preset by identifier, ignoring case.
#[must_use]
pub fn location(id: &str) -> Option<&'static Location> {
    LOCATIONS
        .iter()
        .find(|location| location.id.eq_ignore_ascii_case(id))
}
