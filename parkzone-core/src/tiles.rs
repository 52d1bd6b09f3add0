//! Registry of background tile providers.
//!
//! Each provider pairs a stable identifier with the URL template and
//! attribution a web map needs to request tiles. The registry is a constant
//! table; callers look providers up by identifier.

/// Identifier of the provider used when none is requested.
pub const DEFAULT_TILE_PROVIDER: &str = "openstreetmap";

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// A source of map background imagery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProvider {
    /// Stable identifier, e.g. `"openstreetmap"`.
    pub id: &'static str,
    /// Display name shown in layer pickers.
    pub name: &'static str,
    /// Slippy-map URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: &'static str,
    /// Attribution HTML required by the provider.
    pub attribution: &'static str,
    /// Lowest supported zoom level.
    pub min_zoom: u8,
    /// Highest supported zoom level.
    pub max_zoom: u8,
}

impl TileProvider {
    /// Whether `zoom` lies within this provider's supported range.
    #[must_use]
    pub const fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom
    }
}

/// Every registered provider, default first.
pub const TILE_PROVIDERS: [TileProvider; 5] = [
    TileProvider {
        id: DEFAULT_TILE_PROVIDER,
        name: "OpenStreetMap",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: OSM_ATTRIBUTION,
        min_zoom: 0,
        max_zoom: 19,
    },
    TileProvider {
        id: "cartodb_positron",
        name: "CartoDB Positron",
        url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; OpenStreetMap contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        min_zoom: 0,
        max_zoom: 20,
    },
    TileProvider {
        id: "cartodb_dark",
        name: "CartoDB Dark Matter",
        url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        attribution: "&copy; OpenStreetMap contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
        min_zoom: 0,
        max_zoom: 20,
    },
    TileProvider {
        id: "opentopomap",
        name: "OpenTopoMap",
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "Map data: &copy; OpenStreetMap contributors, SRTM | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (CC-BY-SA)",
        min_zoom: 0,
        max_zoom: 17,
    },
    TileProvider {
        id: "esri_worldimagery",
        name: "Esri World Imagery",
        url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "Tiles &copy; Esri",
        min_zoom: 0,
        max_zoom: 18,
    },
];

/// Look up a provider by its exact identifier.
///
/// # Examples
/// ```
/// use parkzone_core::tiles::tile_provider;
///
/// let provider = tile_provider("opentopomap").expect("registered");
/// assert_eq!(provider.max_zoom, 17);
/// assert!(tile_provider("nonexistent").is_none());
/// ```
#[must_use]
pub fn tile_provider(id: &str) -> Option<&'static TileProvider> {
    TILE_PROVIDERS.iter().find(|provider| provider.id == id)
}
