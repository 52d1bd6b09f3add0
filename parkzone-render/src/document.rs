//! The map document: layers collected in memory, then rendered or saved.

use camino::Utf8Path;
use geo::Coord;
use log::info;
use parkzone_core::tiles::TILE_PROVIDERS;
use parkzone_core::{TileProvider, Zone, ZoneGeometryCollection};
use serde::Serialize;

use crate::RenderError;
use crate::html::{escape_html, page, script_json};

/// Leaflet release loaded by rendered pages.
pub const LEAFLET_VERSION: &str = "1.9.4";

/// Stroke width of zone polylines in pixels.
pub const POLYLINE_WEIGHT: u8 = 5;

/// Stroke opacity of zone polylines.
pub const POLYLINE_OPACITY: f64 = 0.8;

const PAGE_TITLE: &str = "Паркинг зоне";
const LEGEND_TITLE: &str = "Легенда (Зоне)";

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Polyline {
    points: [[f64; 2]; 2],
    color: &'static str,
    weight: u8,
    opacity: f64,
    popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Marker {
    location: [f64; 2],
    popup: String,
}

#[derive(Serialize)]
struct BaseLayer {
    name: &'static str,
    url: &'static str,
    attribution: &'static str,
    min_zoom: u8,
    max_zoom: u8,
}

impl From<&'static TileProvider> for BaseLayer {
    fn from(provider: &'static TileProvider) -> Self {
        Self {
            name: provider.name,
            url: provider.url_template,
            attribution: provider.attribution,
            min_zoom: provider.min_zoom,
            max_zoom: provider.max_zoom,
        }
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    center: [f64; 2],
    zoom: u8,
    active_layer: &'static str,
    base_layers: Vec<BaseLayer>,
    polylines: &'a [Polyline],
    marker: Option<&'a Marker>,
}

/// An interactive map under construction.
///
/// Coordinates are accepted as `geo` coordinates (`x = longitude`,
/// `y = latitude`) and emitted in Leaflet's `[lat, lon]` order.
///
/// # Examples
/// ```
/// use parkzone_core::tiles::tile_provider;
/// use parkzone_render::MapDocument;
/// use geo::Coord;
///
/// let tiles = tile_provider("openstreetmap").expect("registered");
/// let mut map = MapDocument::new(Coord { x: 20.39373, y: 45.38096 }, 14, tiles);
/// map.add_legend();
/// map.add_marker(Coord { x: 20.39373, y: 45.38096 }, "Центар");
///
/// let html = map.render()?;
/// assert!(html.contains("Црвена зона"));
/// # Ok::<(), parkzone_render::RenderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MapDocument {
    center: Coord<f64>,
    zoom: u8,
    tile_provider: &'static TileProvider,
    polylines: Vec<Polyline>,
    legend: bool,
    marker: Option<Marker>,
}

impl MapDocument {
    /// Start an empty map centred on `center` at `zoom` over `tile_provider`.
    #[must_use]
    pub const fn new(center: Coord<f64>, zoom: u8, tile_provider: &'static TileProvider) -> Self {
        Self {
            center,
            zoom,
            tile_provider,
            polylines: Vec::new(),
            legend: false,
            marker: None,
        }
    }

    /// Draw every segment in `geometries` in its zone's colour.
    ///
    /// Each polyline carries a popup naming the street and its zone.
    pub fn add_zone_polylines(&mut self, geometries: &ZoneGeometryCollection) {
        for (&zone, segments) in geometries {
            self.polylines.extend(segments.iter().map(|segment| {
                let [start, end] = segment.points;
                Polyline {
                    points: [lat_lon(start), lat_lon(end)],
                    color: zone.colour(),
                    weight: POLYLINE_WEIGHT,
                    opacity: POLYLINE_OPACITY,
                    popup: segment_popup(&segment.street_name, zone),
                }
            }));
        }
    }

    /// Show the colour legend for all zones.
    pub const fn add_legend(&mut self) {
        self.legend = true;
    }

    /// Place a marker at `location` with a popup reading `label`.
    ///
    /// A later call replaces the earlier marker.
    pub fn add_marker(&mut self, location: Coord<f64>, label: &str) {
        self.marker = Some(Marker {
            location: lat_lon(location),
            popup: escape_html(label),
        });
    }

    /// Number of polylines drawn so far.
    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }

    /// Render the standalone HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Payload`] if the map data cannot be serialised.
    pub fn render(&self) -> Result<String, RenderError> {
        let payload = Payload {
            center: lat_lon(self.center),
            zoom: self.zoom,
            active_layer: self.tile_provider.name,
            base_layers: TILE_PROVIDERS.iter().map(BaseLayer::from).collect(),
            polylines: &self.polylines,
            marker: self.marker.as_ref(),
        };
        let json = script_json(&payload)?;
        let legend = self.legend.then(legend_html);
        Ok(page(PAGE_TITLE, legend.as_deref(), &json))
    }

    /// Render the page and write it to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Write`] if the file cannot be written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), RenderError> {
        let html = self.render()?;
        parkzone_fs::write_utf8_file(path, &html).map_err(|source| RenderError::Write {
            path: path.to_owned(),
            source,
        })?;
        info!("Map successfully saved to {path}");
        Ok(())
    }
}

const fn lat_lon(coord: Coord<f64>) -> [f64; 2] {
    [coord.y, coord.x]
}

fn segment_popup(street_name: &str, zone: Zone) -> String {
    format!("Улица: {}<br>Зона: {}", escape_html(street_name), zone.title())
}

fn legend_html() -> String {
    let mut html = String::from(
        "<div id=\"legend\" style=\"position: fixed; top: 50px; right: 50px; \
         width: 180px; z-index: 9999; font-size: 14px; padding: 6px; \
         border: 2px solid grey; background-color: white; opacity: 0.9;\">\n",
    );
    html.push_str(&format!("<b>{LEGEND_TITLE}</b><br>\n"));
    for zone in Zone::ALL {
        html.push_str(&format!(
            "<span style=\"display: inline-block; width: 12px; height: 12px; \
             background-color: {colour};\"></span> {label}<br>\n",
            colour = zone.colour(),
            label = zone.legend_label(),
        ));
    }
    html.push_str("</div>\n");
    html
}
