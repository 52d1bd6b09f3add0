//! HTML text helpers and the page skeleton.

use serde::Serialize;

use crate::document::LEAFLET_VERSION;

/// Escape text for inclusion in HTML element content or attribute values.
///
/// # Examples
/// ```
/// use parkzone_render::escape_html;
///
/// assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Serialise `value` as JSON that is safe to embed in a `<script>` element.
///
/// Angle brackets and ampersands only occur inside JSON strings, where their
/// `\u` escapes are equivalent, so no markup can close the script early.
pub(crate) fn script_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

const SCRIPT: &str = r"
const map = L.map('map').setView(data.center, data.zoom);
const baseLayers = {};
for (const layer of data.base_layers) {
  baseLayers[layer.name] = L.tileLayer(layer.url, {
    attribution: layer.attribution,
    minZoom: layer.min_zoom,
    maxZoom: layer.max_zoom,
  });
}
baseLayers[data.active_layer].addTo(map);
L.control.layers(baseLayers).addTo(map);
for (const line of data.polylines) {
  L.polyline(line.points, {
    color: line.color,
    weight: line.weight,
    opacity: line.opacity,
  }).bindPopup(line.popup, { maxWidth: 300 }).addTo(map);
}
if (data.marker) {
  L.marker(data.marker.location).bindPopup(data.marker.popup).addTo(map);
}
";

/// Assemble the full page around a JSON payload and optional legend markup.
pub(crate) fn page(title: &str, legend: Option<&str>, payload: &str) -> String {
    let leaflet = format!("https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet");
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"sr\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{leaflet}.css\">\n\
         <script src=\"{leaflet}.js\"></script>\n\
         <style>html, body, #map {{ height: 100%; margin: 0; }}</style>\n\
         </head>\n\
         <body>\n\
         <div id=\"map\"></div>\n\
         {legend}\
         <script>\n\
         const data = {payload};\n\
         {SCRIPT}\
         </script>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
        legend = legend.unwrap_or_default(),
    )
}
