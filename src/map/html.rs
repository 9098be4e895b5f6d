//! Standalone Leaflet page for a [`MapDocument`].

use super::MapDocument;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<link rel="stylesheet" href="__LEAFLET_CSS__">
<script src="__LEAFLET_JS__"></script>
<style>
  body { font-family: sans-serif; margin: 2rem auto; max-width: 960px; }
  .map-panel { position: relative; }
  #map { height: __HEIGHT__px; width: 100%; }
  summary { cursor: pointer; font-weight: bold; margin: 1rem 0; }
  footer { color: #777; font-size: 12px; margin-top: 1rem; }
</style>
</head>
<body>
<h1>🌳 __TITLE__</h1>
<p>__SUBTITLE__</p>
<p><strong>__CAPTION__</strong></p>
<details open>
<summary>🗺️ Ver Mapa Interactivo</summary>
<div class="map-panel">
<div id="map"></div>
__LEGEND__</div>
</details>
<footer>Generado __GENERATED__</footer>
<script>
const layers = __LAYERS__;
const map = L.map('map').setView(__CENTER__, __ZOOM__);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
const overlays = {};
for (const layer of layers) {
  let leafletLayer;
  if (layer.kind === 'tiles') {
    leafletLayer = L.tileLayer(layer.url_template, { attribution: 'Google Earth Engine' });
  } else {
    leafletLayer = L.geoJSON(
      { type: 'Polygon', coordinates: [layer.ring] },
      { style: { color: '#3388ff', weight: 2, fill: false } }
    );
  }
  leafletLayer.addTo(map);
  overlays[layer.name] = leafletLayer;
}
L.control.layers(null, overlays, { collapsed: false }).addTo(map);
document.querySelector('details').addEventListener('toggle', () => map.invalidateSize());
</script>
</body>
</html>
"#;

/// Renders the full HTML page.
///
/// # Errors
///
/// Returns an error string if the layer list cannot be serialized.
pub fn render(doc: &MapDocument) -> Result<String, String> {
    let layers = serde_json::to_string(&doc.layers)
        .map_err(|e| format!("Failed to serialize map layers: {e}"))?;
    let center = serde_json::to_string(&doc.center)
        .map_err(|e| format!("Failed to serialize map center: {e}"))?;

    Ok(PAGE_TEMPLATE
        .replace("__LEAFLET_CSS__", LEAFLET_CSS)
        .replace("__LEAFLET_JS__", LEAFLET_JS)
        .replace("__TITLE__", &escape(&doc.title))
        .replace("__SUBTITLE__", &escape(&doc.subtitle))
        .replace("__CAPTION__", &escape(&doc.caption))
        .replace("__HEIGHT__", &doc.height.to_string())
        .replace("__LEGEND__", &doc.legend.to_html())
        .replace(
            "__GENERATED__",
            &doc.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
        .replace("__CENTER__", &center)
        .replace("__ZOOM__", &doc.zoom.to_string())
        .replace("__LAYERS__", &layers.replace("</", "<\\/")))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
