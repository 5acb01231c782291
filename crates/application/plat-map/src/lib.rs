//! Map Adapter
//!
//! The map library is an injected capability: pages pass
//! `Option<&dyn MapProvider>`. Without a provider the adapter emits a
//! visible fallback notice; with one it emits the provider's markup for a
//! fixed center/zoom and one marker per community with usable coordinates.
//! Communities without numeric coordinates are skipped, never an error.

use plat_config::MapConfig;
use plat_core::{Community, GeoPoint};
use plat_render::{html_escape, js_string};
use serde::Serialize;

/// Element that receives the map
pub const MAP_ELEMENT_ID: &str = "map-canvas";
/// Notice shown when no map can be drawn
pub const FALLBACK_ELEMENT_ID: &str = "map-fallback";

const FALLBACK_MESSAGE: &str = "Map unavailable. Browse communities by city below.";

/// One plotted community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    /// Popup markup, already escaped
    pub popup: String,
}

/// Fixed view shared by every page
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub max_zoom: u8,
    pub scroll_wheel_zoom: bool,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl MapView {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            center: config.center,
            zoom: config.zoom,
            max_zoom: config.max_zoom,
            scroll_wheel_zoom: config.scroll_wheel_zoom,
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

/// A map-rendering capability
pub trait MapProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Markup that draws `markers` into the element `element_id`.
    /// The returned markup must reveal [`FALLBACK_ELEMENT_ID`] if the
    /// library cannot start in the browser.
    fn render(&self, element_id: &str, view: &MapView, markers: &[Marker]) -> String;
}

/// Leaflet loaded from a CDN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafletProvider {
    pub js_url: String,
    pub css_url: String,
}

impl LeafletProvider {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            js_url: config.leaflet_js.clone(),
            css_url: config.leaflet_css.clone(),
        }
    }
}

impl MapProvider for LeafletProvider {
    fn name(&self) -> &str {
        "leaflet"
    }

    fn render(&self, element_id: &str, view: &MapView, markers: &[Marker]) -> String {
        let markers_json = serde_json::to_string(markers)
            .unwrap_or_else(|_| "[]".to_string())
            .replace("</", "<\\/");

        format!(
            r#"<link rel="stylesheet" href="{css}">
<div id="{id_attr}" class="map"></div>
{fallback}
<script src="{js}"></script>
<script>
(function () {{
  var el = document.getElementById({id});
  if (!window.L || !el) {{
    var fb = document.getElementById({fallback_id});
    if (fb) fb.hidden = false;
    return;
  }}
  var map = L.map(el, {{ scrollWheelZoom: {wheel} }}).setView([{lat}, {lng}], {zoom});
  L.tileLayer({tiles}, {{ maxZoom: {max_zoom}, attribution: {attribution} }}).addTo(map);
  {markers_json}.forEach(function (m) {{
    L.marker([m.lat, m.lng]).addTo(map).bindPopup(m.popup);
  }});
}})();
</script>"#,
            css = html_escape(&self.css_url),
            js = html_escape(&self.js_url),
            id_attr = html_escape(element_id),
            id = js_string(element_id),
            fallback = fallback_notice(true),
            fallback_id = js_string(FALLBACK_ELEMENT_ID),
            wheel = view.scroll_wheel_zoom,
            lat = view.center.lat,
            lng = view.center.lng,
            zoom = view.zoom,
            tiles = js_string(&view.tile_url),
            max_zoom = view.max_zoom,
            attribution = js_string(&view.tile_attribution),
        )
    }
}

/// Fallback notice; `hidden` until something reveals it
pub fn fallback_notice(hidden: bool) -> String {
    format!(
        r#"<div id="{}" class="card map-fallback"{}>{}</div>"#,
        FALLBACK_ELEMENT_ID,
        if hidden { " hidden" } else { "" },
        FALLBACK_MESSAGE
    )
}

/// `<strong>name</strong><br>status`
pub fn popup_html(community: &Community) -> String {
    format!(
        "<strong>{}</strong><br>{}",
        html_escape(&community.name),
        html_escape(community.status().unwrap_or(""))
    )
}

/// Markers for every community with both coordinates, in input order
pub fn markers_from<'a, I>(communities: I) -> Vec<Marker>
where
    I: IntoIterator<Item = &'a Community>,
{
    communities
        .into_iter()
        .filter_map(|c| {
            c.position().map(|p| Marker {
                lat: p.lat,
                lng: p.lng,
                popup: popup_html(c),
            })
        })
        .collect()
}

/// Result of [`render_map`]
#[derive(Debug, Clone, PartialEq)]
pub struct MapOutput {
    pub html: String,
    pub plotted: usize,
    pub skipped: usize,
    /// Name of the provider used, `None` when the fallback was shown
    pub provider: Option<String>,
}

impl MapOutput {
    pub fn is_fallback(&self) -> bool {
        self.provider.is_none()
    }
}

/// Render the map for `source`, or the fallback notice without a provider.
pub fn render_map<'a, I>(provider: Option<&dyn MapProvider>, view: &MapView, source: I) -> MapOutput
where
    I: IntoIterator<Item = &'a Community>,
{
    let source: Vec<&Community> = source.into_iter().collect();
    let markers = markers_from(source.iter().copied());
    let skipped = source.len() - markers.len();

    match provider {
        None => {
            tracing::debug!("No map provider, showing fallback");
            MapOutput {
                html: fallback_notice(false),
                plotted: 0,
                skipped: source.len(),
                provider: None,
            }
        }
        Some(provider) => {
            if skipped > 0 {
                tracing::debug!("Skipped {} communities without coordinates", skipped);
            }
            MapOutput {
                html: provider.render(MAP_ELEMENT_ID, view, &markers),
                plotted: markers.len(),
                skipped,
                provider: Some(provider.name().to_string()),
            }
        }
    }
}
