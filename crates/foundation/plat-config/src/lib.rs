//! Site configuration
//!
//! Placeholder images, the map view and data file paths live here and are
//! passed into the renderers and the map adapter explicitly.
//!
//! Lookup order for [`SiteConfig::load`]:
//!
//! 1. an explicit path (the `--config` flag)
//! 2. `./plat.yaml`
//! 3. `<config_dir>/plat/site.yaml`
//! 4. built-in defaults
//!
//! Environment overrides (`PLAT_DATA_DIR`, `PLAT_DATA_URL`, `PLAT_OUT_DIR`)
//! are applied on top.

use base64::Engine;
use plat_core::{CollectionKind, Error, GeoPoint, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = "plat.yaml";

const CITY_FALLBACK_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='320' height='200'>\
<rect width='100%' height='100%' fill='#0f1117'/>\
<text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
fill='#9aa3af' font-family='sans-serif' font-size='14'>No image</text></svg>";

const LOGO_FALLBACK_SVG: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='220' height='60'>\
<rect width='100%' height='100%' fill='#0f1117'/>\
<text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' \
fill='#9aa3af' font-family='sans-serif' font-size='12'>No logo</text></svg>";

/// Encode an SVG document as a `data:` URL
pub fn svg_data_url(svg: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    format!("data:image/svg+xml;base64,{}", encoded)
}

/// Top-level site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub data: DataConfig,
    pub assets: AssetsConfig,
    pub images: ImageConfig,
    pub map: MapConfig,
    pub layout: LayoutConfig,
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Valley New Homes".to_string(),
            data: DataConfig::default(),
            assets: AssetsConfig::default(),
            images: ImageConfig::default(),
            map: MapConfig::default(),
            layout: LayoutConfig::default(),
            output_dir: PathBuf::from("dist"),
        }
    }
}

/// Where the three collections come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Site root on disk; collection paths are resolved below it
    pub dir: PathBuf,
    /// HTTP base URL; takes precedence over `dir` when set
    pub base_url: Option<String>,
    pub cities: String,
    pub builders: String,
    pub communities: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            base_url: None,
            cities: CollectionKind::Cities.default_path().to_string(),
            builders: CollectionKind::Builders.default_path().to_string(),
            communities: CollectionKind::Communities.default_path().to_string(),
        }
    }
}

impl DataConfig {
    pub fn path(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Cities => &self.cities,
            CollectionKind::Builders => &self.builders,
            CollectionKind::Communities => &self.communities,
        }
    }

    pub fn source(&self) -> DataLocation {
        match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => DataLocation::Http(url.to_string()),
            _ => DataLocation::Dir(self.dir.clone()),
        }
    }
}

/// Resolved data location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Dir(PathBuf),
    Http(String),
}

/// Static assets: partials and stylesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Site root the partial paths are resolved against
    pub dir: PathBuf,
    pub header: String,
    pub footer: String,
    pub stylesheet: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            header: "/assets/partials/header.html".to_string(),
            footer: "/assets/partials/footer.html".to_string(),
            stylesheet: "/assets/css/styles.css".to_string(),
        }
    }
}

/// Placeholder images
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub city_placeholder: String,
    pub builder_placeholder: String,
    /// Swapped in by the browser when a deferred city image fails to load
    pub city_fallback: String,
    /// Swapped in by the browser when a deferred logo fails to load
    pub logo_fallback: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            city_placeholder: "/assets/images/cities/placeholder.webp".to_string(),
            builder_placeholder: "/assets/images/builders/placeholder.webp".to_string(),
            city_fallback: svg_data_url(CITY_FALLBACK_SVG),
            logo_fallback: svg_data_url(LOGO_FALLBACK_SVG),
        }
    }
}

/// Map view shared by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub enabled: bool,
    pub center: GeoPoint,
    pub zoom: u8,
    pub max_zoom: u8,
    pub scroll_wheel_zoom: bool,
    pub tile_url: String,
    pub tile_attribution: String,
    pub leaflet_js: String,
    pub leaflet_css: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            center: GeoPoint {
                lat: 36.21,
                lng: -119.34,
            },
            zoom: 10,
            max_zoom: 19,
            scroll_wheel_zoom: false,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap contributors".to_string(),
            leaflet_js: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js".to_string(),
            leaflet_css: "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css".to_string(),
        }
    }
}

/// List sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Home page city/builder strips show at most this many entries
    pub strip_limit: usize,
    /// Tags shown per city card
    pub tag_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strip_limit: 6,
            tag_limit: 5,
        }
    }
}

impl SiteConfig {
    /// Load configuration following the documented lookup order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded config from {}", path.display());
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// First existing config file in the lookup order
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("plat").join("site.yaml"))
            .filter(|path| path.is_file())
    }

    /// Apply `PLAT_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("PLAT_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("PLAT_DATA_URL") {
            self.data.base_url = Some(url);
        }
        if let Some(out) = lookup("PLAT_OUT_DIR") {
            self.output_dir = PathBuf::from(out);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.layout.strip_limit == 0 {
            return Err(Error::Config("layout.strip_limit must be at least 1".into()));
        }
        if self.map.zoom > self.map.max_zoom {
            return Err(Error::Config(format!(
                "map.zoom {} exceeds map.max_zoom {}",
                self.map.zoom, self.map.max_zoom
            )));
        }
        if !self.map.center.lat.is_finite() || !self.map.center.lng.is_finite() {
            return Err(Error::Config("map.center must be finite".into()));
        }
        for kind in CollectionKind::ALL {
            if self.data.path(kind).trim().is_empty() {
                return Err(Error::Config(format!("data.{} path is empty", kind.key())));
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}
