//! Shared inputs of every controller run.

use plat_config::SiteConfig;
use plat_core::Community;
use plat_loader::{load_collections, DataSource, LoadReport};
use plat_map::{render_map, MapOutput, MapProvider, MapView};
use plat_render::RenderOptions;

/// Configuration, render options and the optional map capability
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub map: Option<&'a dyn MapProvider>,
    options: RenderOptions,
    map_view: MapView,
}

impl<'a> PageContext<'a> {
    pub fn new(config: &'a SiteConfig, map: Option<&'a dyn MapProvider>) -> Self {
        Self {
            config,
            map,
            options: RenderOptions::from_config(config),
            map_view: MapView::from_config(&config.map),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn map_view(&self) -> &MapView {
        &self.map_view
    }

    /// Map markup for `communities`, or the fallback without a provider
    pub fn render_map<'c, I>(&self, communities: I) -> MapOutput
    where
        I: IntoIterator<Item = &'c Community>,
    {
        render_map(self.map, &self.map_view, communities)
    }

    /// Run the Data Loader against the configured collection paths
    pub async fn load(&self, source: &dyn DataSource) -> LoadReport {
        load_collections(source, &self.config.data).await
    }
}
