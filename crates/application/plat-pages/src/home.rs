//! Home page: city strip, builder logos and the all-communities map.

use crate::context::PageContext;
use crate::document::Page;
use crate::route::Route;
use plat_core::Collections;
use plat_join::home_view;
use plat_loader::DataSource;
use plat_render::{builder_strip, city_grid, image_fallback_script, CardStyle, ImageMode};

pub const CITIES_GRID: &str = "cities-grid";
pub const BUILDER_LOGOS: &str = "builder-logos";
pub const MAP: &str = "map";

pub const MOUNTS: [&str; 3] = [CITIES_GRID, BUILDER_LOGOS, MAP];

pub fn render_home(ctx: &PageContext<'_>, collections: &Collections) -> Page {
    let view = home_view(collections, ctx.config.layout.strip_limit);
    let opts = ctx.options().clone().with_image_mode(ImageMode::Deferred);

    let mut page = Page::new(Route::Home, ctx.config.site_name.clone(), &MOUNTS);
    page.mounts.set(CITIES_GRID, city_grid(&view.cities, &opts, CardStyle::Wide));
    page.mounts.set(BUILDER_LOGOS, builder_strip(view.builders, &opts));
    page.scripts.push(image_fallback_script().to_string());

    let map = ctx.render_map(view.markers);
    page.mounts.set(MAP, map.html);
    tracing::debug!(
        "Home rendered: {} cities, {} builders, {} markers",
        view.cities.len(),
        view.builders.len(),
        map.plotted
    );
    page
}

pub async fn run_home(ctx: &PageContext<'_>, source: &dyn DataSource) -> Page {
    let report = ctx.load(source).await;
    render_home(ctx, &report.collections)
}
