//! City index page: every city as a simple card.

use crate::context::PageContext;
use crate::document::Page;
use crate::route::Route;
use plat_core::{CollectionKind, Collections};
use plat_join::city_index_view;
use plat_loader::{DataSource, LoadReport};
use plat_render::{city_grid, empty_card, CardStyle, ImageMode, CITIES_UNAVAILABLE};

pub const CITIES_GRID: &str = "cities-grid";

pub const MOUNTS: [&str; 1] = [CITIES_GRID];

/// Render from a load report. A cities collection that failed to load gets
/// the failure card instead of the empty-state card.
pub fn render_cities_index(ctx: &PageContext<'_>, report: &LoadReport) -> Page {
    if report.is_degraded(CollectionKind::Cities) {
        tracing::warn!("Cities unavailable, rendering the failure card");
        let mut page = Page::new(Route::CityIndex, "Cities", &MOUNTS);
        page.mounts.set(CITIES_GRID, empty_card(CITIES_UNAVAILABLE));
        return page;
    }
    render_city_grid(ctx, &report.collections)
}

fn render_city_grid(ctx: &PageContext<'_>, collections: &Collections) -> Page {
    let view = city_index_view(collections);
    let opts = ctx.options().clone().with_image_mode(ImageMode::Eager);

    let mut page = Page::new(Route::CityIndex, "Cities", &MOUNTS);
    page.mounts.set(CITIES_GRID, city_grid(&view.cities, &opts, CardStyle::Simple));
    page
}

pub async fn run_cities_index(ctx: &PageContext<'_>, source: &dyn DataSource) -> Page {
    let report = ctx.load(source).await;
    render_cities_index(ctx, &report)
}
