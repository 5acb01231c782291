//! City detail page.
//!
//! One controller serves every city. The slug comes from the route; the
//! page moves from `Loading` to exactly one terminal state.

use crate::context::PageContext;
use crate::document::Page;
use crate::route::Route;
use plat_core::{Collections, Error};
use plat_join::{city_view, CityView};
use plat_loader::DataSource;
use plat_render::{
    community_sections, error_card, faq, hero, quick_stats, sticky_script, subnav, SUBNAV_ID,
};

pub const CITY_ROOT: &str = "city-root";
pub const CITY_HERO: &str = "city-hero";
pub const CITY_SUBNAV: &str = "city-subnav";
pub const CITY_STATS: &str = "city-stats";
pub const CITY_COMMUNITIES: &str = "city-communities";
pub const CITY_FAQ: &str = "city-faq";
pub const MAP: &str = "map";

pub const MOUNTS: [&str; 7] = [
    CITY_ROOT,
    CITY_HERO,
    CITY_SUBNAV,
    CITY_STATS,
    CITY_COMMUNITIES,
    CITY_FAQ,
    MAP,
];

pub const MISSING_SLUG: &str = "City not found.";
pub const UNKNOWN_SLUG: &str = "City not found in data.";

#[derive(Debug, Clone)]
pub enum CityPageState<'a> {
    Loading,
    NotFound(String),
    Ready(CityView<'a>),
}

impl<'a> CityPageState<'a> {
    /// Resolve a loading page against the loaded collections. Terminal
    /// states are returned unchanged.
    pub fn advance(self, slug: Option<&str>, collections: &'a Collections) -> Self {
        match self {
            CityPageState::Loading => match slug {
                None => {
                    tracing::warn!("City slug not found in path or query");
                    CityPageState::NotFound(MISSING_SLUG.to_string())
                }
                Some(slug) => match city_view(collections, slug) {
                    Ok(view) => CityPageState::Ready(view),
                    Err(Error::NotFound(_)) => {
                        tracing::warn!("No city with slug {}", slug);
                        CityPageState::NotFound(UNKNOWN_SLUG.to_string())
                    }
                    Err(e) => CityPageState::NotFound(e.to_string()),
                },
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, CityPageState::Loading)
    }
}

pub fn render_city(ctx: &PageContext<'_>, slug: Option<&str>, collections: &Collections) -> Page {
    let route = Route::City(slug.map(str::to_string));

    match CityPageState::Loading.advance(slug, collections) {
        CityPageState::Ready(view) => {
            let mut page = Page::new(route, view.city.name.clone(), &MOUNTS);
            let opts = ctx.options();

            page.mounts.set(CITY_HERO, hero(view.city, opts));
            page.mounts.set(CITY_SUBNAV, subnav());
            page.mounts.set(CITY_STATS, quick_stats(&view));
            page.mounts.set(CITY_COMMUNITIES, community_sections(&view.groups));
            page.mounts.set(CITY_FAQ, faq(view.city));
            page.scripts.push(sticky_script(SUBNAV_ID));

            let map = ctx.render_map(view.communities.iter().copied());
            page.mounts.set(MAP, map.html);
            tracing::debug!(
                "City {} rendered: {} communities, {} builder groups, {} markers",
                view.city.slug,
                view.communities.len(),
                view.groups.len(),
                map.plotted
            );
            page
        }
        CityPageState::NotFound(message) => {
            let mut page = Page::new(route, "City not found", &MOUNTS);
            page.mounts.set(CITY_ROOT, error_card(&message));
            page
        }
        CityPageState::Loading => Page::new(route, "", &MOUNTS),
    }
}

pub async fn run_city(ctx: &PageContext<'_>, source: &dyn DataSource, slug: Option<&str>) -> Page {
    let report = ctx.load(source).await;
    render_city(ctx, slug, &report.collections)
}
