//! Relational Join Engine
//!
//! Resolves `cityId`/`builderId` references, groups communities per
//! builder and derives the city statistics. Everything here is pure and
//! synchronous; the loader has already finished by the time a view is built.

pub mod diagnose;
pub mod join;
pub mod views;

pub use diagnose::{diagnose, is_url_safe_slug, Diagnostic};
pub use join::{
    builder_name, communities_for_city, derive_count, find_city, group_by_builder, page_cities,
    BuilderGroup, Count, COUNT_PLACEHOLDER, UNKNOWN_BUILDER,
};
pub use views::{city_index_view, city_view, home_view, CityIndexView, CityView, HomeView};
