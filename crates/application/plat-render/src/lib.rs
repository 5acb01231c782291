//! Card / Section Renderer
//!
//! Pure functions from view-models to HTML fragments. Nothing here touches
//! the filesystem or a mount point; callers decide where fragments go.
//!
//! Fallback policy in one place:
//!
//! - city images: `thumb` → `heroImage` → configured placeholder
//! - builder logos: `logo` → configured placeholder
//! - optional text (`tagline`, `status`, `tags`, `priceRange`) renders no
//!   wrapper when absent
//! - empty collections render a single informational card

pub mod cards;
pub mod city;
pub mod escape;
pub mod options;
pub mod scripts;
pub mod sections;

pub use cards::{
    builder_logo, builder_strip, city_card, city_grid, city_href, city_image, empty_card, tag_list,
    CITIES_UNAVAILABLE, NO_BUILDERS, NO_CITIES, NO_COMMUNITIES,
};
pub use city::{error_card, faq, hero, quick_stats, subnav, SUBNAV_ID};
pub use escape::html_escape;
pub use options::{CardStyle, ImageMode, RenderOptions};
pub use scripts::{image_fallback_script, js_string, sticky_script};
pub use sections::{builder_section, community_href, community_row, community_sections};
