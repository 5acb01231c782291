//! Page Controllers
//!
//! One controller per page type. Each declares its mounts, renders into a
//! [`MountRegistry`] from already-loaded collections (`render_*`), and has
//! an async `run_*` twin that invokes the Data Loader first. The map is
//! rendered last and independently of the other sections.
//!
//! ```text
//! Route ─► controller ─► load ─► join ─► render ─► MountRegistry ─► Document
//! ```

pub mod cities_index;
pub mod city;
pub mod context;
pub mod document;
pub mod home;
pub mod include;
pub mod mount;
pub mod route;
pub mod site;

pub use cities_index::{render_cities_index, run_cities_index};
pub use city::{render_city, run_city, CityPageState, MISSING_SLUG, UNKNOWN_SLUG};
pub use context::PageContext;
pub use document::{chrome_template, load_chrome, Document, Page, FOOTER_MOUNT, HEADER_MOUNT};
pub use home::{render_home, run_home};
pub use include::{current_year, highlight_active_nav, inject, stamp_year};
pub use mount::MountRegistry;
pub use route::{normalize_path, Route};
pub use site::{build_site, render_page, render_target, BuildSummary};
