//! City detail fragments: hero, quick stats, sub-navigation and FAQ.

use crate::cards::city_image;
use crate::escape::{group_thousands, html_escape};
use crate::options::RenderOptions;
use plat_core::City;
use plat_join::{CityView, COUNT_PLACEHOLDER};

/// Element id of the sticky sub-navigation bar
pub const SUBNAV_ID: &str = "city-subnav-bar";

pub fn error_card(message: &str) -> String {
    format!(
        r#"<div class="container"><div class="card card--error">{}</div></div>"#,
        html_escape(message)
    )
}

pub fn hero(city: &City, opts: &RenderOptions) -> String {
    let name = html_escape(&city.name);
    let tagline = city
        .tagline()
        .map(|t| format!(r#"<p class="section__sub">{}</p>"#, html_escape(t)))
        .unwrap_or_default();

    format!(
        r#"<div class="container hero">
        <div class="hero__text">
            <h1>{name}</h1>
            {tagline}
        </div>
        <div class="hero__media">
            <img src="{img}" alt="{name}">
        </div>
    </div>"#,
        img = html_escape(city_image(city, opts)),
    )
}

fn stat_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="card stat"><strong>{}</strong><div class="stat__value">{}</div></div>"#,
        label,
        html_escape(value)
    )
}

/// Builders, communities, price range and (when known) population
pub fn quick_stats(view: &CityView<'_>) -> String {
    let city = view.city;
    let mut cards = vec![
        stat_card("Builders", &view.builders_count.to_string()),
        stat_card("Communities", &view.communities_count.to_string()),
        stat_card("Price Range", city.price_range().unwrap_or(COUNT_PLACEHOLDER)),
    ];
    if let Some(population) = city.population() {
        cards.push(stat_card("Population", &group_thousands(population)));
    }

    format!(
        r#"<div class="container"><div class="grid stats">{}</div></div>"#,
        cards.concat()
    )
}

/// In-page links to the city page sections
pub fn subnav() -> String {
    format!(
        r##"<nav id="{SUBNAV_ID}" class="subnav">
        <a href="#city-stats">Overview</a>
        <a href="#city-communities">Communities</a>
        <a href="#map">Map</a>
        <a href="#city-faq">FAQ</a>
    </nav>"##
    )
}

/// Fixed FAQ block; only the city name varies
pub fn faq(city: &City) -> String {
    let name = html_escape(&city.name);
    let entries = [
        (
            format!("Are there new construction homes in {}?", name),
            format!(
                "Yes. Each builder section on this page lists the communities currently planned or selling in {}.",
                name
            ),
        ),
        (
            "How current is the pricing?".to_string(),
            "Price ranges are builder-reported starting points and change often. Confirm with the sales office before you visit.".to_string(),
        ),
        (
            "Can I tour a model home?".to_string(),
            "Most communities marked Now Selling have models open daily. Open a community for hours and directions.".to_string(),
        ),
        (
            "Do builders offer incentives?".to_string(),
            "Many do, especially with a preferred lender. Incentives vary by community and by month.".to_string(),
        ),
    ];

    let items: String = entries
        .iter()
        .map(|(q, a)| {
            format!(
                r#"<details class="faq__item"><summary>{}</summary><p>{}</p></details>"#,
                q, a
            )
        })
        .collect();

    format!(
        r#"<section class="section faq">
        <div class="container">
            <h2 class="section__title">{name} FAQ</h2>
            {items}
        </div>
    </section>"#
    )
}
