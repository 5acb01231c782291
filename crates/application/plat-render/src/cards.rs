//! City cards, builder logos and empty-state cards.

use crate::escape::html_escape;
use crate::options::{CardStyle, RenderOptions};
use plat_core::{Builder, City};

pub const NO_CITIES: &str = "No cities available yet.";
pub const NO_COMMUNITIES: &str = "No communities listed yet.";
pub const NO_BUILDERS: &str = "No builder info yet.";
pub const CITIES_UNAVAILABLE: &str = "Failed to load cities. Please try again later.";

/// Link to a city's detail page
pub fn city_href(city: &City) -> String {
    format!("/cities/{}/", city.slug)
}

/// Card image: `thumb`, then `heroImage`, then the placeholder
pub fn city_image<'a>(city: &'a City, opts: &'a RenderOptions) -> &'a str {
    city.thumb()
        .or_else(|| city.hero_image())
        .unwrap_or(&opts.city_placeholder)
}

/// `logo`, then the placeholder
pub fn builder_logo_src<'a>(builder: &'a Builder, opts: &'a RenderOptions) -> &'a str {
    builder.logo().unwrap_or(&opts.builder_placeholder)
}

/// Single informational card for an empty collection
pub fn empty_card(message: &str) -> String {
    format!(r#"<div class="card card--empty">{}</div>"#, html_escape(message))
}

pub fn city_card(city: &City, opts: &RenderOptions, style: CardStyle) -> String {
    let name = html_escape(&city.name);
    let img = opts.image_attrs(city_image(city, opts), &opts.city_fallback);

    let details = match style {
        CardStyle::Simple => String::new(),
        CardStyle::Wide => {
            let mut out = String::new();
            if let Some(tagline) = city.tagline() {
                out.push_str(&format!(
                    r#"<p class="city-card__tagline">{}</p>"#,
                    html_escape(tagline)
                ));
            }
            if let Some(price) = city.price_range() {
                out.push_str(&format!(
                    r#"<span class="city-card__price">{}</span>"#,
                    html_escape(price)
                ));
            }
            out.push_str(&tag_list(city, opts.tag_limit));
            out
        }
    };

    format!(
        r#"<a class="city-card" href="{href}">
        <img {img} alt="{name}" loading="lazy">
        <div class="city-card__body">
            <span class="city-card__name">{name}</span>{details}
            <span class="city-card__meta">View communities →</span>
        </div>
    </a>"#,
        href = html_escape(&city_href(city)),
    )
}

/// At most `limit` tags; nothing at all when the city has none
pub fn tag_list(city: &City, limit: usize) -> String {
    let items: String = city
        .tags()
        .take(limit)
        .map(|t| format!(r#"<li class="tag">{}</li>"#, html_escape(t)))
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="tags">{}</ul>"#, items)
    }
}

/// City cards in collection order, or the empty-state card
pub fn city_grid(cities: &[&City], opts: &RenderOptions, style: CardStyle) -> String {
    if cities.is_empty() {
        return empty_card(NO_CITIES);
    }
    cities.iter().map(|c| city_card(c, opts, style)).collect()
}

pub fn builder_logo(builder: &Builder, opts: &RenderOptions) -> String {
    format!(
        r#"<div class="card builder-logo">
        <img {img} alt="{name}" loading="lazy">
    </div>"#,
        img = opts.image_attrs(builder_logo_src(builder, opts), &opts.logo_fallback),
        name = html_escape(&builder.name),
    )
}

/// Builder logos in collection order, or the empty-state card
pub fn builder_strip(builders: &[Builder], opts: &RenderOptions) -> String {
    if builders.is_empty() {
        return empty_card(NO_BUILDERS);
    }
    builders.iter().map(|b| builder_logo(b, opts)).collect()
}
