//! Shared header/footer partials and their post-processing.

use crate::mount::MountRegistry;
use chrono::Datelike;
use lazy_static::lazy_static;
use plat_loader::DataSource;
use regex::{Captures, Regex};

lazy_static! {
    static ref MAIN_NAV: Regex =
        Regex::new(r#"<([a-zA-Z][a-zA-Z0-9]*)\b[^>]*\bid\s*=\s*"main-nav"[^>]*>"#).unwrap();
    static ref ANCHOR: Regex = Regex::new(r#"<a\b[^>]*>"#).unwrap();
    static ref HREF: Regex = Regex::new(r#"\bhref\s*=\s*"([^"]*)""#).unwrap();
    static ref CLASS: Regex = Regex::new(r#"\bclass\s*=\s*"([^"]*)""#).unwrap();
    static ref YEAR: Regex =
        Regex::new(r#"(<[a-zA-Z][a-zA-Z0-9]*\b[^>]*\bid\s*=\s*"year"[^>]*>)[^<]*"#).unwrap();
}

/// Fetch the fragment at `path` into `mount`.
///
/// A failed fetch is logged and leaves the slot as it was.
pub async fn inject(
    registry: &mut MountRegistry,
    mount: &str,
    source: &dyn DataSource,
    path: &str,
) -> bool {
    if !registry.is_declared(mount) {
        tracing::debug!("Include target {} not declared, skipping {}", mount, path);
        return false;
    }
    match source.fetch_text(path).await {
        Ok(html) => registry.set(mount, html),
        Err(e) => {
            tracing::warn!("Include failed for {}: {}", path, e);
            false
        }
    }
}

/// Byte range between the `#main-nav` opening tag and its closing tag
fn nav_region(html: &str) -> Option<(usize, usize)> {
    let caps = MAIN_NAV.captures(html)?;
    let open = caps.get(0)?;
    let close = format!("</{}>", caps.get(1)?.as_str());
    let end = html[open.end()..]
        .find(&close)
        .map(|i| open.end() + i)
        .unwrap_or(html.len());
    Some((open.end(), end))
}

fn mark_active(tag: &str, current_path: &str) -> String {
    let matches = HREF
        .captures(tag)
        .and_then(|c| c.get(1))
        .is_some_and(|href| href.as_str() == current_path);
    if !matches || tag.contains("aria-current") {
        return tag.to_string();
    }

    let tag = match CLASS.captures(tag).and_then(|c| c.get(1)) {
        Some(class) if class.as_str().split_whitespace().any(|c| c == "is-active") => {
            tag.to_string()
        }
        Some(class) => {
            let joined = if class.as_str().trim().is_empty() {
                "is-active".to_string()
            } else {
                format!("{} is-active", class.as_str())
            };
            format!("{}{}{}", &tag[..class.start()], joined, &tag[class.end()..])
        }
        None => format!(r#"{} class="is-active">"#, tag.trim_end_matches('>')),
    };
    format!(r#"{} aria-current="page">"#, tag.trim_end_matches('>'))
}

/// Mark `#main-nav` links whose `href` equals `current_path` as active
pub fn highlight_active_nav(html: &str, current_path: &str) -> String {
    let Some((start, end)) = nav_region(html) else {
        return html.to_string();
    };
    let nav = ANCHOR.replace_all(&html[start..end], |caps: &Captures| {
        mark_active(&caps[0], current_path)
    });
    format!("{}{}{}", &html[..start], nav, &html[end..])
}

/// Replace the text of the `id="year"` element with `year`
pub fn stamp_year(html: &str, year: i32) -> String {
    YEAR.replace(html, |caps: &Captures| format!("{}{}", &caps[1], year))
        .into_owned()
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
