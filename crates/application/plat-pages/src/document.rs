//! Rendered pages and their assembly into complete HTML documents.

use crate::include::{highlight_active_nav, inject, stamp_year};
use crate::mount::MountRegistry;
use crate::route::Route;
use plat_config::{AssetsConfig, SiteConfig};
use plat_loader::DataSource;
use plat_render::html_escape;

pub const HEADER_MOUNT: &str = "header-placeholder";
pub const FOOTER_MOUNT: &str = "footer-placeholder";

/// Output of one controller run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub title: String,
    pub mounts: MountRegistry,
    /// Inline scripts appended after the page body
    pub scripts: Vec<String>,
}

impl Page {
    pub fn new(route: Route, title: impl Into<String>, mounts: &[&str]) -> Self {
        Self {
            route,
            title: title.into(),
            mounts: MountRegistry::with_mounts(mounts),
            scripts: Vec::new(),
        }
    }

    pub fn body_class(&self) -> &'static str {
        match self.route {
            Route::Home => "page-home",
            Route::CityIndex => "page-cities",
            Route::City(_) => "page-city",
        }
    }
}

/// Header and footer slots, empty until partials are injected
pub fn chrome_template() -> MountRegistry {
    MountRegistry::with_mounts(&[HEADER_MOUNT, FOOTER_MOUNT])
}

/// Fetch both partials concurrently into a fresh chrome registry
pub async fn load_chrome(source: &dyn DataSource, assets: &AssetsConfig) -> MountRegistry {
    let mut header = chrome_template();
    let mut footer = chrome_template();
    futures::future::join(
        inject(&mut header, HEADER_MOUNT, source, &assets.header),
        inject(&mut footer, FOOTER_MOUNT, source, &assets.footer),
    )
    .await;

    if let Some(html) = footer.get(FOOTER_MOUNT) {
        header.set(FOOTER_MOUNT, html);
    }
    header
}

/// A page wrapped in the shared site chrome
#[derive(Debug, Clone)]
pub struct Document {
    page: Page,
    chrome: MountRegistry,
    site_name: String,
    stylesheet: String,
}

impl Document {
    pub fn new(page: Page, config: &SiteConfig) -> Self {
        Self {
            page,
            chrome: chrome_template(),
            site_name: config.site_name.clone(),
            stylesheet: config.assets.stylesheet.clone(),
        }
    }

    /// Use `chrome` for header and footer. The header's navigation is
    /// highlighted for this page and the footer year is set to `year`.
    pub fn with_chrome(mut self, chrome: &MountRegistry, year: i32) -> Self {
        let path = self.page.route.path();
        if let Some(header) = chrome.get(HEADER_MOUNT) {
            self.chrome.set(HEADER_MOUNT, highlight_active_nav(header, &path));
        }
        if let Some(footer) = chrome.get(FOOTER_MOUNT) {
            self.chrome.set(FOOTER_MOUNT, stamp_year(footer, year));
        }
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn title(&self) -> String {
        if self.page.title.is_empty() || self.page.title == self.site_name {
            self.site_name.clone()
        } else {
            format!("{} | {}", self.page.title, self.site_name)
        }
    }

    pub fn render(&self) -> String {
        let slot = |name: &str, content: Option<&str>| {
            format!(r#"<div id="{}">{}</div>"#, html_escape(name), content.unwrap_or(""))
        };
        let mounts: Vec<String> = self
            .page
            .mounts
            .iter()
            .map(|(name, content)| slot(name, content))
            .collect();

        format!(
            r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body class="{body_class}">
{header}
<main>
{mounts}
</main>
{footer}
{scripts}
</body>
</html>
"#,
            title = html_escape(&self.title()),
            stylesheet = html_escape(&self.stylesheet),
            body_class = self.page.body_class(),
            header = slot(HEADER_MOUNT, self.chrome.get(HEADER_MOUNT)),
            mounts = mounts.join("\n"),
            footer = slot(FOOTER_MOUNT, self.chrome.get(FOOTER_MOUNT)),
            scripts = self.page.scripts.join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat_loader::MemorySource;

    fn page() -> Page {
        let mut page = Page::new(Route::CityIndex, "Cities", &["cities-grid", "map"]);
        page.mounts.set("cities-grid", "<a>Visalia</a>");
        page.scripts.push("<script>init()</script>".into());
        page
    }

    #[test]
    fn test_render_document() {
        let html = Document::new(page(), &SiteConfig::default()).render();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Cities | Valley New Homes</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="/assets/css/styles.css">"#));
        assert!(html.contains(r#"<div id="cities-grid"><a>Visalia</a></div>"#));
        assert!(html.contains(r#"<div id="map"></div>"#));
        assert!(html.contains(r#"<div id="header-placeholder"></div>"#));
        assert!(html.contains("<script>init()</script>"));
        assert!(html.find("cities-grid").unwrap() < html.find(r#"id="map""#).unwrap());
    }

    #[tokio::test]
    async fn test_chrome_is_post_processed() {
        let source = MemorySource::new()
            .with_file(
                "/assets/partials/header.html",
                r#"<nav id="main-nav"><a href="/cities/">Cities</a></nav>"#,
            )
            .with_file(
                "/assets/partials/footer.html",
                r#"<footer><span id="year"></span></footer>"#,
            );
        let chrome = load_chrome(&source, &AssetsConfig::default()).await;
        let html = Document::new(page(), &SiteConfig::default())
            .with_chrome(&chrome, 2026)
            .render();

        assert!(html.contains(r#"<a href="/cities/" class="is-active" aria-current="page">"#));
        assert!(html.contains(r#"<span id="year">2026</span>"#));
    }

    #[tokio::test]
    async fn test_missing_partials_leave_placeholders() {
        let chrome = load_chrome(&MemorySource::new(), &AssetsConfig::default()).await;
        assert_eq!(chrome.filled(), 0);
        let html = Document::new(page(), &SiteConfig::default())
            .with_chrome(&chrome, 2026)
            .render();
        assert!(html.contains(r#"<div id="footer-placeholder"></div>"#));
    }
}
