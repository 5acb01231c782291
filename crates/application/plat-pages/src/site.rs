//! Static site build: every page type rendered once per run and written
//! under the output directory.

use crate::cities_index::render_cities_index;
use crate::city::render_city;
use crate::context::PageContext;
use crate::document::{load_chrome, Document, Page};
use crate::home::render_home;
use crate::include::current_year;
use crate::route::Route;
use plat_core::{Collections, Result};
use plat_join::{diagnose, page_cities};
use plat_loader::{DataSource, LoadReport};
use std::path::{Path, PathBuf};

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub out_dir: PathBuf,
    /// Written files, relative to `out_dir`
    pub pages: Vec<PathBuf>,
    /// City slugs that got no page
    pub skipped: Vec<String>,
    /// Collections that loaded empty because of a failure
    pub degraded: Vec<String>,
    /// Records dropped from otherwise loaded collections
    pub rejected: Vec<String>,
    pub warnings: usize,
}

impl BuildSummary {
    pub fn city_pages(&self) -> usize {
        self.pages.len().saturating_sub(2)
    }
}

/// Dispatch `route` to its controller
pub fn render_page(ctx: &PageContext<'_>, route: &Route, report: &LoadReport) -> Page {
    let collections = &report.collections;
    match route {
        Route::Home => render_home(ctx, collections),
        Route::CityIndex => render_cities_index(ctx, report),
        Route::City(slug) => render_city(ctx, slug.as_deref(), collections),
    }
}

/// Render the single document addressed by `target` (path plus optional
/// query string).
pub async fn render_target(
    ctx: &PageContext<'_>,
    data: &dyn DataSource,
    assets: &dyn DataSource,
    target: &str,
) -> Result<String> {
    let route = Route::from_target(target)?;
    let (report, chrome) = futures::future::join(
        ctx.load(data),
        load_chrome(assets, &ctx.config.assets),
    )
    .await;
    let page = render_page(ctx, &route, &report);
    Ok(Document::new(page, ctx.config)
        .with_chrome(&chrome, current_year())
        .render())
}

/// Routes of every page the collections call for. Unsafe and repeated
/// slugs are returned separately; the city grids leave those cities out
/// through the same split.
fn site_routes(collections: &Collections) -> (Vec<Route>, Vec<String>) {
    let (pages, skipped) = page_cities(&collections.cities);
    let routes = [Route::Home, Route::CityIndex]
        .into_iter()
        .chain(pages.iter().map(|c| Route::City(Some(c.slug.clone()))))
        .collect();
    (routes, skipped.iter().map(|c| c.slug.clone()).collect())
}

async fn write_page(out_dir: &Path, relative: &Path, html: &str) -> Result<()> {
    let file = out_dir.join(relative);
    if let Some(parent) = file.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&file, html).await?;
    tracing::debug!("Wrote {}", file.display());
    Ok(())
}

/// Load the collections once, render every page and write them under
/// `out_dir`.
pub async fn build_site(
    ctx: &PageContext<'_>,
    data: &dyn DataSource,
    assets: &dyn DataSource,
    out_dir: &Path,
) -> Result<BuildSummary> {
    let (report, chrome) = futures::future::join(
        ctx.load(data),
        load_chrome(assets, &ctx.config.assets),
    )
    .await;
    let collections = &report.collections;

    let diagnostics = diagnose(collections);
    for diagnostic in diagnostics.iter().filter(|d| !d.is_error()) {
        tracing::debug!("{}", diagnostic);
    }

    let (routes, skipped) = site_routes(collections);
    for slug in &skipped {
        tracing::warn!("No page for city slug '{}'", slug);
    }

    let year = current_year();
    let mut summary = BuildSummary {
        out_dir: out_dir.to_path_buf(),
        skipped,
        degraded: report.failures.iter().map(|e| e.to_string()).collect(),
        rejected: report.rejected.iter().map(|e| e.to_string()).collect(),
        warnings: diagnostics.len(),
        ..BuildSummary::default()
    };

    for route in &routes {
        let Some(relative) = route.output_file() else {
            continue;
        };
        let page = render_page(ctx, route, &report);
        let html = Document::new(page, ctx.config).with_chrome(&chrome, year).render();
        write_page(out_dir, &relative, &html).await?;
        summary.pages.push(relative);
    }

    tracing::info!(
        "Built {} pages ({} cities) into {}",
        summary.pages.len(),
        summary.city_pages(),
        out_dir.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat_config::SiteConfig;
    use plat_loader::MemorySource;
    use serde_json::json;

    fn data() -> MemorySource {
        MemorySource::new()
            .with_file(
                "/data/cities.json",
                json!({ "cities": [
                    { "id": 1, "slug": "visalia", "name": "Visalia" },
                    { "id": 2, "slug": "tulare", "name": "Tulare" },
                    { "id": 3, "slug": "visalia", "name": "Visalia Again" },
                    { "id": 4, "slug": "../etc", "name": "Bad" }
                ]})
                .to_string(),
            )
            .with_file("/data/builders.json", json!({ "builders": [] }).to_string())
    }

    fn assets() -> MemorySource {
        MemorySource::new()
            .with_file(
                "/assets/partials/header.html",
                r#"<nav id="main-nav"><a href="/">Home</a><a href="/cities/">Cities</a></nav>"#,
            )
            .with_file(
                "/assets/partials/footer.html",
                r#"<footer><span id="year"></span></footer>"#,
            )
    }

    #[test]
    fn test_site_routes_skip_bad_slugs() {
        let collections = Collections {
            cities: vec![
                plat_core::City::new(1, "visalia", "Visalia"),
                plat_core::City::new(2, "Visalia Town", "Visalia"),
                plat_core::City::new(3, "visalia", "Dup"),
            ],
            ..Collections::default()
        };
        let (routes, skipped) = site_routes(&collections);
        assert_eq!(routes.len(), 3);
        assert_eq!(skipped, vec!["Visalia Town".to_string(), "visalia".to_string()]);
    }

    #[tokio::test]
    async fn test_build_writes_pages() {
        let out = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let ctx = PageContext::new(&config, None);

        let summary = build_site(&ctx, &data(), &assets(), out.path()).await.unwrap();

        assert_eq!(summary.pages.len(), 4);
        assert_eq!(summary.city_pages(), 2);
        assert_eq!(summary.skipped.len(), 2);
        assert_eq!(summary.degraded.len(), 1);

        let home = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains(r#"<a href="/" class="is-active" aria-current="page">Home</a>"#));
        assert!(home.contains(r#"<a href="/cities/">Cities</a>"#));

        let index = std::fs::read_to_string(out.path().join("cities/index.html")).unwrap();
        assert!(index.contains(r#"<a href="/cities/" class="is-active" aria-current="page">"#));

        let city = std::fs::read_to_string(out.path().join("cities/tulare/index.html")).unwrap();
        assert!(city.contains("<title>Tulare | Valley New Homes</title>"));
        assert!(city.contains("No communities listed yet."));
        assert!(!out.path().join("etc").exists());
    }

    #[tokio::test]
    async fn test_build_links_only_to_written_pages() {
        let out = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let ctx = PageContext::new(&config, None);

        let summary = build_site(&ctx, &data(), &assets(), out.path()).await.unwrap();

        for file in ["index.html", "cities/index.html"] {
            let html = std::fs::read_to_string(out.path().join(file)).unwrap();
            assert!(html.contains(r#"href="/cities/tulare/""#));
            assert!(!html.contains("../etc"), "{} links a skipped city", file);
            assert!(!html.contains("Visalia Again"), "{} links a skipped city", file);
            assert_eq!(html.matches(r#"href="/cities/visalia/""#).count(), 1);
        }
        assert!(summary
            .pages
            .contains(&PathBuf::from("cities/visalia/index.html")));
    }

    #[tokio::test]
    async fn test_build_survives_bad_record() {
        let out = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let ctx = PageContext::new(&config, None);
        let data = MemorySource::new().with_file(
            "/data/cities.json",
            json!({ "cities": [
                { "id": 1, "slug": "visalia", "name": "Visalia" },
                { "id": 2, "slug": "tulare", "name": "Tulare", "tags": null },
                { "id": 3, "slug": "exeter", "name": ["Exeter"] }
            ]})
            .to_string(),
        );

        let summary = build_site(&ctx, &data, &assets(), out.path()).await.unwrap();

        assert_eq!(summary.city_pages(), 2);
        assert_eq!(summary.rejected.len(), 1);
        assert!(!summary.degraded.iter().any(|d| d.contains("cities")));
        let visalia =
            std::fs::read_to_string(out.path().join("cities/visalia/index.html")).unwrap();
        assert!(visalia.contains("<title>Visalia | Valley New Homes</title>"));
        assert!(out.path().join("cities/tulare/index.html").exists());
    }

    #[tokio::test]
    async fn test_render_target() {
        let config = SiteConfig::default();
        let ctx = PageContext::new(&config, None);

        let html = render_target(&ctx, &data(), &assets(), "/cities/?slug=fresno")
            .await
            .unwrap();
        assert!(html.contains("City not found in data."));

        let html = render_target(&ctx, &data(), &assets(), "/city.html").await.unwrap();
        assert!(html.contains("City not found."));

        assert!(render_target(&ctx, &data(), &assets(), "/about.html").await.is_err());
    }
}
