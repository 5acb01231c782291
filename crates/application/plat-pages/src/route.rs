//! Page routing from a site path and query string.

use plat_core::{Error, Result};
use std::path::PathBuf;
use url::form_urlencoded;

/// Page type addressed by a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CityIndex,
    /// City detail; `None` when neither the path nor the query names a city
    City(Option<String>),
}

/// Map a trailing `index.html` to its directory, always with a leading `/`
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let mut out = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    if out.ends_with("/index.html") {
        out.truncate(out.len() - "index.html".len());
    }
    out
}

fn query_slug(query: Option<&str>) -> Option<String> {
    let query = query?.trim_start_matches('?');
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "slug")
        .map(|(_, value)| value.into_owned())
        .filter(|slug| !slug.is_empty())
}

impl Route {
    /// Resolve `path` (and the optional query string) to a page.
    ///
    /// The city slug is the segment following a `cities` segment, anywhere
    /// in the path, so a site served below a prefix still resolves. Without
    /// one the `slug` query parameter is used.
    pub fn parse(path: &str, query: Option<&str>) -> Result<Self> {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if let Some(i) = segments.iter().position(|s| *s == "cities") {
            return Ok(match segments.get(i + 1) {
                Some(slug) => Route::City(Some(slug.to_string())),
                None => match query_slug(query) {
                    Some(slug) => Route::City(Some(slug)),
                    None => Route::CityIndex,
                },
            });
        }

        match segments.last() {
            None => Ok(Route::Home),
            Some(&"city.html") => Ok(Route::City(query_slug(query))),
            Some(_) => Err(Error::NotFound(path)),
        }
    }

    /// Parse a request target such as `/cities/?slug=visalia`
    pub fn from_target(target: &str) -> Result<Self> {
        match target.split_once('?') {
            Some((path, query)) => Self::parse(path, Some(query)),
            None => Self::parse(target, None),
        }
    }

    /// Canonical site path, used for navigation highlighting
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CityIndex | Route::City(None) => "/cities/".to_string(),
            Route::City(Some(slug)) => format!("/cities/{}/", slug),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Route::City(slug) => slug.as_deref(),
            _ => None,
        }
    }

    /// File written for this page, relative to the output directory
    pub fn output_file(&self) -> Option<PathBuf> {
        match self {
            Route::Home => Some(PathBuf::from("index.html")),
            Route::CityIndex => Some(PathBuf::from("cities").join("index.html")),
            Route::City(Some(slug)) => Some(PathBuf::from("cities").join(slug).join("index.html")),
            Route::City(None) => None,
        }
    }
}
