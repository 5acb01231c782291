//! Rendering configuration passed into every renderer.

use crate::escape::html_escape;
use plat_config::SiteConfig;

/// How `<img>` sources are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Plain `src`
    Eager,
    /// `data-src` + `data-fallback`; the page's fallback script sets `src`
    /// and swaps in the fallback on error
    Deferred,
}

/// Amount of detail on a city card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    /// Image, name and call to action
    Simple,
    /// Adds tagline, price range and tags
    Wide,
}

/// Placeholders and limits for one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub city_placeholder: String,
    pub builder_placeholder: String,
    pub city_fallback: String,
    pub logo_fallback: String,
    pub image_mode: ImageMode,
    pub tag_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl RenderOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            city_placeholder: config.images.city_placeholder.clone(),
            builder_placeholder: config.images.builder_placeholder.clone(),
            city_fallback: config.images.city_fallback.clone(),
            logo_fallback: config.images.logo_fallback.clone(),
            image_mode: ImageMode::Eager,
            tag_limit: config.layout.tag_limit,
        }
    }

    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.image_mode = mode;
        self
    }

    /// `src`/`data-src` attributes for an image with its fallback
    pub(crate) fn image_attrs(&self, src: &str, fallback: &str) -> String {
        match self.image_mode {
            ImageMode::Eager => format!(r#"src="{}""#, html_escape(src)),
            ImageMode::Deferred => format!(
                r#"data-src="{}" data-fallback="{}""#,
                html_escape(src),
                html_escape(fallback)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = SiteConfig::default();
        config.layout.tag_limit = 3;
        config.images.city_placeholder = "/img/none.png".into();
        let opts = RenderOptions::from_config(&config);
        assert_eq!(opts.tag_limit, 3);
        assert_eq!(opts.city_placeholder, "/img/none.png");
        assert_eq!(opts.image_mode, ImageMode::Eager);
    }

    #[test]
    fn test_image_attrs() {
        let opts = RenderOptions::default();
        assert_eq!(opts.image_attrs("/a.webp", "data:x"), r#"src="/a.webp""#);
        let deferred = opts.with_image_mode(ImageMode::Deferred);
        assert_eq!(
            deferred.image_attrs("/a.webp", "data:x"),
            r#"data-src="/a.webp" data-fallback="data:x""#
        );
    }
}
