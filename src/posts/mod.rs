//! Post resolution pipeline
//!
//! [`PostResolver`] ties the catalog, the content loader and the Markdown
//! renderer together. Every query is a synchronous transformation over
//! read-only inputs, so one resolver can be shared across threads.

mod listing;
mod resolver;

use crate::catalog::Catalog;
use crate::config::{FallbackConfig, SiteConfig};
use crate::content::{ContentLoader, FrontMatter, MarkdownRenderer, PageMeta};
use crate::error::{Error, Result};

/// Answers post queries over an injected catalog
#[derive(Debug, Clone)]
pub struct PostResolver {
    catalog: Catalog,
    loader: ContentLoader,
    renderer: MarkdownRenderer,
    fallback: PageMeta,
}

impl PostResolver {
    /// Create a resolver with the default renderer and fallback metadata
    pub fn new(catalog: Catalog, loader: ContentLoader) -> Self {
        Self {
            catalog,
            loader,
            renderer: MarkdownRenderer::new(),
            fallback: FallbackConfig::default().into(),
        }
    }

    /// Create a resolver configured from the site configuration
    pub fn from_config(config: &SiteConfig, catalog: Catalog, loader: ContentLoader) -> Self {
        Self::new(catalog, loader)
            .with_renderer(MarkdownRenderer::with_options(
                config.toc.auto,
                config.toc.max_depth,
            ))
            .with_fallback(config.fallback.clone().into())
    }

    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_fallback(mut self, fallback: PageMeta) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Load a post source and split off its front-matter
    fn read_post(&self, category: &str, slug: &str) -> Result<(FrontMatter, String)> {
        let raw = self.loader.load(category, slug)?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| Error::FrontMatter {
            category: category.to_string(),
            slug: slug.to_string(),
            source,
        })?;
        Ok((fm, body.to_string()))
    }
}
