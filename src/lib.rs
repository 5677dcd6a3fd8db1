//! hi-there: a Markdown blog front-end
//!
//! Posts live as flat Markdown files under `<content_dir>/<category>/<slug>.md`
//! and are enumerated by a `config.json` catalog. This crate resolves them
//! into rendered pages, either as a static site or through a live server.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod posts;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use catalog::{Catalog, Category, PostEntry};
pub use content::{Metadata, PageMeta, PostData, PostId, RelatedPost};
pub use error::Error;
pub use posts::PostResolver;

/// The blog application rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory holding the catalog and category folders
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub static_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)
                .with_context(|| format!("failed to load {:?}", config_path))?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        })
    }

    /// Path of the catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.content_dir.join(&self.config.catalog_file)
    }

    /// Load the catalog and build a resolver over the content directory
    pub fn resolver(&self) -> Result<PostResolver> {
        let catalog = Catalog::load(self.catalog_path())?;
        let loader = content::ContentLoader::new(&self.content_dir);
        Ok(PostResolver::from_config(&self.config, catalog, loader))
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::fixtures::write_sample_content;
    use std::fs;

    #[test]
    fn test_blog_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("posts"));
        assert_eq!(blog.public_dir, dir.path().join("public"));
        assert_eq!(blog.catalog_path(), dir.path().join("posts/config.json"));
    }

    #[test]
    fn test_blog_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: content\npublic_dir: dist\n",
        )
        .unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("content"));
        assert_eq!(blog.public_dir, dir.path().join("dist"));
    }

    #[test]
    fn test_resolver_from_blog() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_content(dir.path());
        let blog = Blog::new(dir.path()).unwrap();
        let resolver = blog.resolver().unwrap();
        assert_eq!(resolver.list_all_identifiers().len(), 5);
    }

    #[test]
    fn test_resolver_without_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(blog.resolver().is_err());
    }
}
