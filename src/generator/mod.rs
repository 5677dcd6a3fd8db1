//! Generator module - writes every page of the site as static HTML

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::loader::is_plain_segment;
use crate::pages::SitePages;
use crate::posts::PostResolver;
use crate::Blog;

/// Counts reported after a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub posts: usize,
    pub categories: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    resolver: PostResolver,
    pages: SitePages,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let resolver = blog.resolver()?;
        Self::with_resolver(blog, resolver)
    }

    /// Create a generator over an already-built resolver
    pub fn with_resolver(blog: &Blog, resolver: PostResolver) -> Result<Self> {
        let pages = SitePages::new(&blog.config, &resolver)?;
        Ok(Self {
            blog: blog.clone(),
            resolver,
            pages,
        })
    }

    /// Generate the entire site
    ///
    /// Any missing or malformed post aborts the run.
    pub fn generate(&self) -> Result<GenerateSummary> {
        let categories = self.resolver.supported_categories();
        let ids = self.resolver.list_all_identifiers();

        // Catalog names become output directories and must stay inside them
        for name in categories.iter().chain(ids.iter().map(|id| &id.slug)) {
            if !is_plain_segment(name) {
                anyhow::bail!("refusing to generate a page for unsafe name {:?}", name);
            }
        }

        let public_dir = &self.blog.public_dir;
        fs::create_dir_all(public_dir)?;

        let assets = self.copy_static_assets()?;

        let html = self.pages.index(&self.resolver)?;
        write_page(&public_dir.join("index.html"), &html)?;

        for category in &categories {
            let html = self
                .pages
                .category(&self.resolver, category)
                .with_context(|| format!("failed to render category {:?}", category))?;
            write_page(
                &public_dir.join("blogs").join(category).join("index.html"),
                &html,
            )?;
        }

        for id in &ids {
            let html = self
                .pages
                .post(&self.resolver, &id.category, &id.slug)
                .with_context(|| format!("failed to render post {}", id))?;
            write_page(
                &public_dir
                    .join("blogs")
                    .join(&id.category)
                    .join(&id.slug)
                    .join("index.html"),
                &html,
            )?;
        }

        let html = self
            .pages
            .not_found("404.html", "The page you are looking for does not exist.")?;
        write_page(&public_dir.join("404.html"), &html)?;

        Ok(GenerateSummary {
            posts: ids.len(),
            categories: categories.len(),
            assets,
        })
    }

    /// Copy the static directory into `<public>/static`
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join("static").join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_page(output_path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {:?}", parent))?;
    }
    fs::write(output_path, html).with_context(|| format!("failed to write {:?}", output_path))?;
    tracing::debug!("Generated: {:?}", output_path);
    Ok(())
}
