//! Post catalog (`config.json`)
//!
//! The catalog maps every category to the ordered list of posts it contains.
//! It is loaded once and never mutated afterwards; everything downstream
//! borrows it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A single post as declared in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEntry {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "isPublished", alias = "published", default)]
    pub published: bool,
}

/// A named group of posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub posts: Vec<PostEntry>,
}

impl Category {
    /// Find a post in this category by slug
    pub fn find(&self, slug: &str) -> Option<&PostEntry> {
        self.posts.iter().find(|p| p.slug == slug)
    }
}

/// Read-only store of categories and their posts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from categories already in memory
    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Load the catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Catalog {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let categories: Vec<Category> =
            serde_json::from_str(&content).map_err(|e| Error::Catalog {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded catalog {:?}: {} categories, {} posts",
            path,
            categories.len(),
            categories.iter().map(|c| c.posts.len()).sum::<usize>()
        );

        Ok(Self { categories })
    }

    /// All categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Find a post entry by category name and slug
    pub fn find(&self, category: &str, slug: &str) -> Option<&PostEntry> {
        self.category(category)?.find(slug)
    }
}
