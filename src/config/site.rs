//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::PageMeta;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub catalog_file: String,
    pub public_dir: String,
    pub static_dir: String,

    /// Base URL for "Edit this page" links, e.g. a repository blob URL
    /// pointing at the content directory
    pub edit_url: Option<String>,

    // Writing
    #[serde(default)]
    pub toc: TocConfig,

    /// Metadata used when a post is not in the catalog
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Hi There".to_string(),
            description: "A blog about common topics in web development".to_string(),
            author: String::new(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            content_dir: "posts".to_string(),
            catalog_file: "config.json".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            edit_url: None,

            toc: TocConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Table of contents configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Prepend a table of contents when no "Contents" heading is present
    pub auto: bool,
    pub max_depth: usize,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            auto: true,
            max_depth: 6,
        }
    }
}

/// Fallback page metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub title: String,
    pub keywords: String,
    pub description: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            title: "Hi There".to_string(),
            keywords: "A blog post about common topic in web development".to_string(),
            description: "A blog post about common topic in web development".to_string(),
        }
    }
}

impl From<FallbackConfig> for PageMeta {
    fn from(fallback: FallbackConfig) -> Self {
        PageMeta {
            title: fallback.title,
            keywords: fallback.keywords,
            description: fallback.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Hi There");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.catalog_file, "config.json");
        assert!(config.toc.auto);
        assert_eq!(config.toc.max_depth, 6);
        assert!(config.edit_url.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
content_dir: content
edit_url: https://github.com/me/blog/blob/main/content
toc:
  auto: false
fallback:
  title: Nothing here
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "content");
        assert_eq!(
            config.edit_url.as_deref(),
            Some("https://github.com/me/blog/blob/main/content")
        );
        assert!(!config.toc.auto);
        assert_eq!(config.toc.max_depth, 6);
        assert_eq!(config.fallback.title, "Nothing here");
        assert_eq!(
            config.fallback.description,
            "A blog post about common topic in web development"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From Disk\npublic_dir: out\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From Disk");
        assert_eq!(config.public_dir, "out");
        assert_eq!(config.root, "/");
    }
}
