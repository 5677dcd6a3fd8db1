//! Content loader - reads post sources from the content directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::PostId;
use crate::error::{Error, Result};

/// Reads `<root>/<category>/<slug>.md` files
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the Markdown source for a post
    pub fn path_of(&self, category: &str, slug: &str) -> PathBuf {
        self.root.join(category).join(format!("{}.md", slug))
    }

    /// Read the raw text of a post
    pub fn load(&self, category: &str, slug: &str) -> Result<String> {
        let path = self.path_of(category, slug);
        if !is_plain_segment(category) || !is_plain_segment(slug) {
            return Err(Error::NotFound {
                category: category.to_string(),
                slug: slug.to_string(),
                path,
            });
        }
        tracing::debug!("Reading {:?}", path);

        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::NotFound {
                category: category.to_string(),
                slug: slug.to_string(),
                path,
            },
            _ => Error::Read { path, source },
        })
    }

    /// Every `<category>/<slug>.md` file present on disk, sorted
    pub fn scan(&self) -> Vec<PostId> {
        if !self.root.exists() {
            return Vec::new();
        }

        let mut found: Vec<PostId> = WalkDir::new(&self.root)
            .min_depth(2)
            .max_depth(2)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
            .filter_map(|e| {
                let relative = e.path().strip_prefix(&self.root).ok()?;
                let category = relative.parent()?.to_str()?.to_string();
                let slug = relative.file_stem()?.to_str()?.to_string();
                Some(PostId::new(category, slug))
            })
            .collect();

        found.sort();
        found
    }
}

/// A single path component that cannot leave the content root
pub(crate) fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tech")).unwrap();
        fs::write(dir.path().join("tech/hello.md"), "# Hello").unwrap();

        let loader = ContentLoader::new(dir.path());
        assert_eq!(loader.load("tech", "hello").unwrap(), "# Hello");
    }

    #[test]
    fn test_load_missing_post_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ContentLoader::new(dir.path());

        match loader.load("tech", "ghost") {
            Err(Error::NotFound {
                category,
                slug,
                path,
            }) => {
                assert_eq!(category, "tech");
                assert_eq!(slug, "ghost");
                assert!(path.ends_with("tech/ghost.md"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("secret.md"), "nope").unwrap();
        fs::create_dir_all(dir.path().join("tech")).unwrap();

        let loader = ContentLoader::new(dir.path().join("tech"));
        assert!(matches!(
            loader.load("..", "secret"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            loader.load("tech", "../../secret"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_scan_finds_category_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tech/nested")).unwrap();
        fs::create_dir_all(dir.path().join("life")).unwrap();
        fs::write(dir.path().join("config.json"), "[]").unwrap();
        fs::write(dir.path().join("README.md"), "top level").unwrap();
        fs::write(dir.path().join("tech/b.md"), "").unwrap();
        fs::write(dir.path().join("tech/a.md"), "").unwrap();
        fs::write(dir.path().join("tech/notes.txt"), "").unwrap();
        fs::write(dir.path().join("tech/nested/deep.md"), "").unwrap();
        fs::write(dir.path().join("life/c.md"), "").unwrap();

        let found = ContentLoader::new(dir.path()).scan();
        assert_eq!(
            found,
            vec![
                PostId::new("life", "c"),
                PostId::new("tech", "a"),
                PostId::new("tech", "b"),
            ]
        );
    }
}
