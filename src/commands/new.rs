//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::catalog::{Category, PostEntry};
use crate::content::FrontMatter;
use crate::Blog;

/// Create a new unpublished post in `category` and register it in the catalog
///
/// The category is created when it does not exist yet. Returns the path of
/// the new Markdown file.
pub fn create_post(
    blog: &Blog,
    category: &str,
    title: &str,
    slug: Option<&str>,
) -> Result<PathBuf> {
    let category = slug::slugify(category);
    let slug = slug.map(slug::slugify).unwrap_or_else(|| slug::slugify(title));
    if category.is_empty() || slug.is_empty() {
        anyhow::bail!("Cannot derive a category and slug from {:?}", title);
    }

    let catalog_path = blog.catalog_path();
    let mut categories: Vec<Category> = if catalog_path.exists() {
        let content = fs::read_to_string(&catalog_path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {:?}", catalog_path))?
    } else {
        Vec::new()
    };

    let file_path = blog
        .content_dir
        .join(&category)
        .join(format!("{}.md", slug));

    // Check if the post already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(existing) = categories
        .iter()
        .find(|c| c.name == category)
        .and_then(|c| c.find(&slug))
    {
        anyhow::bail!(
            "Post {}/{} is already in the catalog as {:?}",
            category,
            slug,
            existing.title
        );
    }

    let entry = PostEntry {
        slug: slug.clone(),
        title: title.to_string(),
        description: String::new(),
        tags: Vec::new(),
        published: false,
    };
    match categories.iter_mut().find(|c| c.name == category) {
        Some(c) => c.posts.push(entry),
        None => categories.push(Category {
            name: category.clone(),
            posts: vec![entry],
        }),
    }

    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        authors: if blog.config.author.is_empty() {
            Vec::new()
        } else {
            vec![blog.config.author.clone()]
        },
        relates: Vec::new(),
    };
    let content = format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    fs::write(&catalog_path, serde_json::to_string_pretty(&categories)? + "\n")
        .with_context(|| format!("failed to write {:?}", catalog_path))?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::fixtures::write_sample_content;

    #[test]
    fn test_new_post_in_existing_category() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_content(dir.path());
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "tech", "Async Rust, Explained", None).unwrap();
        assert_eq!(path, dir.path().join("posts/tech/async-rust-explained.md"));

        let resolver = blog.resolver().unwrap();
        let entry = resolver
            .catalog()
            .find("tech", "async-rust-explained")
            .unwrap();
        assert_eq!(entry.title, "Async Rust, Explained");
        assert!(!entry.published);
        assert_eq!(resolver.catalog().category("tech").unwrap().posts.len(), 5);

        let post = resolver
            .get_full_post("tech", "async-rust-explained")
            .unwrap();
        assert_eq!(post.title, "Async Rust, Explained");
        assert!(post.date.is_some());

        // Unpublished, so not listed yet
        let listed = resolver.list_posts(Some("tech")).unwrap();
        assert!(listed.iter().all(|p| p.slug != "async-rust-explained"));
    }

    #[test]
    fn test_new_post_creates_category_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        create_post(&blog, "Cooking", "Bread", Some("sourdough")).unwrap();

        let resolver = blog.resolver().unwrap();
        assert_eq!(resolver.supported_categories(), vec!["cooking"]);
        assert!(resolver.catalog().find("cooking", "sourdough").is_some());
        assert!(dir.path().join("posts/cooking/sourdough.md").is_file());
    }

    #[test]
    fn test_new_post_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_content(dir.path());
        let blog = Blog::new(dir.path()).unwrap();

        assert!(create_post(&blog, "tech", "Whatever", Some("a")).is_err());

        create_post(&blog, "life", "Travel notes", None).unwrap();
        assert!(create_post(&blog, "life", "Travel notes", None).is_err());
    }
}
