//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::Blog;

/// Print site content by type
pub fn run(blog: &Blog, content_type: &str, category: Option<&str>) -> Result<()> {
    for line in report(blog, content_type, category)? {
        println!("{}", line);
    }
    Ok(())
}

/// Build the listing printed by [`run`]
pub fn report(blog: &Blog, content_type: &str, category: Option<&str>) -> Result<Vec<String>> {
    let resolver = blog.resolver()?;
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = resolver.list_posts(category)?;
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                lines.push(format!(
                    "  {} - {} [{}/{}]",
                    post.date.as_deref().unwrap_or("----------"),
                    post.title,
                    post.tag,
                    post.slug
                ));
            }
        }
        "category" | "categories" => {
            let categories = resolver.catalog().categories();
            lines.push(format!("Categories ({}):", categories.len()));
            for cat in categories {
                let published = cat.posts.iter().filter(|p| p.published).count();
                lines.push(format!(
                    "  {} ({} published, {} total)",
                    cat.name,
                    published,
                    cat.posts.len()
                ));
            }
        }
        "tag" | "tags" => {
            // First-seen order breaks ties between equally used tags
            let mut tags: IndexMap<&str, usize> = IndexMap::new();
            for cat in resolver.catalog().categories() {
                if category.map_or(false, |name| cat.name != name) {
                    continue;
                }
                for post in cat.posts.iter().filter(|p| p.published) {
                    for tag in &post.tags {
                        *tags.entry(tag.as_str()).or_insert(0) += 1;
                    }
                }
            }
            tags.sort_by(|_, a, _, b| b.cmp(a));
            lines.push(format!("Tags ({}):", tags.len()));
            for (tag, count) in tags {
                lines.push(format!("  {} ({})", tag, count));
            }
        }
        "id" | "ids" => {
            let ids: Vec<_> = resolver
                .list_all_identifiers()
                .into_iter()
                .filter(|id| category.map_or(true, |name| id.category == name))
                .collect();
            lines.push(format!("Identifiers ({}):", ids.len()));
            for id in ids {
                lines.push(format!("  {}", id));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, categories, tags, ids",
                content_type
            );
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::fixtures::write_sample_content;

    fn sample_blog() -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        write_sample_content(dir.path());
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_list_posts() {
        let (_dir, blog) = sample_blog();
        let lines = report(&blog, "posts", None).unwrap();
        assert_eq!(lines[0], "Posts (4):");
        assert_eq!(lines[1], "  2024-06-15 - Post C [tech/c]");
        assert_eq!(lines[4], "  2023-12-31 - Post B [tech/b]");
    }

    #[test]
    fn test_list_categories() {
        let (_dir, blog) = sample_blog();
        let lines = report(&blog, "categories", None).unwrap();
        assert_eq!(
            lines,
            vec![
                "Categories (2):",
                "  tech (3 published, 4 total)",
                "  life (1 published, 1 total)",
            ]
        );
    }

    #[test]
    fn test_list_tags_by_use() {
        let (_dir, blog) = sample_blog();
        let lines = report(&blog, "tags", None).unwrap();
        assert_eq!(
            lines,
            vec!["Tags (3):", "  rust (2)", "  web (1)", "  travel (1)"]
        );

        let lines = report(&blog, "tags", Some("life")).unwrap();
        assert_eq!(lines, vec!["Tags (1):", "  travel (1)"]);
    }

    #[test]
    fn test_list_ids_for_category() {
        let (_dir, blog) = sample_blog();
        let lines = report(&blog, "ids", Some("life")).unwrap();
        assert_eq!(lines, vec!["Identifiers (1):", "  life/e"]);
    }

    #[test]
    fn test_list_unknown_type() {
        let (_dir, blog) = sample_blog();
        assert!(report(&blog, "pages", None).is_err());
    }
}
