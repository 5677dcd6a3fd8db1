//! Single-post queries

use super::PostResolver;
use crate::content::{PageMeta, PostData, PostId, RelatedPost};
use crate::error::Result;

impl PostResolver {
    /// Every (category, slug) pair in catalog order, published or not
    pub fn list_all_identifiers(&self) -> Vec<PostId> {
        self.catalog
            .categories()
            .iter()
            .flat_map(|category| {
                category
                    .posts
                    .iter()
                    .map(|post| PostId::new(&category.name, &post.slug))
            })
            .collect()
    }

    /// Category names in catalog order
    pub fn supported_categories(&self) -> Vec<String> {
        self.catalog
            .categories()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Load, parse and render a post, then resolve its related posts.
    ///
    /// A missing file or malformed front-matter is returned as an error.
    /// A related slug that is not in the catalog does not fail the post: it
    /// keeps its slug and gets the fallback title.
    pub fn get_full_post(&self, category: &str, slug: &str) -> Result<PostData> {
        let (fm, body) = self.read_post(category, slug)?;
        let content_html = self.renderer.render(&body);

        let relates = fm
            .relates
            .iter()
            .map(|related| {
                if self.catalog.find(category, related).is_none() {
                    tracing::warn!(
                        "{}/{} relates to unknown post {:?}",
                        category,
                        slug,
                        related
                    );
                }
                RelatedPost {
                    title: self.get_lightweight_metadata(category, related).title,
                    slug: related.clone(),
                }
            })
            .collect();

        let title = fm
            .title
            .or_else(|| {
                self.catalog
                    .find(category, slug)
                    .map(|entry| entry.title.clone())
            })
            .unwrap_or_else(|| slug.to_string());

        Ok(PostData {
            category: category.to_string(),
            slug: slug.to_string(),
            title,
            date: fm.date,
            content_html,
            authors: fm.authors,
            relates,
        })
    }

    /// Title, keywords and description from the catalog entry.
    ///
    /// Never fails: an unknown (category, slug) yields the fallback triple.
    pub fn get_lightweight_metadata(&self, category: &str, slug: &str) -> PageMeta {
        match self.catalog.find(category, slug) {
            Some(entry) => PageMeta {
                title: entry.title.clone(),
                keywords: entry.tags.join(","),
                description: entry.description.clone(),
            },
            None => self.fallback.clone(),
        }
    }
}
