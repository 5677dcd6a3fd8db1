//! Index listings of published posts

use super::PostResolver;
use crate::content::Metadata;
use crate::error::Result;

impl PostResolver {
    /// Published posts, optionally limited to one category, newest first.
    ///
    /// Dates are compared as plain strings, so they must be zero-padded
    /// ISO-like (`2024-01-05`) to order correctly. Posts without a date come
    /// last; ties keep catalog order. An unknown category yields an empty
    /// list.
    pub fn list_posts(&self, category: Option<&str>) -> Result<Vec<Metadata>> {
        let mut results = Vec::new();

        let categories = self
            .catalog
            .categories()
            .iter()
            .filter(|c| category.map_or(true, |name| c.name == name));

        for cat in categories {
            for post in cat.posts.iter().filter(|p| p.published) {
                let (fm, _) = self.read_post(&cat.name, &post.slug)?;
                results.push(Metadata {
                    title: post.title.clone(),
                    description: post.description.clone(),
                    slug: post.slug.clone(),
                    tag: cat.name.clone(),
                    authors: fm.authors,
                    date: fm.date,
                });
            }
        }

        results.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(results)
    }
}
