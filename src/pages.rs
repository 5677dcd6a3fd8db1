//! Page assembly shared by the static generator and the live server

use tera::Context;

use crate::config::SiteConfig;
use crate::content::{Metadata, PageMeta};
use crate::error::Result;
use crate::helpers::{category_path, edit_url, full_url_for, post_path, url_for};
use crate::posts::PostResolver;
use crate::templates::{
    capitalize, CategoryLink, ListItem, RelatedLink, SiteData, TemplateRenderer,
};

/// Renders full HTML pages from resolver queries
pub struct SitePages {
    config: SiteConfig,
    site: SiteData,
    renderer: TemplateRenderer,
}

impl SitePages {
    pub fn new(config: &SiteConfig, resolver: &PostResolver) -> Result<Self> {
        let categories = resolver
            .supported_categories()
            .into_iter()
            .map(|name| CategoryLink {
                url: url_for(config, &category_path(&name)),
                name,
            })
            .collect();

        let site = SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            root: url_for(config, ""),
            categories,
        };

        Ok(Self {
            config: config.clone(),
            site,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Home page: every published post, newest first
    pub fn index(&self, resolver: &PostResolver) -> Result<String> {
        let posts = resolver.list_posts(None)?;
        let page = PageMeta {
            title: self.config.title.clone(),
            keywords: String::new(),
            description: self.config.description.clone(),
        };

        let mut context = self.base_context(&page, "");
        context.insert("heading", "All posts");
        context.insert("posts", &self.list_items(posts));
        self.renderer.render("index.html", &context)
    }

    /// Listing of the published posts of one category
    pub fn category(&self, resolver: &PostResolver, name: &str) -> Result<String> {
        let posts = resolver.list_posts(Some(name))?;
        let path = category_path(name);
        let page = PageMeta {
            title: format!("{} | {}", capitalize(name), self.config.title),
            keywords: name.to_string(),
            description: self.config.description.clone(),
        };

        let mut context = self.base_context(&page, &path);
        context.insert(
            "category",
            &CategoryLink {
                name: name.to_string(),
                url: url_for(&self.config, &path),
            },
        );
        context.insert("posts", &self.list_items(posts));
        self.renderer.render("category.html", &context)
    }

    /// A single post with its related links
    pub fn post(&self, resolver: &PostResolver, category: &str, slug: &str) -> Result<String> {
        let post = resolver.get_full_post(category, slug)?;
        let page = resolver.get_lightweight_metadata(category, slug);

        let related: Vec<RelatedLink> = post
            .relates
            .iter()
            .map(|r| RelatedLink {
                title: r.title.clone(),
                url: url_for(&self.config, &post_path(category, &r.slug)),
            })
            .collect();

        let mut context = self.base_context(&page, &post_path(category, slug));
        context.insert(
            "category",
            &CategoryLink {
                name: category.to_string(),
                url: url_for(&self.config, &category_path(category)),
            },
        );
        context.insert("post", &post);
        context.insert("related", &related);
        context.insert("edit_url", &edit_url(&self.config, category, slug));
        self.renderer.render("post.html", &context)
    }

    pub fn not_found(&self, path: &str, message: &str) -> Result<String> {
        let page = PageMeta {
            title: format!("Not found | {}", self.config.title),
            keywords: String::new(),
            description: self.config.description.clone(),
        };
        let mut context = self.base_context(&page, path);
        context.insert("message", message);
        self.renderer.render("not_found.html", &context)
    }

    /// Create a base context with common variables
    fn base_context(&self, page: &PageMeta, path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("page", page);
        context.insert("canonical", &full_url_for(&self.config, path));
        context
    }

    fn list_items(&self, posts: Vec<Metadata>) -> Vec<ListItem> {
        posts
            .into_iter()
            .map(|p| ListItem {
                url: url_for(&self.config, &post_path(&p.tag, &p.slug)),
                category_url: url_for(&self.config, &category_path(&p.tag)),
                title: p.title,
                description: p.description,
                category: p.tag,
                authors: p.authors,
                date: p.date,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::content::ContentLoader;
    use crate::error::Error;
    use crate::posts::fixtures::{category, entry, sample_site};

    fn pages(resolver: &PostResolver) -> SitePages {
        let config = SiteConfig {
            edit_url: Some("https://github.com/halng/hi-there/blob/main/posts".to_string()),
            ..SiteConfig::default()
        };
        SitePages::new(&config, resolver).unwrap()
    }

    #[test]
    fn test_index_page() {
        let (_dir, resolver) = sample_site();
        let html = pages(&resolver).index(&resolver).unwrap();

        assert!(html.contains("<title>Hi There</title>"));
        assert!(html.contains(r#"<a href="/blogs/tech/">Tech</a>"#));
        assert!(html.contains(r#"<a href="/blogs/life/">Life</a>"#));
        let c = html.find(r#"href="/blogs/tech/c/""#).unwrap();
        let b = html.find(r#"href="/blogs/tech/b/""#).unwrap();
        assert!(c < b);
        assert!(!html.contains("/blogs/tech/d/"));
    }

    #[test]
    fn test_category_page() {
        let (_dir, resolver) = sample_site();
        let html = pages(&resolver).category(&resolver, "life").unwrap();

        assert!(html.contains("<title>Life | Hi There</title>"));
        assert!(html.contains(r#"href="/blogs/life/e/""#));
        assert!(!html.contains(r#"href="/blogs/tech/a/""#));
    }

    #[test]
    fn test_category_name_keeps_inner_capitals() {
        let catalog = Catalog::from_categories(vec![category(
            "devOps",
            vec![entry("draft", "Draft", false)],
        )]);
        let resolver = PostResolver::new(catalog, ContentLoader::new("posts"));
        let html = pages(&resolver).category(&resolver, "devOps").unwrap();

        assert!(html.contains("<title>DevOps | Hi There</title>"));
        assert!(html.contains(r#"<h1 class="page-title">DevOps</h1>"#));
        assert!(html.contains(r#"<a href="/blogs/devOps/">DevOps</a>"#));
        assert!(!html.contains("Devops"));
    }

    #[test]
    fn test_post_page() {
        let (_dir, resolver) = sample_site();
        let html = pages(&resolver).post(&resolver, "tech", "a").unwrap();

        assert!(html.contains("<title>Post A</title>"));
        assert!(html.contains(r#"<meta name="keywords" content="rust">"#));
        assert!(html.contains(r#"<meta name="description" content="About A">"#));
        assert!(html.contains(r#"<h1 class="post-title">A from front-matter</h1>"#));
        assert!(html.contains("<h2>Related Posts</h2>"));
        assert!(html.contains(r#"<li><a href="/blogs/tech/b/">Post B</a></li>"#));
        assert!(html.contains(
            r#"href="https://github.com/halng/hi-there/blob/main/posts/tech/a.md""#
        ));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:4000/blogs/tech/a/">"#));
    }

    #[test]
    fn test_post_page_without_relates() {
        let (_dir, resolver) = sample_site();
        let html = pages(&resolver).post(&resolver, "tech", "b").unwrap();
        assert!(!html.contains("Related Posts"));
        assert!(html.contains("Bob, Carol"));
    }

    #[test]
    fn test_missing_post_page_is_content_fault() {
        let (_dir, resolver) = sample_site();
        let err = pages(&resolver)
            .post(&resolver, "tech", "nope")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
