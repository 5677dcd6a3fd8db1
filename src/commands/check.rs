//! Check the catalog against the content directory

use anyhow::Result;
use std::collections::BTreeSet;

use crate::content::PostId;
use crate::error::Error;
use crate::Blog;

/// Problems found by [`check`]
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Catalog entries without a Markdown file
    pub missing: Vec<PostId>,
    /// Catalog entries whose file cannot be read or parsed
    pub invalid: Vec<(PostId, String)>,
    /// Markdown files no catalog entry points at
    pub orphans: Vec<PostId>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty() && self.orphans.is_empty()
    }
}

/// Resolve every catalogued post and look for files the catalog does not know
pub fn check(blog: &Blog) -> Result<CheckReport> {
    let resolver = blog.resolver()?;
    let mut report = CheckReport::default();

    let catalogued: BTreeSet<PostId> = resolver.list_all_identifiers().into_iter().collect();
    for id in &catalogued {
        match resolver.get_full_post(&id.category, &id.slug) {
            Ok(_) => {}
            Err(Error::NotFound { .. }) => report.missing.push(id.clone()),
            Err(e) => report.invalid.push((id.clone(), e.to_string())),
        }
    }

    report.orphans = resolver
        .loader()
        .scan()
        .into_iter()
        .filter(|id| !catalogued.contains(id))
        .collect();

    Ok(report)
}

/// Run the check and fail when any problem is found
pub fn run(blog: &Blog) -> Result<()> {
    let report = check(blog)?;

    for id in &report.missing {
        tracing::warn!(
            "Missing file for {}: {:?}",
            id,
            blog.content_dir.join(format!("{}.md", id))
        );
    }
    for (id, reason) in &report.invalid {
        tracing::warn!("Cannot load {}: {}", id, reason);
    }
    for id in &report.orphans {
        tracing::warn!("Not in the catalog: {}", id);
    }

    if !report.is_clean() {
        anyhow::bail!(
            "{} missing, {} invalid, {} orphaned",
            report.missing.len(),
            report.invalid.len(),
            report.orphans.len()
        );
    }

    println!("All posts are in order.");
    Ok(())
}
