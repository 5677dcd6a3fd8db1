//! Generate static files

use anyhow::Result;

use crate::generator::{GenerateSummary, Generator};
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    run_with_summary(blog).map(|_| ())
}

/// Generate the static site and report what was written
pub fn run_with_summary(blog: &Blog) -> Result<GenerateSummary> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    let summary = generator.generate()?;

    tracing::info!(
        "Generated {} posts in {} categories, copied {} assets",
        summary.posts,
        summary.categories,
        summary.assets
    );
    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::fixtures::write_sample_content;

    #[test]
    fn test_run_generates_site() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_content(dir.path());
        let blog = Blog::new(dir.path()).unwrap();

        let summary = run_with_summary(&blog).unwrap();
        assert_eq!(summary.posts, 5);
        assert!(blog.public_dir.join("blogs/life/e/index.html").is_file());
    }

    #[test]
    fn test_run_without_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(run(&blog).is_err());
        assert!(!blog.public_dir.exists());
    }
}
