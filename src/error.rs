//! Error types for the post pipeline

use std::path::PathBuf;

use crate::content::FrontMatterError;

/// Faults raised while resolving or rendering posts
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Markdown file for a catalog entry does not exist
    #[error("post not found: {category}/{slug} ({path:?})")]
    NotFound {
        category: String,
        slug: String,
        path: PathBuf,
    },

    /// The Markdown file exists but could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The leading metadata block of a post is malformed
    #[error("malformed front-matter in {category}/{slug}: {source}")]
    FrontMatter {
        category: String,
        slug: String,
        #[source]
        source: FrontMatterError,
    },

    /// The catalog file could not be loaded
    #[error("failed to load catalog {path:?}: {reason}")]
    Catalog { path: PathBuf, reason: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl Error {
    /// Whether this fault comes from the post data (missing or malformed
    /// content) rather than from the rendering machinery
    pub fn is_content_fault(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::Read { .. } | Error::FrontMatter { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
