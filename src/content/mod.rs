//! Content module - reading, parsing and rendering post sources

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Metadata, PageMeta, PostData, PostId, RelatedPost};
