//! Helper functions for templates

mod url;

pub use url::*;
