//! Configuration module

mod site;

pub use site::FallbackConfig;
pub use site::SiteConfig;
pub use site::TocConfig;
