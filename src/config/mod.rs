//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::HighlightConfig;
pub use site::HomeConfig;
pub use site::Project;
pub use site::ProjectType;
pub use site::SiteConfig;
