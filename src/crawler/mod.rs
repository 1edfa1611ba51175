//! Priority-page discovery for one site
//!
//! The crawler fans out exactly one hop from the root page: it fetches
//! the root, keeps the same-domain links that look like contact/about/
//! legal pages, explores a capped few of those for further priority
//! links, and returns the union as an ordered candidate list.

mod discover;
mod site;

pub use discover::extract_same_domain_links;
pub use site::SiteCrawler;
