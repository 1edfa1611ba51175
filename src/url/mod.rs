//! URL handling for the crawler
//!
//! Normalization, domain extraction and priority-page classification.

mod domain;
mod normalize;
mod priority;

pub use domain::{extract_domain, same_domain};
pub use normalize::{normalize_link, normalize_root_url};
pub use priority::{classify_page_type, is_priority_page};
