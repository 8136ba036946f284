//! Email extraction
//!
//! This module turns an HTML document into the set of addresses
//! found in its `mailto:` links.

pub mod extractor;

// Re-export commonly used items
pub use extractor::{ExtractEmails, Extractor, strip_mailto};
