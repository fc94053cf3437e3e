//! # PubMed Scout
//!
//! Fetches PubMed papers matching a query via the NCBI E-utilities API and
//! flags authors whose affiliations look non-academic or company-sponsored.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures ([`Paper`])
//! - [`sources`]: The PubMed E-utilities client (search + batch fetch)
//! - [`extract`]: MEDLINE XML extraction and affiliation classification
//! - [`output`]: Printing and CSV serialization
//! - [`utils`]: HTTP client wrapper

pub mod extract;
pub mod models;
pub mod output;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::Paper;
pub use sources::{PubMedSource, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
