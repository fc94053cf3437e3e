//! Utility modules supporting the fetch pipeline.

mod http;

pub use http::HttpClient;
