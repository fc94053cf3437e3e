//! The PubMed E-utilities client and its error taxonomy.

mod pubmed;

pub use pubmed::{PubMedSource, EUTILS_BASE_URL};

/// Errors that can occur when talking to the E-utilities API
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the API, with status and body for diagnosis
    #[error("PubMed API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Parsing error (XML or JSON)
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_status_and_body() {
        let err = SourceError::Api {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }
}
