//! PubMed search and fetch client using the NCBI E-utilities API.

use serde::Deserialize;

use crate::sources::SourceError;
use crate::utils::HttpClient;

/// E-utilities API base URL
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// PubMed E-utilities client
///
/// Performs the bounded keyword search (`esearch.fcgi`, JSON id list) and
/// the batch record fetch (`efetch.fcgi`, MEDLINE XML). An optional
/// `NCBI_API_KEY` environment variable is passed through as the `api_key`
/// query parameter for higher rate limits.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl PubMedSource {
    /// Create a client against the live E-utilities endpoints
    pub fn new() -> Self {
        Self::with_base_url(EUTILS_BASE_URL)
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let api_key = std::env::var("NCBI_API_KEY").ok();
        Self {
            client: HttpClient::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Build the esearch URL for a query and result bound
    fn build_search_url(&self, query: &str, max_results: usize) -> String {
        // Records flagged as retracted are already excluded at the API
        // level; the extractor re-checks per record.
        let term = format!("{} NOT retracted[Publication Type]", query);
        let mut url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={}",
            self.base_url,
            urlencoding::encode(&term),
            max_results
        );
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Build the efetch URL for a batch of PMIDs
    fn build_fetch_url(&self, ids: &[String]) -> String {
        let mut url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            ids.join(",")
        );
        if let Some(key) = &self.api_key {
            url.push_str("&api_key=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Search PubMed, returning the ordered list of matching PMIDs
    /// (possibly empty).
    ///
    /// With `debug` set, the identifier count and list are printed to
    /// stderr.
    pub async fn search_ids(
        &self,
        query: &str,
        max_results: usize,
        debug: bool,
    ) -> Result<Vec<String>, SourceError> {
        let url = self.build_search_url(query, max_results);
        tracing::debug!(%url, "searching PubMed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to search PubMed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, body });
        }

        let result: ESearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search JSON: {}", e)))?;
        let ids = result.esearchresult.idlist;

        if debug {
            eprintln!("Found {} papers: {:?}", ids.len(), ids);
        }

        Ok(ids)
    }

    /// Fetch the full MEDLINE XML for the given PMIDs in one batch request.
    ///
    /// An empty id list short-circuits to an empty string without a
    /// network call.
    pub async fn fetch_records(&self, ids: &[String]) -> Result<String, SourceError> {
        if ids.is_empty() {
            return Ok(String::new());
        }

        let url = self.build_fetch_url(ids);
        tracing::debug!(count = ids.len(), "fetching PubMed records");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch PubMed details: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, body });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))
    }
}

impl Default for PubMedSource {
    fn default() -> Self {
        Self::new()
    }
}

/// esearch JSON response envelope
#[derive(Debug, Default, Deserialize)]
struct ESearchResponse {
    #[serde(default)]
    esearchresult: ESearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}
