//! Paper model representing one extracted PubMed record.

use serde::{Deserialize, Serialize};

/// An extracted PubMed paper with author affiliation classification.
///
/// Built in a single pass by the extractor and not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed identifier (PMID), unique per paper
    pub pubmed_id: String,

    /// Paper title ("No Title" when the record carries none)
    pub title: String,

    /// Publication year ("Unknown" when the record carries none)
    pub publication_date: String,

    /// Author display names in document order, duplicates included
    pub authors: Vec<String>,

    /// Authors whose first affiliation matches no academic keyword
    pub non_academic_authors: Vec<String>,

    /// Distinct original-case affiliations matching a company keyword
    pub company_affiliations: Vec<String>,

    /// Always "N/A": the MEDLINE record set carries no corresponding
    /// email field, so this stays a placeholder
    pub corresponding_email: String,
}

impl Paper {
    /// Create a paper with the given bibliographic fields and empty
    /// author lists.
    pub fn new(
        pubmed_id: impl Into<String>,
        title: impl Into<String>,
        publication_date: impl Into<String>,
    ) -> Self {
        Self {
            pubmed_id: pubmed_id.into(),
            title: title.into(),
            publication_date: publication_date.into(),
            authors: Vec::new(),
            non_academic_authors: Vec::new(),
            company_affiliations: Vec::new(),
            corresponding_email: "N/A".to_string(),
        }
    }

    /// Whether any author was classified as non-academic
    pub fn has_non_academic_authors(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }

    /// Whether any company affiliation was recorded
    pub fn has_company_affiliations(&self) -> bool {
        !self.company_affiliations.is_empty()
    }
}
