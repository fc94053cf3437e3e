//! Affiliation keyword classification.
//!
//! Two fixed, process-wide keyword tables drive the classification: an
//! affiliation with no academic keyword marks its author as non-academic,
//! and an affiliation with any company keyword is recorded as an industry
//! sponsor. Matching is case-insensitive substring containment; callers
//! pass the lowercased affiliation text.

/// Substrings marking an affiliation as academic
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "laboratory",
    "hospital",
    "school",
    "clinic",
    "medical center",
];

/// Substrings marking an affiliation as industry-sponsored
pub const COMPANY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "therapeutics",
    "biosciences",
    "genomics",
];

/// Whether a lowercased affiliation contains any academic keyword
pub fn is_academic(affiliation_lower: &str) -> bool {
    ACADEMIC_KEYWORDS
        .iter()
        .any(|kw| affiliation_lower.contains(kw))
}

/// Whether a lowercased affiliation contains any company keyword
pub fn is_company(affiliation_lower: &str) -> bool {
    COMPANY_KEYWORDS
        .iter()
        .any(|kw| affiliation_lower.contains(kw))
}
