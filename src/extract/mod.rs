//! MEDLINE XML extraction and author classification.
//!
//! Turns the raw `efetch.fcgi` payload into [`Paper`] records: defaults
//! missing bibliographic fields, drops retracted records entirely, and
//! classifies each author by their first listed affiliation.

pub mod classify;

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::models::Paper;
use crate::sources::SourceError;

/// Default title for records without an `ArticleTitle`
const NO_TITLE: &str = "No Title";

/// Default for missing publication years and author name parts
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    articles: Vec<PubmedArticle>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct PubmedArticle {
    MedlineCitation: Option<MedlineCitation>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct MedlineCitation {
    PMID: Option<Pmid>,
    Article: Option<Article>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct Pmid {
    #[serde(rename = "$text")]
    id: String,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct Article {
    Journal: Option<Journal>,
    ArticleTitle: Option<ArticleTitle>,
    AuthorList: Option<AuthorList>,
    PublicationTypeList: Option<PublicationTypeList>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct Journal {
    JournalIssue: Option<JournalIssue>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct JournalIssue {
    PubDate: Option<PubDate>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct PubDate {
    Year: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct ArticleTitle {
    #[serde(rename = "$text")]
    title: String,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct AuthorList {
    #[serde(rename = "Author", default)]
    authors: Vec<Author>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct Author {
    LastName: Option<LastName>,
    ForeName: Option<ForeName>,
    #[serde(rename = "AffiliationInfo", default)]
    affiliations: Vec<AffiliationInfo>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct LastName {
    #[serde(rename = "$text")]
    name: String,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct ForeName {
    #[serde(rename = "$text")]
    name: String,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct AffiliationInfo {
    Affiliation: Option<Affiliation>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct Affiliation {
    #[serde(rename = "$text")]
    text: String,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct PublicationTypeList {
    #[serde(rename = "PublicationType", default)]
    types: Vec<PublicationType>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct PublicationType {
    #[serde(rename = "$text")]
    text: String,
}

/// Whether a record is retracted: either a publication-type annotation or
/// a "retracted:" title prefix is sufficient on its own.
fn is_retracted(title: &str, types: &[PublicationType]) -> bool {
    let flagged = types.iter().any(|pt| {
        let t = pt.text.to_lowercase();
        t == "retracted publication" || t == "retraction of publication"
    });
    flagged || title.to_lowercase().contains("retracted:")
}

/// Process raw efetch XML into [`Paper`] records, in document order.
///
/// Empty input yields an empty vector without error. Retracted records are
/// excluded entirely; missing fields are defaulted, never raised. With
/// `debug` set, the processed-record count is printed to stderr.
pub fn process_records(xml: &str, debug: bool) -> Result<Vec<Paper>, SourceError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let set: PubmedArticleSet = from_str(xml)
        .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed fetch XML: {}", e)))?;

    let mut results = Vec::new();

    for article in set.articles {
        let citation = article.MedlineCitation.as_ref();

        let pubmed_id = citation
            .and_then(|m| m.PMID.as_ref())
            .map(|p| p.id.clone())
            .unwrap_or_default();

        let inner = citation.and_then(|m| m.Article.as_ref());

        let title = inner
            .and_then(|a| a.ArticleTitle.as_ref())
            .map(|t| t.title.clone())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let pub_types = inner
            .and_then(|a| a.PublicationTypeList.as_ref())
            .map(|ptl| ptl.types.as_slice())
            .unwrap_or_default();

        if is_retracted(&title, pub_types) {
            continue;
        }

        let publication_date = inner
            .and_then(|a| a.Journal.as_ref())
            .and_then(|j| j.JournalIssue.as_ref())
            .and_then(|ji| ji.PubDate.as_ref())
            .and_then(|pd| pd.Year.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let mut paper = Paper::new(pubmed_id, title, publication_date);

        let authors = inner
            .and_then(|a| a.AuthorList.as_ref())
            .map(|al| al.authors.as_slice())
            .unwrap_or_default();

        for author in authors {
            let name = match (&author.ForeName, &author.LastName) {
                (Some(first), Some(last)) => format!("{} {}", first.name, last.name),
                _ => UNKNOWN.to_string(),
            };
            paper.authors.push(name.clone());

            // Only the first listed affiliation is consulted; widening to
            // all affiliations would change classification outcomes.
            let affiliation = author
                .affiliations
                .first()
                .and_then(|ai| ai.Affiliation.as_ref());

            if let Some(affiliation) = affiliation {
                let lowered = affiliation.text.to_lowercase();

                if !classify::is_academic(&lowered) {
                    paper.non_academic_authors.push(name);
                }

                if classify::is_company(&lowered)
                    && !paper.company_affiliations.contains(&affiliation.text)
                {
                    paper.company_affiliations.push(affiliation.text.clone());
                }
            }
        }

        results.push(paper);
    }

    if debug {
        eprintln!("Processed {} papers.", results.len());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(pmid: &str, title: &str, year: &str, body: &str) -> String {
        format!(
            r#"<PubmedArticle>
                 <MedlineCitation>
                   <PMID>{pmid}</PMID>
                   <Article>
                     <Journal><JournalIssue><PubDate><Year>{year}</Year></PubDate></JournalIssue></Journal>
                     <ArticleTitle>{title}</ArticleTitle>
                     {body}
                   </Article>
                 </MedlineCitation>
               </PubmedArticle>"#
        )
    }

    fn wrap(articles: &str) -> String {
        format!("<PubmedArticleSet>{}</PubmedArticleSet>", articles)
    }

    fn author(fore: &str, last: &str, affiliation: &str) -> String {
        format!(
            r#"<Author>
                 <LastName>{last}</LastName>
                 <ForeName>{fore}</ForeName>
                 <AffiliationInfo><Affiliation>{affiliation}</Affiliation></AffiliationInfo>
               </Author>"#
        )
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(process_records("", false).unwrap().is_empty());
        assert!(process_records("   \n", false).unwrap().is_empty());
    }

    #[test]
    fn test_no_well_formed_records_yields_empty_sequence() {
        let papers = process_records("<PubmedArticleSet></PubmedArticleSet>", false).unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_a_parse_error() {
        let err = process_records("<PubmedArticleSet><oops", false).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_retracted_title_excluded_case_insensitively() {
        let xml = wrap(&article("1", "RETRACTED: Old Study", "2019", ""));
        assert!(process_records(&xml, false).unwrap().is_empty());
    }

    #[test]
    fn test_retraction_publication_type_excluded() {
        for pub_type in ["Retracted Publication", "retraction of publication"] {
            let body = format!(
                "<PublicationTypeList><PublicationType>{}</PublicationType></PublicationTypeList>",
                pub_type
            );
            let xml = wrap(&article("1", "Fine Title", "2020", &body));
            assert!(
                process_records(&xml, false).unwrap().is_empty(),
                "publication type {:?} should exclude the record",
                pub_type
            );
        }
    }

    #[test]
    fn test_ordinary_publication_type_kept() {
        let body = "<PublicationTypeList><PublicationType>Journal Article</PublicationType></PublicationTypeList>";
        let xml = wrap(&article("1", "Fine Title", "2020", body));
        assert_eq!(process_records(&xml, false).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_title_and_year_are_defaulted() {
        let xml = wrap(
            r#"<PubmedArticle>
                 <MedlineCitation>
                   <PMID>42</PMID>
                   <Article></Article>
                 </MedlineCitation>
               </PubmedArticle>"#,
        );
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].pubmed_id, "42");
        assert_eq!(papers[0].title, "No Title");
        assert_eq!(papers[0].publication_date, "Unknown");
    }

    #[test]
    fn test_record_without_authors_still_emitted() {
        let xml = wrap(&article("7", "Authorless", "2021", ""));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers.len(), 1);
        assert!(papers[0].authors.is_empty());
        assert!(papers[0].non_academic_authors.is_empty());
        assert!(papers[0].company_affiliations.is_empty());
    }

    #[test]
    fn test_author_name_defaults_to_unknown() {
        let body = r#"<AuthorList>
                        <Author><LastName>Solo</LastName></Author>
                        <Author><ForeName>Only</ForeName></Author>
                      </AuthorList>"#;
        let xml = wrap(&article("7", "Names", "2021", body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].authors, vec!["Unknown", "Unknown"]);
    }

    #[test]
    fn test_duplicate_authors_are_kept() {
        let body = format!(
            "<AuthorList>{}{}</AuthorList>",
            author("Jane", "Doe", "Harvard University"),
            author("Jane", "Doe", "Harvard University"),
        );
        let xml = wrap(&article("7", "Twice", "2021", &body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].authors, vec!["Jane Doe", "Jane Doe"]);
    }

    #[test]
    fn test_academic_author_not_flagged() {
        let body = format!(
            "<AuthorList>{}</AuthorList>",
            author("Jane", "Doe", "Department of Oncology, Harvard University")
        );
        let xml = wrap(&article("1", "Study", "2023", &body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].authors, vec!["Jane Doe"]);
        assert!(papers[0].non_academic_authors.is_empty());
        assert!(papers[0].company_affiliations.is_empty());
    }

    #[test]
    fn test_company_affiliation_recorded_in_original_case() {
        let body = format!(
            "<AuthorList>{}</AuthorList>",
            author("Jane", "Doe", "Acme Therapeutics Inc.")
        );
        let xml = wrap(&article("1", "Study", "2023", &body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].non_academic_authors, vec!["Jane Doe"]);
        assert_eq!(papers[0].company_affiliations, vec!["Acme Therapeutics Inc."]);
    }

    #[test]
    fn test_company_affiliations_deduplicated() {
        let body = format!(
            "<AuthorList>{}{}</AuthorList>",
            author("Jane", "Doe", "Acme Pharma GmbH"),
            author("John", "Roe", "Acme Pharma GmbH"),
        );
        let xml = wrap(&article("1", "Study", "2023", &body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].non_academic_authors, vec!["Jane Doe", "John Roe"]);
        assert_eq!(papers[0].company_affiliations, vec!["Acme Pharma GmbH"]);
    }

    #[test]
    fn test_author_without_affiliation_only_listed() {
        let body = r#"<AuthorList>
                        <Author>
                          <LastName>Doe</LastName>
                          <ForeName>Jane</ForeName>
                        </Author>
                      </AuthorList>"#;
        let xml = wrap(&article("1", "Study", "2023", body));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers[0].authors, vec!["Jane Doe"]);
        assert!(papers[0].non_academic_authors.is_empty());
        assert!(papers[0].company_affiliations.is_empty());
    }

    #[test]
    fn test_only_first_affiliation_is_consulted() {
        let body = r#"<AuthorList>
                        <Author>
                          <LastName>Doe</LastName>
                          <ForeName>Jane</ForeName>
                          <AffiliationInfo><Affiliation>Acme Pharma GmbH</Affiliation></AffiliationInfo>
                          <AffiliationInfo><Affiliation>Oxford University</Affiliation></AffiliationInfo>
                        </Author>
                      </AuthorList>"#;
        let xml = wrap(&article("1", "Study", "2023", body));
        let papers = process_records(&xml, false).unwrap();
        // The academic second affiliation must not rescue the author
        assert_eq!(papers[0].non_academic_authors, vec!["Jane Doe"]);
        assert_eq!(papers[0].company_affiliations, vec!["Acme Pharma GmbH"]);
    }

    #[test]
    fn test_debug_mode_returns_same_records() {
        let body = format!(
            "<AuthorList>{}</AuthorList>",
            author("Jane", "Doe", "Acme Pharma GmbH")
        );
        let xml = wrap(&article("1", "Study", "2023", &body));

        // The debug flag only adds stderr diagnostics
        let quiet = process_records(&xml, false).unwrap();
        let chatty = process_records(&xml, true).unwrap();
        assert_eq!(quiet.len(), chatty.len());
        assert_eq!(quiet[0].pubmed_id, chatty[0].pubmed_id);
        assert_eq!(quiet[0].non_academic_authors, chatty[0].non_academic_authors);
        assert_eq!(quiet[0].company_affiliations, chatty[0].company_affiliations);
    }

    #[test]
    fn test_records_emitted_in_document_order() {
        let xml = wrap(&format!(
            "{}{}",
            article("111", "First Study", "2022", ""),
            article("222", "Second Study", "2023", ""),
        ));
        let papers = process_records(&xml, false).unwrap();
        let ids: Vec<_> = papers.iter().map(|p| p.pubmed_id.as_str()).collect();
        assert_eq!(ids, vec!["111", "222"]);
    }

    #[test]
    fn test_mixed_retracted_and_valid() {
        let body = format!(
            "<AuthorList>{}</AuthorList>",
            author("Jane", "Doe", "Acme Biotech Labs")
        );
        let xml = wrap(&format!(
            "{}{}",
            article("111", "Retracted: Old Study", "2019", ""),
            article("222", "New Study", "2023", &body),
        ));
        let papers = process_records(&xml, false).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "New Study");
        assert_eq!(papers[0].non_academic_authors, vec!["Jane Doe"]);
        assert_eq!(papers[0].company_affiliations, vec!["Acme Biotech Labs"]);
    }
}
