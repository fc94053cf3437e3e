//! Output sink: plain-text printing and CSV serialization.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::Paper;

/// One CSV row with the fixed column order and the joined-string encoding
/// of the list fields.
#[derive(Debug, Serialize, Deserialize)]
pub struct CsvRecord {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

impl From<&Paper> for CsvRecord {
    fn from(paper: &Paper) -> Self {
        Self {
            pubmed_id: paper.pubmed_id.clone(),
            title: paper.title.clone(),
            publication_date: paper.publication_date.clone(),
            authors: paper.authors.join(", "),
            non_academic_authors: join_or_none(&paper.non_academic_authors),
            company_affiliations: join_or_none(&paper.company_affiliations),
            corresponding_email: paper.corresponding_email.clone(),
        }
    }
}

/// Print each paper as a plain-text block on stdout.
pub fn print_papers(papers: &[Paper]) {
    for paper in papers {
        let row = CsvRecord::from(paper);
        println!("PubmedID: {}", row.pubmed_id);
        println!("Title: {}", row.title);
        println!("Publication Date: {}", row.publication_date);
        println!("Authors: {}", row.authors);
        println!("Non-academic Author(s): {}", row.non_academic_authors);
        println!("Company Affiliation(s): {}", row.company_affiliations);
        println!("Corresponding Author Email: {}", row.corresponding_email);
        println!();
    }
}

/// Save papers to a CSV file with a header row.
///
/// An empty sequence prints "No data to save." and does not create the
/// file.
pub fn save_csv(path: &Path, papers: &[Paper]) -> Result<(), csv::Error> {
    if papers.is_empty() {
        println!("No data to save.");
        return Ok(());
    }

    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;

    for paper in papers {
        wtr.serialize(CsvRecord::from(paper))?;
    }

    wtr.flush()?;
    println!("Data saved to {}", path.display());
    Ok(())
}
