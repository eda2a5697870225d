//! CSV corpus loader
//!
//! Parses the paper table into typed [`PaperRecord`]s and the secondary
//! citation tables into [`CitationPaper`]/[`CitationLink`] rows.
//!
//! Loading is the only I/O in the core; everything downstream operates on
//! the returned snapshot. Row-level defects are collected as warnings and
//! never abort a load; only a missing or structurally unreadable source is
//! an error.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use paperscope_common::config::CorpusConfig;
use paperscope_common::errors::{AppError, LoadWarning, Result};
use paperscope_common::models::{CitationLink, CitationPaper, PaperRecord};
use paperscope_common::DEFAULT_FIELD_DELIMITER;

/// A loaded corpus snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    /// Parsed paper rows in source order (duplicate titles kept; builders
    /// resolve them last-row-wins)
    pub papers: Vec<PaperRecord>,

    /// Row-level defects observed during the load
    pub warnings: Vec<LoadWarning>,
}

/// The secondary citation tables, joined downstream by `paper_id`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationCorpus {
    pub papers: Vec<CitationPaper>,

    pub links: Vec<CitationLink>,

    pub warnings: Vec<LoadWarning>,
}

/// CSV loader for the paper and citation tables
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    /// Separator for multi-value cells (authors, keywords, cited papers)
    delimiter: char,
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_FIELD_DELIMITER,
        }
    }
}

/// Column indexes resolved from the header row
struct PaperColumns {
    title: usize,
    authors: Option<usize>,
    keywords: Option<usize>,
    publisher: Option<usize>,
    ranking: Option<usize>,
    year: Option<usize>,
    cited_papers: Option<usize>,
    link: Option<usize>,
}

impl CorpusLoader {
    /// Create a loader with an explicit multi-value delimiter
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Create a loader from the corpus configuration section
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(config.delimiter)
    }

    /// Load the paper table from a CSV file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Corpus> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|_| AppError::CorpusNotFound {
            path: path.display().to_string(),
        })?;

        let corpus = self.parse(file, &path.display().to_string())?;
        info!(
            path = %path.display(),
            papers = corpus.papers.len(),
            warnings = corpus.warnings.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Parse the paper table from any reader
    pub fn parse(&self, reader: impl Read, source: &str) -> Result<Corpus> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| parse_error(source, e))?
            .clone();

        let columns = PaperColumns::resolve(&headers, source)?;

        let mut corpus = Corpus::default();
        let mut seen_titles: HashSet<String> = HashSet::new();

        for (idx, record) in csv_reader.records().enumerate() {
            // 1-based data row number for warnings
            let row = idx + 1;
            let record = record.map_err(|e| parse_error(source, e))?;

            let title = cell(&record, Some(columns.title));
            let Some(title) = title else {
                warn!(source, row, "skipping row without a title");
                corpus.warnings.push(LoadWarning::MissingTitle { row });
                continue;
            };

            if !seen_titles.insert(title.clone()) {
                warn!(source, row, %title, "duplicate title, later row wins");
                corpus.warnings.push(LoadWarning::DuplicateTitle {
                    row,
                    title: title.clone(),
                });
            }

            let year_cell = cell(&record, columns.year);
            let year = match year_cell {
                Some(raw) => match raw.parse::<i32>() {
                    Ok(y) => Some(y),
                    Err(_) => {
                        corpus
                            .warnings
                            .push(LoadWarning::UnparseableYear { row, value: raw });
                        None
                    }
                },
                None => None,
            };

            corpus.papers.push(PaperRecord {
                title,
                authors: self.split_multi(&record, columns.authors),
                keywords: self.split_multi(&record, columns.keywords).into_iter().collect(),
                publisher: cell(&record, columns.publisher),
                ranking: cell(&record, columns.ranking),
                year,
                cited_papers: self.split_multi(&record, columns.cited_papers),
                link: cell(&record, columns.link),
            });
        }

        Ok(corpus)
    }

    /// Load the secondary citation tables
    pub fn load_citation_corpus(
        &self,
        papers_path: impl AsRef<Path>,
        links_path: impl AsRef<Path>,
    ) -> Result<CitationCorpus> {
        let papers_path = papers_path.as_ref();
        let links_path = links_path.as_ref();

        let papers_file =
            std::fs::File::open(papers_path).map_err(|_| AppError::CorpusNotFound {
                path: papers_path.display().to_string(),
            })?;
        let links_file = std::fs::File::open(links_path).map_err(|_| AppError::CorpusNotFound {
            path: links_path.display().to_string(),
        })?;

        let corpus = self.parse_citation_corpus(
            papers_file,
            &papers_path.display().to_string(),
            links_file,
            &links_path.display().to_string(),
        )?;
        info!(
            papers = corpus.papers.len(),
            links = corpus.links.len(),
            warnings = corpus.warnings.len(),
            "citation corpus loaded"
        );
        Ok(corpus)
    }

    /// Parse the citation tables from any pair of readers
    pub fn parse_citation_corpus(
        &self,
        papers_reader: impl Read,
        papers_source: &str,
        links_reader: impl Read,
        links_source: &str,
    ) -> Result<CitationCorpus> {
        let mut corpus = CitationCorpus::default();

        let mut paper_csv = csv::Reader::from_reader(papers_reader);
        let headers = paper_csv
            .headers()
            .map_err(|e| parse_error(papers_source, e))?
            .clone();
        let paper_id_col = require_column(&headers, "paper_id", papers_source)?;
        let title_col = require_column(&headers, "title", papers_source)?;
        let authors_col = find_column(&headers, "authors");
        let keywords_col = find_column(&headers, "keywords");

        for (idx, record) in paper_csv.records().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| parse_error(papers_source, e))?;

            let (Some(paper_id), Some(title)) = (
                cell(&record, Some(paper_id_col)),
                cell(&record, Some(title_col)),
            ) else {
                warn!(source = papers_source, row, "skipping row without id or title");
                corpus.warnings.push(LoadWarning::MissingTitle { row });
                continue;
            };

            corpus.papers.push(CitationPaper {
                paper_id,
                title,
                authors: self.split_multi(&record, authors_col),
                keywords: self.split_multi(&record, keywords_col).into_iter().collect(),
            });
        }

        let mut link_csv = csv::Reader::from_reader(links_reader);
        let headers = link_csv
            .headers()
            .map_err(|e| parse_error(links_source, e))?
            .clone();
        let source_col = require_column(&headers, "source_id", links_source)?;
        let target_col = require_column(&headers, "target_id", links_source)?;

        for record in link_csv.records() {
            let record = record.map_err(|e| parse_error(links_source, e))?;
            let (Some(source_id), Some(target_id)) = (
                cell(&record, Some(source_col)),
                cell(&record, Some(target_col)),
            ) else {
                continue;
            };
            corpus.links.push(CitationLink {
                source_id,
                target_id,
            });
        }

        Ok(corpus)
    }

    /// Split a multi-value cell, trimming tokens and dropping empties
    fn split_multi(&self, record: &StringRecord, column: Option<usize>) -> Vec<String> {
        let Some(raw) = column.and_then(|c| record.get(c)) else {
            return Vec::new();
        };
        raw.split(self.delimiter)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl PaperColumns {
    fn resolve(headers: &StringRecord, source: &str) -> Result<Self> {
        Ok(Self {
            title: require_column(headers, "title", source)?,
            authors: find_column(headers, "authors"),
            keywords: find_column(headers, "keywords"),
            publisher: find_column(headers, "publisher"),
            ranking: find_column(headers, "ranking"),
            year: find_column(headers, "year"),
            cited_papers: find_column(headers, "cited_papers"),
            link: find_column(headers, "link"),
        })
    }
}

/// Trimmed cell value; empty becomes `None`
fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    let raw = column.and_then(|c| record.get(c))?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require_column(headers: &StringRecord, name: &str, source: &str) -> Result<usize> {
    find_column(headers, name).ok_or_else(|| AppError::CorpusParse {
        path: source.to_string(),
        message: format!("missing required column {name:?}"),
    })
}

fn parse_error(source: &str, err: csv::Error) -> AppError {
    AppError::CorpusParse {
        path: source.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Corpus {
        CorpusLoader::default()
            .parse(data.as_bytes(), "test.csv")
            .unwrap()
    }

    #[test]
    fn test_parses_full_row() {
        let corpus = parse(
            "title,authors,keywords,publisher,ranking,year,cited_papers,link\n\
             Paper A,X; Y,nlp;vision,ACM,A*,2021,Paper B;Paper C,https://example.org/a\n",
        );

        assert_eq!(corpus.papers.len(), 1);
        let paper = &corpus.papers[0];
        assert_eq!(paper.title, "Paper A");
        assert_eq!(paper.authors, vec!["X", "Y"]);
        assert!(paper.keywords.contains("nlp") && paper.keywords.contains("vision"));
        assert_eq!(paper.publisher.as_deref(), Some("ACM"));
        assert_eq!(paper.ranking.as_deref(), Some("A*"));
        assert_eq!(paper.year, Some(2021));
        assert_eq!(paper.cited_papers, vec!["Paper B", "Paper C"]);
        assert_eq!(paper.link.as_deref(), Some("https://example.org/a"));
        assert!(corpus.warnings.is_empty());
    }

    #[test]
    fn test_missing_optional_fields_become_empty_values() {
        let corpus = parse("title,authors\nPaper A,X\n");

        let paper = &corpus.papers[0];
        assert!(paper.keywords.is_empty());
        assert!(paper.publisher.is_none());
        assert!(paper.ranking.is_none());
        assert!(paper.year.is_none());
        assert!(paper.cited_papers.is_empty());
        assert!(paper.link.is_none());
    }

    #[test]
    fn test_empty_tokens_dropped_from_multi_value_cells() {
        let corpus = parse("title,authors\nPaper A,\"X;; Y ;\"\n");
        assert_eq!(corpus.papers[0].authors, vec!["X", "Y"]);
    }

    #[test]
    fn test_unparseable_year_warns_and_continues() {
        let corpus = parse("title,year\nPaper A,20xx\nPaper B,2020\n");

        assert_eq!(corpus.papers.len(), 2);
        assert_eq!(corpus.papers[0].year, None);
        assert_eq!(corpus.papers[1].year, Some(2020));
        assert_eq!(
            corpus.warnings,
            vec![LoadWarning::UnparseableYear {
                row: 1,
                value: "20xx".into()
            }]
        );
    }

    #[test]
    fn test_untitled_row_skipped_with_warning() {
        let corpus = parse("title,authors\n   ,X\nPaper B,Y\n");

        assert_eq!(corpus.papers.len(), 1);
        assert_eq!(corpus.papers[0].title, "Paper B");
        assert_eq!(corpus.warnings, vec![LoadWarning::MissingTitle { row: 1 }]);
    }

    #[test]
    fn test_duplicate_title_surfaced() {
        let corpus = parse("title,authors\nPaper A,X\nPaper A,Y\n");

        assert_eq!(corpus.papers.len(), 2);
        assert_eq!(
            corpus.warnings,
            vec![LoadWarning::DuplicateTitle {
                row: 2,
                title: "Paper A".into()
            }]
        );
    }

    #[test]
    fn test_missing_title_column_is_parse_error() {
        let err = CorpusLoader::default()
            .parse("authors\nX\n".as_bytes(), "test.csv")
            .unwrap_err();
        assert!(matches!(err, AppError::CorpusParse { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = CorpusLoader::default()
            .load("does/not/exist.csv")
            .unwrap_err();
        assert!(matches!(err, AppError::CorpusNotFound { .. }));
        assert!(err.is_no_data());
    }

    #[test]
    fn test_citation_corpus_join_tables() {
        let corpus = CorpusLoader::default()
            .parse_citation_corpus(
                "paper_id,title,authors,keywords\nP1,Paper A,X,nlp\nP2,Paper B,Y,vision\n"
                    .as_bytes(),
                "papers.csv",
                "source_id,target_id\nP1,P2\n".as_bytes(),
                "citations.csv",
            )
            .unwrap();

        assert_eq!(corpus.papers.len(), 2);
        assert_eq!(corpus.papers[0].paper_id, "P1");
        assert_eq!(
            corpus.links,
            vec![CitationLink {
                source_id: "P1".into(),
                target_id: "P2".into()
            }]
        );
    }
}
