use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// What the ledger keeps for each (author, file) pair
pub trait Tally: Default {
    fn record(&mut self, line: &str);

    /// Number of code lines recorded so far
    fn count(&self) -> usize;
}

/// Counting variant
impl Tally for usize {
    fn record(&mut self, _line: &str) {
        *self += 1;
    }

    fn count(&self) -> usize {
        *self
    }
}

/// Line-capturing variant
impl Tally for Vec<String> {
    fn record(&mut self, line: &str) {
        self.push(line.to_string());
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// Contributions of one author to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally<T> {
    pub path: String,
    pub tally: T,
}

/// Attributed lines keyed by author, then by file
///
/// Authors iterate in name order; files under an author iterate in the
/// order they were first recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger<T> {
    authors: BTreeMap<String, Vec<FileTally<T>>>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            authors: BTreeMap::new(),
        }
    }
}

impl<T: Tally> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, author: &str, file: &str, line: &str) {
        let files = self.authors.entry(author.to_string()).or_default();
        match files.iter_mut().find(|f| f.path == file) {
            Some(entry) => entry.tally.record(line),
            None => {
                let mut tally = T::default();
                tally.record(line);
                files.push(FileTally {
                    path: file.to_string(),
                    tally,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn authors(&self) -> impl Iterator<Item = (&str, &[FileTally<T>])> {
        self.authors
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    /// Code lines attributed to `author` across all files
    pub fn total(&self, author: &str) -> usize {
        self.authors
            .get(author)
            .map(|files| files.iter().map(|f| f.tally.count()).sum())
            .unwrap_or(0)
    }
}

/// JSON shape of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ContributionReport {
    pub generated_at: DateTime<Utc>,
    pub authors: Vec<AuthorSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub name: String,
    pub total_lines: usize,
    pub files: Vec<FileSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub lines: usize,
}

impl ContributionReport {
    pub fn from_ledger<T: Tally>(ledger: &Ledger<T>) -> Self {
        let authors = ledger
            .authors()
            .map(|(name, files)| AuthorSummary {
                name: name.to_string(),
                total_lines: ledger.total(name),
                files: files
                    .iter()
                    .map(|f| FileSummary {
                        path: f.path.clone(),
                        lines: f.tally.count(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            authors,
        }
    }
}
