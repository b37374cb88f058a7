use crate::models::{FileTally, Ledger};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

const FILE_HEADER: &str = "## File:";

/// Writes captured lines into one file per author
pub struct ContributionExporter {
    dir: PathBuf,
    extension: String,
}

impl ContributionExporter {
    pub fn new(dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            dir,
            extension: extension.into(),
        }
    }

    /// Path of the export file for `author`
    pub fn author_path(&self, author: &str) -> PathBuf {
        let name = sanitize_file_name(author);
        self.dir
            .join(format!("{}_contributions.{}", name, self.extension))
    }

    /// Write every author's lines, returning the files written
    pub fn export(&self, ledger: &Ledger<Vec<String>>) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut written = Vec::new();
        for (author, files) in ledger.authors() {
            let path = self.author_path(author);
            write_author_file(&path, files).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(written)
    }
}

fn write_author_file(path: &Path, files: &[FileTally<Vec<String>>]) -> std::io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for file in files {
        writeln!(out, "{} {}", FILE_HEADER, file.path)?;
        for line in &file.tally {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
    }
    out.flush()
}

/// Author names become file names; keep them inside the output directory
fn sanitize_file_name(author: &str) -> String {
    author.replace(['/', '\\'], "_")
}
