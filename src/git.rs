use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlameError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program} blame' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Anything that can produce line-porcelain blame output for a file
pub trait BlameSource {
    fn blame(&self, path: &Path) -> Result<String, BlameError>;
}

/// Blame through an external version-control executable
pub struct GitBlame {
    program: String,
}

impl GitBlame {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl BlameSource for GitBlame {
    /// Run `<program> blame --line-porcelain <path>` and capture stdout
    fn blame(&self, path: &Path) -> Result<String, BlameError> {
        let output = Command::new(&self.program)
            .arg("blame")
            .arg("--line-porcelain")
            .arg(path)
            .output()
            .map_err(|source| BlameError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BlameError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
