use crate::aliases::AuthorAliases;
use crate::comments::Language;
use crate::config::{Config, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_VCS};
use crate::export::ContributionExporter;
use crate::git::{BlameSource, GitBlame};
use crate::models::{Ledger, Tally};
use crate::report;
use crate::scanner::Scanner;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("The file '{0}' does not exist in the current directory.")]
    Missing(String),
}

pub struct TallyOptions {
    pub files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub export: bool,
    pub comments: Option<Language>,
    pub summary: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
    pub vcs: Option<String>,
}

pub fn execute(options: TallyOptions) -> Result<(), Box<dyn std::error::Error>> {
    // All inputs must exist before anything is blamed
    if let Some(missing) = options.files.iter().find(|f| !f.is_file()) {
        return Err(InputError::Missing(missing.display().to_string()).into());
    }

    let config = Config::load(options.config.as_deref())?;
    let aliases = AuthorAliases::new(config.aliases)?;
    let language = options.comments.or(config.comments).unwrap_or_default();
    let vcs = options
        .vcs
        .or(config.vcs)
        .unwrap_or_else(|| DEFAULT_VCS.to_string());
    let source = GitBlame::new(vcs);

    if !options.export {
        let ledger: Ledger<usize> = collect(&source, &options.files, &aliases, language);
        return present(&ledger, options.summary, options.json);
    }

    let ledger: Ledger<Vec<String>> = collect(&source, &options.files, &aliases, language);

    if !ledger.is_empty() {
        let dir = options
            .output_dir
            .or(config.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let extension = options
            .extension
            .or(config.extension)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        let written = ContributionExporter::new(dir.clone(), extension).export(&ledger)?;
        eprintln!(
            "{} Wrote {} contribution file(s) to {}",
            "Info:".blue(),
            written.len(),
            dir.display().to_string().cyan()
        );
    }

    present(&ledger, options.summary, options.json)
}

/// Blame and scan each file in turn
///
/// A file whose blame fails is reported and skipped; the rest still count.
pub fn collect<T: Tally, S: BlameSource>(
    source: &S,
    files: &[PathBuf],
    aliases: &AuthorAliases,
    language: Language,
) -> Ledger<T> {
    let mut ledger = Ledger::new();

    for file in files {
        let blame = match source.blame(file) {
            Ok(blame) => blame,
            Err(e) => {
                eprintln!(
                    "{} Skipping {}: {}",
                    "Warning:".yellow(),
                    file.display(),
                    e
                );
                continue;
            }
        };

        let scanner = Scanner::new(aliases, language.syntax_for(file));
        scanner.scan(&file.to_string_lossy(), &blame, &mut ledger);
    }

    ledger
}

fn present<T: Tally>(
    ledger: &Ledger<T>,
    summary: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        report::write_json(&mut out, ledger)?;
    } else {
        report::write_console(&mut out, ledger, summary)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::BlameError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    /// Canned blame output keyed by path; unknown paths fail
    struct FakeBlame {
        outputs: HashMap<PathBuf, String>,
        calls: RefCell<Vec<PathBuf>>,
    }

    impl FakeBlame {
        fn new(outputs: &[(&str, &str)]) -> Self {
            Self {
                outputs: outputs
                    .iter()
                    .map(|(path, out)| (PathBuf::from(path), out.to_string()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BlameSource for FakeBlame {
        fn blame(&self, path: &Path) -> Result<String, BlameError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            self.outputs
                .get(path)
                .cloned()
                .ok_or_else(|| BlameError::Launch {
                    program: "fake".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such path"),
                })
        }
    }

    fn files(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn skips_files_whose_blame_fails() {
        let source = FakeBlame::new(&[("g.txt", "author A\n\tx = 1\n\ty = 2\n")]);
        let ledger: Ledger<usize> = collect(
            &source,
            &files(&["f.txt", "g.txt"]),
            &AuthorAliases::builtin(),
            Language::Ruby,
        );

        let entries: Vec<_> = ledger
            .authors()
            .flat_map(|(_, files)| files.iter().map(|f| (f.path.clone(), f.tally)))
            .collect();
        assert_eq!(entries, [("g.txt".to_string(), 2)]);
        assert_eq!(*source.calls.borrow(), files(&["f.txt", "g.txt"]));
    }

    #[test]
    fn all_failures_leave_ledger_empty() {
        let source = FakeBlame::new(&[]);
        let ledger: Ledger<Vec<String>> = collect(
            &source,
            &files(&["a.rb", "b.rb"]),
            &AuthorAliases::builtin(),
            Language::Auto,
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn picks_comment_syntax_per_file() {
        let source = FakeBlame::new(&[
            ("a.rb", "author A\n\t// not a ruby comment\n\t# ruby comment\n"),
            ("b.c", "author A\n\t// c comment\n\t# define X\n"),
        ]);
        let ledger: Ledger<Vec<String>> = collect(
            &source,
            &files(&["a.rb", "b.c"]),
            &AuthorAliases::builtin(),
            Language::Auto,
        );

        let (_, files) = ledger.authors().next().unwrap();
        assert_eq!(files[0].path, "a.rb");
        assert_eq!(files[0].tally, ["// not a ruby comment"]);
        assert_eq!(files[1].path, "b.c");
        assert_eq!(files[1].tally, ["# define X"]);
    }

    #[test]
    fn files_follow_argument_order() {
        let source = FakeBlame::new(&[
            ("z.rb", "author A\n\tz\n"),
            ("a.rb", "author A\n\ta\n"),
        ]);
        let ledger: Ledger<usize> = collect(
            &source,
            &files(&["z.rb", "a.rb"]),
            &AuthorAliases::builtin(),
            Language::Ruby,
        );
        let (_, files) = ledger.authors().next().unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["z.rb", "a.rb"]);
    }

    #[test]
    fn missing_input_fails_before_blaming() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.rb");
        let err = execute(TallyOptions {
            files: vec![missing.clone()],
            output_dir: Some(dir.path().join("out")),
            extension: None,
            export: true,
            comments: None,
            summary: false,
            json: false,
            config: None,
            vcs: Some("gitcontrib-no-such-vcs".to_string()),
        })
        .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("absent.rb"));
        assert!(!dir.path().join("out").exists());
    }
}
