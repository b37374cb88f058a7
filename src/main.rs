mod aliases;
mod commands;
mod comments;
mod config;
mod export;
mod git;
mod models;
mod report;
mod scanner;

use clap::Parser;
use colored::Colorize;
use comments::Language;
use std::path::PathBuf;

const USAGE: &str = "Usage: gitcontrib <file1> [<file2> ... <fileN>]";

/// Gitcontrib - who wrote the code that is still here
///
/// Runs `git blame --line-porcelain` on each file, attributes every surviving
/// code line to its last author, and reports line counts per author and file.
/// Blank lines and comments are not counted.
#[derive(Parser)]
#[command(name = "gitcontrib")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to attribute
    files: Vec<PathBuf>,

    /// Directory for per-author contribution files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extension of the contribution files
    #[arg(short, long)]
    extension: Option<String>,

    /// Only count lines; do not write contribution files
    #[arg(long)]
    no_export: bool,

    /// Comment syntax used to skip non-code lines
    #[arg(short, long, value_enum)]
    comments: Option<Language>,

    /// Finish with one total line per author
    #[arg(short, long)]
    summary: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to ./.gitcontrib.json, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Version control executable to run `blame` with
    #[arg(long)]
    vcs: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.files.is_empty() {
        eprintln!("{}", USAGE);
        eprintln!();
        eprintln!("For more information, try '{}'.", "gitcontrib --help".cyan());
        std::process::exit(1);
    }

    let result = commands::tally::execute(commands::tally::TallyOptions {
        files: cli.files,
        output_dir: cli.output_dir,
        extension: cli.extension,
        export: !cli.no_export,
        comments: cli.comments,
        summary: cli.summary,
        json: cli.json,
        config: cli.config,
        vcs: cli.vcs,
    });

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}
