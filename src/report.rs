use crate::models::{ContributionReport, Ledger, Tally};
use colored::Colorize;
use std::io::{self, Write};

/// Per-author breakdown, optionally followed by a totals-only summary
pub fn write_console<T: Tally, W: Write>(
    out: &mut W,
    ledger: &Ledger<T>,
    summary: bool,
) -> io::Result<()> {
    if ledger.is_empty() {
        writeln!(out, "No contributions found.")?;
        return Ok(());
    }

    for (author, files) in ledger.authors() {
        writeln!(out, "{} {}", "Author:".bold(), author.yellow().bold())?;
        for file in files {
            writeln!(
                out,
                "  {}: {} lines",
                file.path.cyan(),
                file.tally.count()
            )?;
        }
        writeln!(
            out,
            "  {} {}",
            "Total lines:".bold(),
            ledger.total(author).to_string().green()
        )?;
        writeln!(out)?;
    }

    if summary {
        writeln!(out, "{}", "Summary".bold().underline())?;
        for (author, _) in ledger.authors() {
            writeln!(out, "  {}: {} lines", author.yellow(), ledger.total(author))?;
        }
    }

    Ok(())
}

pub fn write_json<T: Tally, W: Write>(out: &mut W, ledger: &Ledger<T>) -> io::Result<()> {
    let report = ContributionReport::from_ledger(ledger);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
