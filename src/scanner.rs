//! Attribution of `--line-porcelain` blame output to authors
//!
//! Porcelain output repeats a header block before every source line. The only
//! parts that matter here are the `author <name>` header and the source line
//! itself, which git echoes prefixed with a tab:
//!
//! ```text
//! 1f0c2e... 1 1 1
//! author senchy26
//! author-mail <ryan@example.com>
//! ...
//! filename app.rb
//! 	puts "hello"
//! ```

use crate::aliases::AuthorAliases;
use crate::comments::CommentSyntax;
use crate::models::{Ledger, Tally};

const AUTHOR_MARKER: &str = "author ";
const SOURCE_MARKER: char = '\t';

/// State carried from one annotation line to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Normalized author of the most recent `author` header
    pub current_author: Option<String>,
    pub in_block_comment: bool,
}

/// Walks blame output for one file at a time
pub struct Scanner<'a> {
    aliases: &'a AuthorAliases,
    syntax: CommentSyntax,
}

impl<'a> Scanner<'a> {
    pub fn new(aliases: &'a AuthorAliases, syntax: CommentSyntax) -> Self {
        Self { aliases, syntax }
    }

    /// Tally every code line of `blame` under (author, `file`)
    ///
    /// Lines seen before any author header are dropped.
    pub fn scan<T: Tally>(&self, file: &str, blame: &str, ledger: &mut Ledger<T>) {
        let mut state = ScanState::default();

        for line in blame.lines() {
            let Some(code) = self.step(&mut state, line) else {
                continue;
            };
            if let Some(author) = &state.current_author {
                ledger.record(author, file, code);
            }
        }
    }

    /// Advance `state` past one annotation line
    ///
    /// Returns the trimmed source text when the line is code that counts.
    pub fn step<'l>(&self, state: &mut ScanState, line: &'l str) -> Option<&'l str> {
        if let Some(raw) = line.strip_prefix(AUTHOR_MARKER) {
            let raw = raw.trim();
            // A nameless header leaves following lines unattributed
            state.current_author = if raw.is_empty() {
                None
            } else {
                Some(self.aliases.normalize(raw).to_string())
            };
            return None;
        }

        let candidate = line.strip_prefix(SOURCE_MARKER)?.trim();

        if self.skip_block_comment(state, candidate) {
            return None;
        }

        if candidate.is_empty() || self.syntax.is_line_comment(candidate) {
            return None;
        }

        Some(candidate)
    }

    /// Update the block-comment flag; true if `candidate` belongs to a comment
    fn skip_block_comment(&self, state: &mut ScanState, candidate: &str) -> bool {
        let Some((open, close)) = self.syntax.block else {
            return false;
        };

        if state.in_block_comment {
            let closes = candidate.starts_with(close)
                || (self.syntax.close_anywhere && candidate.ends_with(close));
            if closes {
                state.in_block_comment = false;
            }
            return true;
        }

        if let Some(rest) = candidate.strip_prefix(open) {
            // `/* note */` opens and closes on the same line
            if !(self.syntax.close_anywhere && rest.contains(close)) {
                state.in_block_comment = true;
            }
            return true;
        }

        // A stray close marker is never code.
        candidate.starts_with(close)
    }
}
