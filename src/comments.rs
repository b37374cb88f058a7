use serde::Deserialize;
use std::path::Path;

/// Comment markers used to tell code lines from comment lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Prefixes marking a whole line as a comment
    pub line: &'static [&'static str],

    /// Open and close markers of a multi-line comment
    pub block: Option<(&'static str, &'static str)>,

    /// The close marker may end a line, or follow the open marker on the
    /// same line. When false, only a line starting with it closes a block.
    pub close_anywhere: bool,
}

impl CommentSyntax {
    pub const RUBY: Self = Self {
        line: &["#"],
        block: Some(("=begin", "=end")),
        close_anywhere: false,
    };

    pub const C: Self = Self {
        line: &["//"],
        block: Some(("/*", "*/")),
        close_anywhere: true,
    };

    /// Docstrings as block comments.
    ///
    /// `"""` both opens and closes, so a line starting with the closing
    /// `"""` of a string assigned earlier (`msg = """`) is taken as
    /// opening a block, and code up to the next `"""` goes uncounted.
    pub const PYTHON: Self = Self {
        line: &["#"],
        block: Some(("\"\"\"", "\"\"\"")),
        close_anywhere: true,
    };

    pub const SHELL: Self = Self {
        line: &["#"],
        block: None,
        close_anywhere: false,
    };

    pub const SQL: Self = Self {
        line: &["--"],
        block: Some(("/*", "*/")),
        close_anywhere: true,
    };

    pub const LUA: Self = Self {
        line: &["--"],
        block: Some(("--[[", "]]")),
        close_anywhere: true,
    };

    pub const HTML: Self = Self {
        line: &[],
        block: Some(("<!--", "-->")),
        close_anywhere: true,
    };

    pub const NONE: Self = Self {
        line: &[],
        block: None,
        close_anywhere: false,
    };

    pub fn is_line_comment(&self, candidate: &str) -> bool {
        self.line.iter().any(|marker| candidate.starts_with(marker))
    }
}

/// Which comment markers to apply to a blamed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Pick by file extension, falling back to Ruby
    #[default]
    Auto,
    Ruby,
    C,
    Python,
    Shell,
    Sql,
    Lua,
    Html,
    /// Count every non-blank line
    None,
}

impl Language {
    /// Comment markers for `path` under this setting
    pub fn syntax_for(self, path: &Path) -> CommentSyntax {
        match self {
            Language::Auto => detect(path),
            Language::Ruby => CommentSyntax::RUBY,
            Language::C => CommentSyntax::C,
            Language::Python => CommentSyntax::PYTHON,
            Language::Shell => CommentSyntax::SHELL,
            Language::Sql => CommentSyntax::SQL,
            Language::Lua => CommentSyntax::LUA,
            Language::Html => CommentSyntax::HTML,
            Language::None => CommentSyntax::NONE,
        }
    }
}

fn detect(path: &Path) -> CommentSyntax {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "cs" | "java" | "kt" | "kts" | "scala"
        | "swift" | "go" | "rs" | "js" | "jsx" | "mjs" | "ts" | "tsx" | "css" | "scss"
        | "dart" | "php" => CommentSyntax::C,
        "py" | "pyi" => CommentSyntax::PYTHON,
        "sh" | "bash" | "zsh" | "toml" | "yml" | "yaml" | "r" | "pl" | "mk" => {
            CommentSyntax::SHELL
        }
        "sql" => CommentSyntax::SQL,
        "lua" => CommentSyntax::LUA,
        "html" | "htm" | "xml" | "svg" | "vue" => CommentSyntax::HTML,
        "md" | "txt" | "json" => CommentSyntax::NONE,
        _ => CommentSyntax::RUBY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_detects_by_extension() {
        assert_eq!(Language::Auto.syntax_for(Path::new("a/b.rs")), CommentSyntax::C);
        assert_eq!(Language::Auto.syntax_for(Path::new("x.PY")), CommentSyntax::PYTHON);
        assert_eq!(Language::Auto.syntax_for(Path::new("q.sql")), CommentSyntax::SQL);
        assert_eq!(Language::Auto.syntax_for(Path::new("app.rb")), CommentSyntax::RUBY);
    }

    #[test]
    fn auto_falls_back_to_ruby() {
        assert_eq!(Language::Auto.syntax_for(Path::new("Rakefile")), CommentSyntax::RUBY);
        assert_eq!(Language::Auto.syntax_for(Path::new("x.unknown")), CommentSyntax::RUBY);
    }

    #[test]
    fn explicit_language_ignores_extension() {
        assert_eq!(Language::Ruby.syntax_for(Path::new("main.c")), CommentSyntax::RUBY);
        assert_eq!(Language::None.syntax_for(Path::new("main.rb")), CommentSyntax::NONE);
    }

    #[test]
    fn line_comment_prefixes() {
        assert!(CommentSyntax::RUBY.is_line_comment("# hi"));
        assert!(!CommentSyntax::RUBY.is_line_comment("x = 1 # hi"));
        assert!(CommentSyntax::C.is_line_comment("// hi"));
        assert!(!CommentSyntax::C.is_line_comment("/ 2"));
        assert!(!CommentSyntax::NONE.is_line_comment("# hi"));
    }

    #[test]
    fn ruby_closes_only_at_line_start() {
        assert!(!CommentSyntax::RUBY.close_anywhere);
        assert!(CommentSyntax::C.close_anywhere);
        assert!(CommentSyntax::HTML.close_anywhere);
    }

    #[test]
    fn deserializes_lowercase_names() {
        let lang: Language = serde_json::from_str("\"sql\"").unwrap();
        assert_eq!(lang, Language::Sql);
    }
}
