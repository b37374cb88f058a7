use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AliasError {
    #[error("alias '{alias}' maps to '{canonical}', which is itself an alias for '{target}'")]
    Chained {
        alias: String,
        canonical: String,
        target: String,
    },
}

/// Identities known to belong to the same person.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("senchy26", "Ryan Senchyshak"),
    ("Hzzzzzzz777", "Zhi(Tom) Huang"),
];

/// Immutable lookup from raw blame identities to display names
#[derive(Debug, Clone, Default)]
pub struct AuthorAliases {
    table: HashMap<String, String>,
}

impl AuthorAliases {
    /// Build the table from the built-in entries plus `overrides`
    ///
    /// Entries in `overrides` replace built-in entries with the same key.
    pub fn new(overrides: HashMap<String, String>) -> Result<Self, AliasError> {
        let mut table = Self::builtin().table;
        table.extend(overrides);

        // A canonical name must not be rewritten again, otherwise normalizing
        // twice would give a different answer than normalizing once.
        for (alias, canonical) in &table {
            if let Some(target) = table.get(canonical) {
                if target != canonical {
                    return Err(AliasError::Chained {
                        alias: alias.clone(),
                        canonical: canonical.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(Self { table })
    }

    /// The built-in table with no overrides
    pub fn builtin() -> Self {
        Self {
            table: BUILTIN_ALIASES
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Resolve a raw identity, falling back to the input unchanged
    pub fn normalize<'a>(&'a self, raw: &'a str) -> &'a str {
        self.table.get(raw).map(String::as_str).unwrap_or(raw)
    }
}
