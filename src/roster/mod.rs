//! Roster — the ordered list of names to pick from.
//!
//! Immutable once built. Blank entries are dropped on construction so the
//! engine never sees them; duplicates are kept.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster, dropping empty and whitespace-only names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| !n.trim().is_empty())
            .collect();
        Self { names }
    }

    /// Load from a file: a YAML sequence of names for `.yaml`/`.yml`,
    /// otherwise plain text with one name per line (`#` lines skipped).
    pub fn load(path: &Path) -> RosterResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        if is_yaml {
            let names: Vec<String> =
                serde_yaml::from_str(&content).map_err(|source| RosterError::Yaml {
                    path: path.display().to_string(),
                    source,
                })?;
            return Ok(Self::new(names));
        }
        Ok(Self::parse_lines(&content))
    }

    /// One name per line. Lines starting with `#` are comments.
    pub fn parse_lines(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .filter(|l| !l.trim_start().starts_with('#'))
                .map(str::trim),
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
