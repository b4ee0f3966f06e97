//! ThemeCatalog — the selectable themes, in presentation order.
//!
//! The default theme is always first; loaded themes follow in file order.

use std::path::Path;

use tracing::{info, warn};

use super::{ThemeDescriptor, ThemeError, ThemeResult};

#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<ThemeDescriptor>,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self {
            themes: vec![ThemeDescriptor::default()],
        }
    }
}

impl ThemeCatalog {
    /// Default theme followed by `themes`.
    pub fn with_themes(themes: impl IntoIterator<Item = ThemeDescriptor>) -> Self {
        let mut catalog = Self::default();
        catalog.themes.extend(themes);
        catalog
    }

    /// Parse a list of descriptors. `.json` files go through serde_json,
    /// everything else through serde_yaml.
    pub fn parse(content: &str, json: bool) -> ThemeResult<Vec<ThemeDescriptor>> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    pub fn load(path: &Path) -> ThemeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let themes = Self::parse(&content, json)?;
        info!(count = themes.len(), path = %path.display(), "themes loaded");
        Ok(Self::with_themes(themes))
    }

    /// Like [`load`](Self::load), but a bad file leaves just the default.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("{e}; only the default theme is available");
                Self::default()
            }
        }
    }

    /// All themes in presentation order.
    pub fn list(&self) -> &[ThemeDescriptor] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ThemeDescriptor> {
        self.themes.get(index)
    }

    /// Index of the first theme named `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.themes.iter().position(|t| t.theme_name == name)
    }

    /// Index after `index`, wrapping.
    pub fn next_index(&self, index: usize) -> usize {
        if self.themes.is_empty() {
            0
        } else {
            (index + 1) % self.themes.len()
        }
    }
}
