//! Local item name catalog and search.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::CatalogError;
use crate::market::ItemIdentifier;

/// Canonical item names loaded from a newline-delimited file.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    names: Vec<String>,
}

/// Result of reading a selection from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A listed item was chosen.
    Item(ItemIdentifier),
    /// The user backed out with `q`.
    Cancelled,
    /// Non-numeric or out-of-range input.
    Invalid,
}

impl ItemCatalog {
    /// Load the catalog from `path`.
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|source| {
            let path = path.display().to_string();
            if source.kind() == ErrorKind::NotFound {
                CatalogError::NotFound { path }
            } else {
                CatalogError::Read { path, source }
            }
        })?;

        let catalog = Self::from_text(&text);
        debug!(items = catalog.len(), "Item catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from file contents. Blank lines are skipped.
    pub fn from_text(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive substring search, in file order.
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}

/// Interpret the user's answer to a numbered list of `listed` items.
///
/// Numbers are 1-based; `q` cancels.
pub fn parse_selection(input: &str, listed: &[&str]) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Selection::Cancelled;
    }

    let index = match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= listed.len() => n - 1,
        _ => return Selection::Invalid,
    };

    match ItemIdentifier::new(listed[index]) {
        Ok(item) => Selection::Item(item),
        Err(_) => Selection::Invalid,
    }
}
