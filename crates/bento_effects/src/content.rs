//! Card content supplied by the host's content layer.
//!
//! The engine never looks inside a card beyond its position in the list;
//! content travels through so the host can render it next to the effects.

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Shown instead of an empty grid.
pub const PLACEHOLDER_MESSAGE: &str = "No items to display";

/// One card's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    /// Icon name understood by the host.
    pub icon: String,
    /// Index label, e.g. `"01"`.
    pub number: String,
    /// Card title.
    pub title: String,
    /// Card body.
    pub description: String,
    /// Optional tag list.
    #[serde(default)]
    pub features: Vec<String>,
}

impl CardContent {
    /// Creates a card without tags.
    #[must_use]
    pub fn new(
        icon: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            number: number.into(),
            title: title.into(),
            description: description.into(),
            features: Vec::new(),
        }
    }

    /// Adds tags.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Deserialize)]
struct Catalog {
    #[serde(default)]
    card: Vec<CardContent>,
}

/// Parses a card list written as `[[card]]` tables.
///
/// # Errors
///
/// [`crate::ConfigError::Parse`] for malformed TOML or missing fields.
pub fn catalog_from_toml(source: &str) -> ConfigResult<Vec<CardContent>> {
    let catalog: Catalog = toml::from_str(source)?;
    Ok(catalog.card)
}

/// What the grid region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    /// A message in place of the grid.
    Placeholder(&'static str),
    /// The cards, in order.
    Cards(Vec<CardContent>),
}

impl GridContent {
    /// Cards, or the placeholder when there are none.
    #[must_use]
    pub fn from_items(items: Vec<CardContent>) -> Self {
        if items.is_empty() {
            Self::Placeholder(PLACEHOLDER_MESSAGE)
        } else {
            Self::Cards(items)
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Placeholder(_) => 0,
            Self::Cards(items) => items.len(),
        }
    }

    /// True for the placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_become_placeholder() {
        assert_eq!(GridContent::from_items(Vec::new()), GridContent::Placeholder(PLACEHOLDER_MESSAGE));
        let content = GridContent::from_items(vec![CardContent::new("code", "01", "Web", "Sites")]);
        assert_eq!(content.len(), 1);
        assert!(!content.is_empty());
    }

    #[test]
    fn test_catalog_from_toml() {
        let cards = catalog_from_toml(
            r#"
            [[card]]
            icon = "code"
            number = "01"
            title = "Web Development"
            description = "Fast sites."
            features = ["Next.js", "Rust"]

            [[card]]
            icon = "phone"
            number = "02"
            title = "Mobile"
            description = "Apps."
            "#,
        )
        .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].features, vec!["Next.js", "Rust"]);
        assert!(cards[1].features.is_empty());
        assert_eq!(
            cards[1],
            CardContent::new("phone", "02", "Mobile", "Apps.")
        );
    }

    #[test]
    fn test_catalog_missing_field() {
        assert!(catalog_from_toml("[[card]]\nicon = \"x\"").is_err());
    }
}
