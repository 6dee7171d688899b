use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier issued by the remote product service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product record. `description` and `category` are only filled in by the
/// single-item fetch; list entries carry the summary fields alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image: String,
}

impl CatalogItem {
    /// Truncate to `{id, title, price, image}`.
    pub fn into_summary(self) -> Self {
        Self {
            description: None,
            category: None,
            ..self
        }
    }

    pub fn is_summary(&self) -> bool {
        self.description.is_none() && self.category.is_none()
    }

    /// Price as a bare number (`9.99`, `10`).
    pub fn price_text(&self) -> String {
        format_price(self.price)
    }

    /// Price with the currency marker used on the detail pane.
    pub fn price_label(&self) -> String {
        format!("${}", format_price(self.price))
    }
}

/// Shortest round-trip decimal form; whole numbers print without a fraction.
/// Never switches to exponent notation, so `1e21` prints all its digits.
pub fn format_price(price: f64) -> String {
    format!("{}", price)
}
