//! Per-screen view state and its text rendering.
//!
//! Each screen owns its state exclusively. A pending fetch leaves the state in
//! its empty/placeholder form, and so does a failed one.

use std::fmt::Write as _;

use crate::model::CatalogItem;
use crate::route::{CATALOG_TITLE, ITEM_TITLE};

pub const ADD_TO_CART: &str = "Add to Cart";

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub thumbnail: String,
    pub title: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListView {
    items: Vec<CatalogItem>,
}

impl ListView {
    pub fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Row by 1-based position, as typed by the user.
    pub fn row(&self, position: usize) -> Option<&CatalogItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn title(&self) -> &str {
        CATALOG_TITLE
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.items
            .iter()
            .map(|item| ListRow {
                thumbnail: item.image.clone(),
                title: item.title.clone(),
                price: item.price_text(),
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = heading(self.title());
        for (i, row) in self.rows().iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", i + 1, row.title);
            let _ = writeln!(out, "     {}", row.price);
            let _ = writeln!(out, "     [img] {}", row.thumbnail);
        }
        out
    }
}

/// Rendered detail fields. All blank while the record is pending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailPane {
    pub image: String,
    pub title: String,
    pub price: String,
    pub description_heading: String,
    pub description: String,
    pub category: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailView {
    item: Option<CatalogItem>,
}

impl DetailView {
    pub fn set_item(&mut self, item: CatalogItem) {
        self.item = Some(item);
    }

    pub fn is_loaded(&self) -> bool {
        self.item.is_some()
    }

    /// Screen chrome title: the item's title once loaded.
    pub fn title(&self) -> &str {
        self.item.as_ref().map_or(ITEM_TITLE, |i| i.title.as_str())
    }

    pub fn pane(&self) -> DetailPane {
        let Some(item) = &self.item else {
            return DetailPane::default();
        };
        DetailPane {
            image: item.image.clone(),
            title: item.title.clone(),
            price: item.price_label(),
            description_heading: "Description".into(),
            description: item.description.clone().unwrap_or_default(),
            category: format!("Category: {}", item.category.as_deref().unwrap_or_default()),
            action: ADD_TO_CART.into(),
        }
    }

    pub fn render(&self) -> String {
        let pane = self.pane();
        let mut out = heading(self.title());
        let _ = writeln!(out, "[img] {}", pane.image);
        let _ = writeln!(out, "{}", pane.title);
        let _ = writeln!(out, "{}", pane.price);
        let _ = writeln!(out, "{}", pane.description_heading);
        let _ = writeln!(out, "{}", pane.description);
        let _ = writeln!(out, "{}", pane.category);
        let _ = writeln!(out, "[{}]", pane.action);
        out
    }
}

fn heading(title: &str) -> String {
    format!("== {} ==\n", title)
}
