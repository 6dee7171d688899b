use crate::model::{CatalogItem, ItemId};

pub const CATALOG_TITLE: &str = "Catalog";
pub const ITEM_TITLE: &str = "Item";

/// Screens of the browser and the parameters each one requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail { id: ItemId },
}

impl Route {
    /// Route for a selected row. Only the identifier travels with the transition.
    pub fn detail_for(item: &CatalogItem) -> Self {
        Route::Detail { id: item.id }
    }
}
