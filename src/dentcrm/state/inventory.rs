use crate::model::ProductSummary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Products in stock, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySlice {
    items: Arc<Vec<ProductSummary>>,
}

impl InventorySlice {
    pub fn append(&mut self, product: ProductSummary) {
        Arc::make_mut(&mut self.items).push(product);
    }

    pub fn as_slice(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&ProductSummary> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn find_by_udi(&self, udi: &str) -> Option<&ProductSummary> {
        self.items.iter().find(|p| p.udi.as_deref() == Some(udi))
    }

    /// Matches name, SKU or UDI, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&ProductSummary> {
        let needle = term.to_lowercase();
        let hit = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&needle));
        self.items
            .iter()
            .filter(|p| {
                hit(Some(p.name.as_str())) || hit(p.sku.as_deref()) || hit(p.udi.as_deref())
            })
            .collect()
    }

    pub fn next_id(&self) -> Option<i64> {
        self.items.iter().map(|p| p.id).max().unwrap_or(0).checked_add(1)
    }
}
