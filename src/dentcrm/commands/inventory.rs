use crate::commands::{clean, CmdMessage, CmdResult};
use crate::error::{CrmError, Result};
use crate::model::ProductSummary;
use crate::store::{RecordStore, StorageBackend};

#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub id: Option<i64>,
    pub name: String,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    pub udi: Option<String>,
}

impl ProductDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub fn add<B: StorageBackend>(
    store: &mut RecordStore<B>,
    draft: ProductDraft,
) -> Result<CmdResult> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(CrmError::Api("Product name cannot be empty".into()));
    }

    let snapshot = store.snapshot();
    let mut result = CmdResult::default();
    let id = match draft.id {
        Some(id) => {
            if snapshot.inventory.find(id).is_some() {
                result.add_message(CmdMessage::warning(format!(
                    "Another product already uses id {}",
                    id
                )));
            }
            id
        }
        None => snapshot
            .inventory
            .next_id()
            .ok_or_else(|| CrmError::Api("No product id left to assign".into()))?,
    };

    let udi = clean(draft.udi);
    if let Some(existing) = udi.as_deref().and_then(|u| snapshot.inventory.find_by_udi(u)) {
        result.add_message(CmdMessage::warning(format!(
            "UDI already recorded on product {} ({})",
            existing.id, existing.name
        )));
    }

    let product = ProductSummary {
        id,
        name: name.to_string(),
        sku: clean(draft.sku),
        category: clean(draft.category),
        quantity: draft.quantity,
        unit: clean(draft.unit),
        udi,
        extra: Default::default(),
    };
    drop(snapshot);
    store.add_product(product.clone());

    result.add_message(CmdMessage::success(format!(
        "Product added ({}): {}",
        product.id, product.name
    )));
    Ok(result.with_products(vec![product]))
}

pub fn list<B: StorageBackend>(
    store: &RecordStore<B>,
    search: Option<&str>,
) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let products: Vec<ProductSummary> = match search {
        Some(term) => snapshot.inventory.search(term).into_iter().cloned().collect(),
        None => snapshot.inventory.as_slice().to_vec(),
    };

    let mut result = CmdResult::default();
    if products.is_empty() {
        result.add_message(CmdMessage::info("No products found."));
    }
    Ok(result.with_products(products))
}

pub fn show<B: StorageBackend>(store: &RecordStore<B>, id: i64) -> Result<CmdResult> {
    let product = store
        .snapshot()
        .inventory
        .find(id)
        .cloned()
        .ok_or(CrmError::NotFound { kind: "Product", id })?;
    Ok(CmdResult::default().with_products(vec![product]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::fixtures::StoreFixture;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn add_assigns_next_id() {
        let mut store = StoreFixture::new().with_products(4).store;
        let result = add(&mut store, ProductDraft::named("Composite A2")).unwrap();
        assert_eq!(result.products[0].id, 5);
    }

    #[test]
    fn repeated_udi_is_warned_but_kept() {
        let mut store = RecordStore::open(MemBackend::new());
        let mut first = ProductDraft::named("Implant 3.5");
        first.udi = Some("UDI-1".into());
        add(&mut store, first.clone()).unwrap();

        let result = add(&mut store, first).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.snapshot().inventory.len(), 2);
    }

    #[test]
    fn add_fails_when_ids_are_exhausted() {
        let blob = r#"{"inventory":[{"id":9223372036854775807,"name":"Max"}]}"#;
        let mut store = RecordStore::open(MemBackend::with_blob(blob));

        let err = add(&mut store, ProductDraft::named("Next")).unwrap_err();
        assert!(matches!(err, CrmError::Api(_)));
        assert_eq!(store.snapshot().inventory.len(), 1);
    }

    #[test]
    fn list_and_search() {
        let mut store = RecordStore::open(MemBackend::new());
        let mut gloves = ProductDraft::named("Gloves");
        gloves.sku = Some("GLV-S".into());
        gloves.quantity = Some(200);
        add(&mut store, gloves).unwrap();
        add(&mut store, ProductDraft::named("Suture 4-0")).unwrap();

        assert_eq!(list(&store, None).unwrap().products.len(), 2);
        let found = list(&store, Some("glv")).unwrap();
        assert_eq!(found.products[0].quantity, Some(200));

        let none = list(&store, Some("implant")).unwrap();
        assert!(none.products.is_empty());
        assert_eq!(none.messages[0].content, "No products found.");
    }

    #[test]
    fn show_finds_by_id() {
        let store = StoreFixture::new().with_products(2).store;
        assert_eq!(show(&store, 2).unwrap().products[0].name, "Test Product 2");
        assert!(show(&store, 3).is_err());
    }
}
