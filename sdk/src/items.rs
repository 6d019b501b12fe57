//! Item (product) resource.

use crate::error::ApiError;
use crate::resource::{ListParams, ListResponse, ResourceClient};
use crate::types::{ItemPatch, ItemRecord, NewItem};

/// CRUD and lookup operations for `/items/`.
pub struct ItemsResource {
    inner: ResourceClient<ItemRecord>,
}

impl ItemsResource {
    pub(crate) fn new(inner: ResourceClient<ItemRecord>) -> Self {
        Self { inner }
    }

    pub fn list(&self, params: &ListParams) -> Result<ListResponse<ItemRecord>, ApiError> {
        self.inner.list(params)
    }

    pub fn get(&self, id: u64) -> Result<ItemRecord, ApiError> {
        self.inner.get(id)
    }

    /// Create an item. `price` takes anything with a decimal rendering
    /// (`"1299.99"`, `1299.99`) and is sent in its string wire form; the
    /// server enforces `sku` uniqueness.
    pub fn create(
        &self,
        name: &str,
        sku: &str,
        price: impl ToString,
    ) -> Result<ItemRecord, ApiError> {
        self.inner.create(&NewItem {
            name: name.to_string(),
            sku: sku.to_string(),
            price: price.to_string(),
        })
    }

    pub fn update(&self, id: u64, patch: &ItemPatch) -> Result<ItemRecord, ApiError> {
        self.inner.update(id, patch)
    }

    pub fn delete(&self, id: u64) -> Result<bool, ApiError> {
        self.inner.delete(id)
    }

    /// Look an item up by SKU. Candidates are re-checked client-side in
    /// case the server ignored the filter; no match is `Ok(None)`.
    pub fn find_by_sku(&self, sku: &str) -> Result<Option<ItemRecord>, ApiError> {
        let response = self.list(&ListParams::new().filter("sku", sku))?;
        Ok(response.into_records().into_iter().find(|item| item.sku == sku))
    }
}
