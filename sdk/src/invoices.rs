//! Invoice resource.

use crate::error::ApiError;
use crate::resource::{ListParams, ListResponse, ResourceClient};
use crate::types::{InvoicePatch, InvoiceRecord, NewInvoice};

/// CRUD and lookup operations for `/invoices/`.
pub struct InvoicesResource {
    inner: ResourceClient<InvoiceRecord>,
}

impl InvoicesResource {
    pub(crate) fn new(inner: ResourceClient<InvoiceRecord>) -> Self {
        Self { inner }
    }

    pub fn list(&self, params: &ListParams) -> Result<ListResponse<InvoiceRecord>, ApiError> {
        self.inner.list(params)
    }

    pub fn get(&self, id: u64) -> Result<InvoiceRecord, ApiError> {
        self.inner.get(id)
    }

    /// Create an invoice for `client`. When `date` is `None` the server
    /// assigns today's date.
    pub fn create(&self, client: u64, date: Option<&str>) -> Result<InvoiceRecord, ApiError> {
        self.inner.create(&NewInvoice {
            client,
            date: date.map(str::to_string),
        })
    }

    pub fn update(&self, id: u64, patch: &InvoicePatch) -> Result<InvoiceRecord, ApiError> {
        self.inner.update(id, patch)
    }

    pub fn delete(&self, id: u64) -> Result<bool, ApiError> {
        self.inner.delete(id)
    }

    /// All invoices belonging to `client`, re-checked client-side in case
    /// the server ignored the filter. An unknown client yields an empty
    /// vec, not an error.
    pub fn find_by_client(&self, client: u64) -> Result<Vec<InvoiceRecord>, ApiError> {
        let response = self.list(&ListParams::new().filter("client", client))?;
        Ok(response
            .into_records()
            .into_iter()
            .filter(|invoice| invoice.client == client)
            .collect())
    }
}
