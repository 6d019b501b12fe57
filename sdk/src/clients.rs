//! Client (customer) resource.

use crate::error::ApiError;
use crate::resource::{ListParams, ListResponse, ResourceClient};
use crate::types::{ClientPatch, ClientRecord, NewClient};

/// CRUD and lookup operations for `/clients/`.
pub struct ClientsResource {
    inner: ResourceClient<ClientRecord>,
}

impl ClientsResource {
    pub(crate) fn new(inner: ResourceClient<ClientRecord>) -> Self {
        Self { inner }
    }

    pub fn list(&self, params: &ListParams) -> Result<ListResponse<ClientRecord>, ApiError> {
        self.inner.list(params)
    }

    pub fn get(&self, id: u64) -> Result<ClientRecord, ApiError> {
        self.inner.get(id)
    }

    pub fn create(&self, name: &str, email: &str) -> Result<ClientRecord, ApiError> {
        self.inner.create(&NewClient {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Partial update; fields left unset in `patch` keep their server-side
    /// values.
    pub fn update(&self, id: u64, patch: &ClientPatch) -> Result<ClientRecord, ApiError> {
        self.inner.update(id, patch)
    }

    pub fn delete(&self, id: u64) -> Result<bool, ApiError> {
        self.inner.delete(id)
    }

    /// Look a client up by email.
    ///
    /// The email goes out as a server-side filter, but the server may
    /// treat unknown filter params as advisory and answer with unfiltered
    /// results, so every candidate is re-checked here before it is
    /// returned. No match is `Ok(None)`, not an error.
    pub fn find_by_email(&self, email: &str) -> Result<Option<ClientRecord>, ApiError> {
        let response = self.list(&ListParams::new().filter("email", email))?;
        Ok(response
            .into_records()
            .into_iter()
            .find(|client| client.email == email))
    }
}
