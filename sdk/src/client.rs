//! Entry point: one configured `InvoiceApi` owning every resource.
//!
//! # Design
//! The facade holds the normalized base URL and one instance of each
//! resource, all sharing a single transport. Resources are cheap and
//! stateless, so they are built eagerly in the constructor; accessors
//! hand out references to the same instances for the facade's lifetime.

use std::sync::Arc;

use crate::clients::ClientsResource;
use crate::http::Transport;
use crate::invoices::InvoicesResource;
use crate::items::ItemsResource;
use crate::resource::ResourceClient;

/// API root of the local development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1/";

/// Facade over the invoicing API.
///
/// Nothing mutates after construction, so a shared reference is safe to
/// use from multiple threads; calls issued concurrently are independent
/// round trips with no ordering guarantee between them.
pub struct InvoiceApi {
    base_url: String,
    clients: ClientsResource,
    items: ItemsResource,
    invoices: InvoicesResource,
}

impl InvoiceApi {
    /// Connect to `base_url` without credentials.
    pub fn new(base_url: &str) -> Self {
        Self::with_token(base_url, None)
    }

    /// Connect to `base_url`, sending `Authorization: Token <token>` with
    /// every request when a token is given.
    pub fn with_token(base_url: &str, token: Option<&str>) -> Self {
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        let transport = Arc::new(Transport::new(token));
        Self {
            clients: ClientsResource::new(ResourceClient::new(
                Arc::clone(&transport),
                &base_url,
                "clients",
            )),
            items: ItemsResource::new(ResourceClient::new(
                Arc::clone(&transport),
                &base_url,
                "items",
            )),
            invoices: InvoicesResource::new(ResourceClient::new(transport, &base_url, "invoices")),
            base_url,
        }
    }

    /// The configured API root, always `/`-terminated.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clients(&self) -> &ClientsResource {
        &self.clients
    }

    pub fn items(&self) -> &ItemsResource {
        &self.items
    }

    pub fn invoices(&self) -> &InvoicesResource {
        &self.invoices
    }
}

impl Default for InvoiceApi {
    /// Client against the local development server, no credentials.
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
