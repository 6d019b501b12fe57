//! Typed, synchronous client for the invoicing REST API.
//!
//! # Overview
//! One [`InvoiceApi`] facade owns the configuration and exposes a
//! resource per entity (`clients()`, `items()`, `invoices()`). Each
//! resource layers typed constructors and natural-key lookups over a
//! shared generic CRUD core, so URL building and HTTP handling live in
//! exactly one place.
//!
//! # Design
//! - `Transport` performs one blocking round trip per operation; no
//!   retries, no caching, no local state between calls.
//! - `ResourceClient<T>` holds the generic verb set; concrete resources
//!   hold one by composition and delegate to it.
//! - List endpoints may answer with a bare array or a pagination
//!   envelope; `ListResponse` models both and `into_records()` collapses
//!   them.
//! - Partial updates go through patch objects, so unset fields never
//!   reach the wire.
//!
//! ```no_run
//! use invoice_sdk::{ClientPatch, InvoiceApi};
//!
//! let api = InvoiceApi::default();
//! let created = api.clients().create("Juan", "juan@example.com")?;
//! let id = created.id.expect("server assigns an id");
//! api.clients().update(id, &ClientPatch::new().name("Juan Carlos"))?;
//! # Ok::<(), invoice_sdk::ApiError>(())
//! ```

pub mod client;
pub mod clients;
pub mod error;
pub mod http;
pub mod invoices;
pub mod items;
pub mod resource;
pub mod types;

pub use client::{InvoiceApi, DEFAULT_BASE_URL};
pub use clients::ClientsResource;
pub use error::ApiError;
pub use http::{HttpMethod, Payload, Transport};
pub use invoices::InvoicesResource;
pub use items::ItemsResource;
pub use resource::{ListParams, ListResponse, Page, ResourceClient};
pub use types::{
    ClientPatch, ClientRecord, InvoiceLineRecord, InvoicePatch, InvoiceRecord, ItemPatch,
    ItemRecord, NewClient, NewInvoice, NewItem,
};
