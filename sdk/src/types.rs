//! Wire records and request payloads for the invoicing API.
//!
//! # Design
//! Records mirror the server's JSON field names (snake_case, integer
//! ids). `id` is `Option` because a record only carries one once the
//! server has assigned it. `price` is a decimal string on the wire and
//! stays a string here; parsing it into a binary float would lose
//! precision.
//!
//! Each entity gets a `New*` create payload and a `*Patch` partial-update
//! payload. Patch fields use `skip_serializing_if`, so a field left unset
//! is omitted from the outgoing JSON entirely (never sent as `null`) and
//! keeps its server-side value.

use serde::{Deserialize, Serialize};

/// A client (customer) record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientRecord {
    /// Server-assigned; absent until the record has been created.
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
}

/// An item (product) record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: Option<u64>,
    pub name: String,
    /// Globally unique; uniqueness is enforced server-side.
    pub sku: String,
    /// Decimal string, e.g. `"1299.99"`.
    pub price: String,
}

/// An invoice record. `items` is whatever the server embeds in the
/// invoice representation; lines are never fetched separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub id: Option<u64>,
    /// Foreign key: the owning client's id.
    pub client: u64,
    /// ISO-8601 date; assigned by the server when omitted on create.
    pub date: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceLineRecord>,
}

/// One line of an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvoiceLineRecord {
    pub id: Option<u64>,
    pub invoice: u64,
    pub item: u64,
    pub quantity: u32,
}

/// Payload for creating a client.
#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
}

/// Payload for creating an item. `price` is already in wire form.
#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub name: String,
    pub sku: String,
    pub price: String,
}

/// Payload for creating an invoice. Leaving `date` unset lets the server
/// assign today's.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    pub client: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Partial update for a client.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ClientPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Partial update for an item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Accepts anything with a decimal rendering (`"1299.99"`, `1299.99`)
    /// and stores its string wire form.
    pub fn price(mut self, price: impl ToString) -> Self {
        self.price = Some(price.to_string());
        self
    }
}

/// Partial update for an invoice.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl InvoicePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client: u64) -> Self {
        self.client = Some(client);
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}
