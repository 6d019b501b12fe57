//! In-memory rendition of the invoicing wire contract, used as the live
//! fixture for the SDK's integration tests and runnable as a binary.
//!
//! Routes live under `/api/v1/` with trailing slashes. List endpoints
//! answer with a bare JSON array, or with a `{count, next, previous,
//! results}` envelope when `page` is requested, so clients see both list
//! shapes the real backend can produce. Validation mirrors the backing
//! models: non-blank names, well-formed emails, unique SKUs, existing
//! client foreign keys. Errors carry a `{"detail": ...}` body.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub sku: String,
    /// Stored exactly as received, so the decimal string round-trips.
    pub price: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: u64,
    pub invoice: u64,
    pub item: u64,
    pub quantity: u32,
}

/// Invoice as rendered on the wire, lines embedded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub client: u64,
    pub date: String,
    pub items: Vec<InvoiceLine>,
}

#[derive(Clone, Debug)]
struct StoredInvoice {
    id: u64,
    client: u64,
    date: String,
}

#[derive(Deserialize)]
pub struct CreateClient {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub sku: String,
    pub price: String,
}

#[derive(Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateInvoice {
    pub client: u64,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateInvoice {
    pub client: Option<u64>,
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientListQuery {
    page: Option<u64>,
    page_size: Option<u64>,
    email: Option<String>,
}

#[derive(Deserialize)]
pub struct ItemListQuery {
    page: Option<u64>,
    page_size: Option<u64>,
    sku: Option<String>,
}

#[derive(Deserialize)]
pub struct InvoiceListQuery {
    page: Option<u64>,
    page_size: Option<u64>,
    client: Option<u64>,
}

/// Pagination envelope, produced when a list request carries `page`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Flat(Vec<T>),
    Paged(Envelope<T>),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

type Rejection = (StatusCode, Json<ErrorBody>);

fn bad_request(detail: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
}

fn not_found() -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not found.".to_string(),
        }),
    )
}

/// All collections share one id sequence; ids only need to be unique and
/// increasing, as the real backend's autoincrement columns are.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    clients: HashMap<u64, Client>,
    items: HashMap<u64, Item>,
    invoices: HashMap<u64, StoredInvoice>,
    lines: HashMap<u64, InvoiceLine>,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Insert an invoice line directly. Lines have no HTTP surface of
    /// their own; tests use this to exercise the embedded representation.
    pub fn seed_line(&mut self, invoice: u64, item: u64, quantity: u32) -> u64 {
        let id = self.allocate_id();
        self.lines.insert(
            id,
            InvoiceLine {
                id,
                invoice,
                item,
                quantity,
            },
        );
        id
    }

    fn render_invoice(&self, invoice: &StoredInvoice) -> Invoice {
        let mut items: Vec<InvoiceLine> = self
            .lines
            .values()
            .filter(|line| line.invoice == invoice.id)
            .cloned()
            .collect();
        items.sort_by_key(|line| line.id);
        Invoice {
            id: invoice.id,
            client: invoice.client,
            date: invoice.date.clone(),
            items,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn new_db() -> Db {
    Arc::new(RwLock::new(Store::default()))
}

pub fn app() -> Router {
    app_with(new_db())
}

/// Router over an externally owned store, for tests that seed state.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/v1/clients/", get(list_clients).post(create_client))
        .route(
            "/api/v1/clients/{id}/",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route("/api/v1/items/", get(list_items).post(create_item))
        .route(
            "/api/v1/items/{id}/",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/api/v1/invoices/", get(list_invoices).post(create_invoice))
        .route(
            "/api/v1/invoices/{id}/",
            get(get_invoice).patch(update_invoice).delete(delete_invoice),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, new_db()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

/// Flat list, or one envelope page when `page` is requested.
fn list_body<T>(records: Vec<T>, path: &str, page: Option<u64>, page_size: Option<u64>) -> ListBody<T> {
    let Some(page) = page else {
        return ListBody::Flat(records);
    };
    let page = page.max(1);
    let size = page_size.unwrap_or(10).max(1) as usize;
    let count = records.len();
    let start = (page as usize - 1) * size;
    let results: Vec<T> = records.into_iter().skip(start).take(size).collect();
    let next = if start + size < count {
        Some(format!("{path}?page={}", page + 1))
    } else {
        None
    };
    let previous = if page > 1 {
        Some(format!("{path}?page={}", page - 1))
    } else {
        None
    };
    ListBody::Paged(Envelope {
        count,
        next,
        previous,
        results,
    })
}

/// EmailField stand-in: non-empty local part and domain.
fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

// --- clients ---

async fn list_clients(
    State(db): State<Db>,
    Query(q): Query<ClientListQuery>,
) -> Json<ListBody<Client>> {
    let store = db.read().await;
    let mut clients: Vec<Client> = store.clients.values().cloned().collect();
    clients.sort_by_key(|client| client.id);
    if let Some(email) = &q.email {
        clients.retain(|client| &client.email == email);
    }
    Json(list_body(clients, "/api/v1/clients/", q.page, q.page_size))
}

async fn create_client(
    State(db): State<Db>,
    Json(input): Json<CreateClient>,
) -> Result<(StatusCode, Json<Client>), Rejection> {
    if input.name.trim().is_empty() {
        return Err(bad_request("name may not be blank."));
    }
    if !is_email(&input.email) {
        return Err(bad_request("Enter a valid email address."));
    }
    let mut store = db.write().await;
    let id = store.allocate_id();
    let client = Client {
        id,
        name: input.name,
        email: input.email,
    };
    store.clients.insert(id, client.clone());
    Ok((StatusCode::CREATED, Json(client)))
}

async fn get_client(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Client>, Rejection> {
    let store = db.read().await;
    store.clients.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_client(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateClient>,
) -> Result<Json<Client>, Rejection> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(bad_request("name may not be blank."));
        }
    }
    if let Some(email) = &input.email {
        if !is_email(email) {
            return Err(bad_request("Enter a valid email address."));
        }
    }
    let mut store = db.write().await;
    let client = store.clients.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        client.name = name;
    }
    if let Some(email) = input.email {
        client.email = email;
    }
    Ok(Json(client.clone()))
}

async fn delete_client(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    if store.clients.remove(&id).is_none() {
        return Err(not_found());
    }
    // The client FK cascades: drop the client's invoices and their lines.
    let invoice_ids: Vec<u64> = store
        .invoices
        .values()
        .filter(|invoice| invoice.client == id)
        .map(|invoice| invoice.id)
        .collect();
    store.invoices.retain(|_, invoice| invoice.client != id);
    store.lines.retain(|_, line| !invoice_ids.contains(&line.invoice));
    Ok(StatusCode::NO_CONTENT)
}

// --- items ---

async fn list_items(State(db): State<Db>, Query(q): Query<ItemListQuery>) -> Json<ListBody<Item>> {
    let store = db.read().await;
    let mut items: Vec<Item> = store.items.values().cloned().collect();
    items.sort_by_key(|item| item.id);
    if let Some(sku) = &q.sku {
        items.retain(|item| &item.sku == sku);
    }
    Json(list_body(items, "/api/v1/items/", q.page, q.page_size))
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), Rejection> {
    if input.name.trim().is_empty() {
        return Err(bad_request("name may not be blank."));
    }
    if input.sku.trim().is_empty() {
        return Err(bad_request("sku may not be blank."));
    }
    if input.price.parse::<f64>().is_err() {
        return Err(bad_request("A valid number is required."));
    }
    let mut store = db.write().await;
    if store.items.values().any(|item| item.sku == input.sku) {
        return Err(bad_request("item with this sku already exists."));
    }
    let id = store.allocate_id();
    let item = Item {
        id,
        name: input.name,
        sku: input.sku,
        price: input.price,
    };
    store.items.insert(id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, Rejection> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateItem>,
) -> Result<Json<Item>, Rejection> {
    let mut store = db.write().await;
    if !store.items.contains_key(&id) {
        return Err(not_found());
    }
    if let Some(sku) = &input.sku {
        if store.items.values().any(|item| item.id != id && &item.sku == sku) {
            return Err(bad_request("item with this sku already exists."));
        }
    }
    if let Some(price) = &input.price {
        if price.parse::<f64>().is_err() {
            return Err(bad_request("A valid number is required."));
        }
    }
    let item = store.items.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        item.name = name;
    }
    if let Some(sku) = input.sku {
        item.sku = sku;
    }
    if let Some(price) = input.price {
        item.price = price;
    }
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    if !store.items.contains_key(&id) {
        return Err(not_found());
    }
    // The item FK is protected: refuse while invoice lines reference it.
    if store.lines.values().any(|line| line.item == id) {
        return Err(bad_request("item is referenced by invoice lines."));
    }
    store.items.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

// --- invoices ---

async fn list_invoices(
    State(db): State<Db>,
    Query(q): Query<InvoiceListQuery>,
) -> Json<ListBody<Invoice>> {
    let store = db.read().await;
    let mut invoices: Vec<Invoice> = store
        .invoices
        .values()
        .map(|invoice| store.render_invoice(invoice))
        .collect();
    invoices.sort_by_key(|invoice| invoice.id);
    if let Some(client) = q.client {
        invoices.retain(|invoice| invoice.client == client);
    }
    Json(list_body(invoices, "/api/v1/invoices/", q.page, q.page_size))
}

async fn create_invoice(
    State(db): State<Db>,
    Json(input): Json<CreateInvoice>,
) -> Result<(StatusCode, Json<Invoice>), Rejection> {
    let mut store = db.write().await;
    if !store.clients.contains_key(&input.client) {
        return Err(bad_request("client does not exist."));
    }
    if let Some(date) = &input.date {
        if !is_iso_date(date) {
            return Err(bad_request("Date has wrong format. Use YYYY-MM-DD."));
        }
    }
    let id = store.allocate_id();
    let invoice = StoredInvoice {
        id,
        client: input.client,
        date: input
            .date
            .unwrap_or_else(|| Utc::now().date_naive().to_string()),
    };
    let rendered = store.render_invoice(&invoice);
    store.invoices.insert(id, invoice);
    Ok((StatusCode::CREATED, Json(rendered)))
}

async fn get_invoice(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Invoice>, Rejection> {
    let store = db.read().await;
    store
        .invoices
        .get(&id)
        .map(|invoice| store.render_invoice(invoice))
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_invoice(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateInvoice>,
) -> Result<Json<Invoice>, Rejection> {
    let mut store = db.write().await;
    if !store.invoices.contains_key(&id) {
        return Err(not_found());
    }
    if let Some(client) = input.client {
        if !store.clients.contains_key(&client) {
            return Err(bad_request("client does not exist."));
        }
    }
    if let Some(date) = &input.date {
        if !is_iso_date(date) {
            return Err(bad_request("Date has wrong format. Use YYYY-MM-DD."));
        }
    }
    {
        let invoice = store.invoices.get_mut(&id).ok_or_else(not_found)?;
        if let Some(client) = input.client {
            invoice.client = client;
        }
        if let Some(date) = input.date {
            invoice.date = date;
        }
    }
    store
        .invoices
        .get(&id)
        .map(|invoice| store.render_invoice(invoice))
        .map(Json)
        .ok_or_else(not_found)
}

async fn delete_invoice(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    if store.invoices.remove(&id).is_none() {
        return Err(not_found());
    }
    store.lines.retain(|_, line| line.invoice != id);
    Ok(StatusCode::NO_CONTENT)
}
