//! Full lifecycle against the live mock server over real HTTP.
//!
//! # Design
//! Each test boots its own server instance on a random port from a
//! current-thread tokio runtime, so tests stay independent and run in
//! parallel. The SDK side is exercised exactly as a caller would use it:
//! facade in, typed records out.

use invoice_sdk::{ApiError, ClientPatch, InvoiceApi, ItemPatch, ListParams, ListResponse};

fn start_server() -> (InvoiceApi, mock_server::Db) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let db = mock_server::new_db();
    let server_db = db.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, server_db).await
        })
        .unwrap();
    });

    // Base deliberately lacks the trailing slash; the facade normalizes.
    (InvoiceApi::new(&format!("http://{addr}/api/v1")), db)
}

#[test]
fn client_lifecycle() {
    let (api, _db) = start_server();

    let clients = api.clients().list(&ListParams::new()).unwrap().into_records();
    assert!(clients.is_empty(), "expected empty list");

    let created = api.clients().create("Juan", "juan@example.com").unwrap();
    assert_eq!(created.name, "Juan");
    assert_eq!(created.email, "juan@example.com");
    let id = created.id.expect("server assigns an id");

    let fetched = api.clients().get(id).unwrap();
    assert_eq!(fetched, created);

    // Partial update touches only the named field.
    let updated = api
        .clients()
        .update(id, &ClientPatch::new().name("Juan Carlos"))
        .unwrap();
    assert_eq!(updated.name, "Juan Carlos");
    assert_eq!(updated.email, "juan@example.com");

    assert!(api.clients().delete(id).unwrap());
    let err = api.clients().get(id).unwrap_err();
    assert!(err.is_not_found());

    // Deleting again is not-found as well.
    let err = api.clients().delete(id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn find_by_email_matches_and_misses() {
    let (api, _db) = start_server();
    api.clients().create("Ana", "ana@example.com").unwrap();
    api.clients().create("Bo", "bo@example.com").unwrap();

    let found = api
        .clients()
        .find_by_email("ana@example.com")
        .unwrap()
        .expect("ana exists");
    assert_eq!(found.name, "Ana");

    // Non-empty endpoint, no matching email: absent result, not an error.
    assert!(api
        .clients()
        .find_by_email("missing@example.com")
        .unwrap()
        .is_none());
}

#[test]
fn item_price_survives_the_round_trip() {
    let (api, _db) = start_server();
    let created = api
        .items()
        .create("Laptop Dell XPS", "LAP-DELL-XPS-001", "1299.99")
        .unwrap();
    assert_eq!(created.price, "1299.99");
    let id = created.id.expect("server assigns an id");

    let fetched = api.items().get(id).unwrap();
    assert_eq!(fetched.price, "1299.99");

    // Numeric prices are coerced to their wire form; sku is untouched.
    let updated = api.items().update(id, &ItemPatch::new().price(1499.5)).unwrap();
    assert_eq!(updated.price, "1499.5");
    assert_eq!(updated.sku, "LAP-DELL-XPS-001");

    let found = api
        .items()
        .find_by_sku("LAP-DELL-XPS-001")
        .unwrap()
        .expect("sku exists");
    assert_eq!(found.id, Some(id));
}

#[test]
fn duplicate_sku_is_a_validation_failure() {
    let (api, _db) = start_server();
    api.items().create("A", "SKU-1", "1.00").unwrap();

    let err = api.items().create("B", "SKU-1", "2.00").unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(!err.is_not_found());
}

#[test]
fn invoice_scenario() {
    let (api, db) = start_server();

    let client = api.clients().create("Juan", "juan@example.com").unwrap();
    let client_id = client.id.expect("server assigns an id");

    // Server assigns the date when none is sent.
    let invoice = api.invoices().create(client_id, None).unwrap();
    assert_eq!(invoice.client, client_id);
    let date = invoice.date.clone().expect("server assigns a date");
    assert_eq!(date.len(), 10, "expected YYYY-MM-DD, got {date}");
    let invoice_id = invoice.id.expect("server assigns an id");

    let mine = api.invoices().find_by_client(client_id).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, Some(invoice_id));

    // An explicit date is kept verbatim.
    let dated = api.invoices().create(client_id, Some("2024-05-01")).unwrap();
    assert_eq!(dated.date.as_deref(), Some("2024-05-01"));

    // Lines are embedded in the invoice representation, never fetched
    // separately.
    let item = api.items().create("Widget", "W-1", "9.99").unwrap();
    db.blocking_write()
        .seed_line(invoice_id, item.id.expect("server assigns an id"), 3);
    let fetched = api.invoices().get(invoice_id).unwrap();
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].quantity, 3);

    // Unknown client FK is a validation failure, not a transport error.
    let err = api.invoices().create(99_999, None).unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[test]
fn list_shapes_resolve_to_the_same_records() {
    let (api, _db) = start_server();
    for i in 0..3 {
        api.clients()
            .create(&format!("c{i}"), &format!("c{i}@example.com"))
            .unwrap();
    }

    let flat = api.clients().list(&ListParams::new()).unwrap();
    assert!(matches!(flat, ListResponse::Flat(_)));
    assert_eq!(flat.into_records().len(), 3);

    let paged = api
        .clients()
        .list(&ListParams::new().page(1).page_size(2))
        .unwrap();
    match paged {
        ListResponse::Paged(page) => {
            assert_eq!(page.count, 3);
            assert_eq!(page.results.len(), 2);
            assert!(page.next.is_some());
            assert!(page.previous.is_none());
        }
        ListResponse::Flat(_) => panic!("expected a pagination envelope"),
    }

    let last = api
        .clients()
        .list(&ListParams::new().page(2).page_size(2))
        .unwrap();
    match last {
        ListResponse::Paged(page) => {
            assert_eq!(page.results.len(), 1);
            assert!(page.next.is_none());
            assert!(page.previous.is_some());
        }
        ListResponse::Flat(_) => panic!("expected a pagination envelope"),
    }
}

#[test]
fn transport_failure_without_a_server() {
    // Bind then drop, so the port is free and connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = InvoiceApi::new(&format!("http://{addr}/api/v1"));
    let err = api.clients().list(&ListParams::new()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
