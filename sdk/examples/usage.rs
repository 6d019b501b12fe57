//! Walk-through of the SDK against a running server.
//!
//! Start the server first (`cargo run -p mock-server`), then:
//! `cargo run -p invoice-sdk --example usage`

use invoice_sdk::{ClientPatch, InvoiceApi, ListParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = InvoiceApi::default();

    println!("== clients ==");
    let client = api.clients().create("Juan", "juan@example.com")?;
    println!("created: {client:?}");
    let client_id = client.id.expect("server assigns an id");

    let all = api.clients().list(&ListParams::new())?.into_records();
    println!("total clients: {}", all.len());

    let fetched = api.clients().get(client_id)?;
    println!("fetched: {fetched:?}");

    if let Some(found) = api.clients().find_by_email("juan@example.com")? {
        println!("found by email: {}", found.name);
    }

    let updated = api.clients().update(
        client_id,
        &ClientPatch::new()
            .name("Juan Carlos Pérez")
            .email("juancarlos@example.com"),
    )?;
    println!("updated: {}", updated.name);

    println!("== items ==");
    let item = api
        .items()
        .create("Laptop Dell XPS", "LAP-DELL-XPS-001", "1299.99")?;
    println!("created: {item:?}");

    if let Some(found) = api.items().find_by_sku("LAP-DELL-XPS-001")? {
        println!("found by sku: {} - ${}", found.name, found.price);
    }

    println!("== invoices ==");
    let invoice = api.invoices().create(client_id, None)?;
    println!("created: {invoice:?}");

    let for_client = api.invoices().find_by_client(client_id)?;
    println!("invoices for client {client_id}: {}", for_client.len());

    Ok(())
}
