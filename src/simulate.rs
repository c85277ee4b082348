//! End-to-end order flow simulation.
//!
//! Drives one order through the full lifecycle for testing: create a sample
//! order, render the confirmation email, advance pending → paid →
//! processing → shipped while filling payment and fulfillment fields, render
//! the supplier and shipping emails, append the order to the JSON store, and
//! export the store to CSV.

use chrono::{Duration, Utc};
use tracing::info;

use crate::config::Config;
use crate::emails;
use crate::export::export_orders_csv;
use crate::orders::{
    Address, Customer, LineItem, Order, OrderStatus, random_code, random_digits,
};
use crate::products::{GALAXY_STAR_PROJECTOR, LED_STRIP_LIGHTS};
use crate::store::Store;

pub fn sample_customer() -> Customer {
    Customer {
        name: "John Smith".into(),
        email: "john@example.com".into(),
        phone: "+1-555-123-4567".into(),
        address: Address {
            line1: "123 Main Street".into(),
            line2: "Apt 4B".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip: "10001".into(),
            country: "US".into(),
        },
    }
}

pub fn sample_cart() -> Vec<LineItem> {
    vec![
        LineItem {
            id: GALAXY_STAR_PROJECTOR.id.into(),
            name: GALAXY_STAR_PROJECTOR.name.into(),
            sku: GALAXY_STAR_PROJECTOR.sku.into(),
            variant: "Black".into(),
            price: GALAXY_STAR_PROJECTOR.price(),
            quantity: 1,
        },
        LineItem {
            id: LED_STRIP_LIGHTS.id.into(),
            name: LED_STRIP_LIGHTS.name.into(),
            sku: LED_STRIP_LIGHTS.sku.into(),
            variant: "Standard".into(),
            price: LED_STRIP_LIGHTS.price(),
            quantity: 1,
        },
    ]
}

/// Run the complete simulated flow and return the final order.
pub fn run_order_flow(config: &Config) -> anyhow::Result<Order> {
    let store = Store::new(&config.data_dir);

    println!("1. Creating order...");
    let mut order = Order::new(sample_customer(), sample_cart());
    println!("   Order ID: {}", order.order_id);
    println!("   Total: ${:.2}", order.total);

    println!("2. Generating confirmation email...");
    let confirmation = emails::order_confirmation(&order, config);
    println!("   To: {}", confirmation.to);
    println!("   Subject: {}", confirmation.subject);

    println!("3. Payment received...");
    order.update_status(OrderStatus::Paid, Some("PayPal payment confirmed"));
    order.payment.transaction_id = Some(random_code("PAY-", 12));
    order.payment.paid_at = Some(Utc::now());
    println!(
        "   Transaction ID: {}",
        order.payment.transaction_id.as_deref().unwrap_or("")
    );

    println!("4. Generating supplier order email...");
    let supplier = emails::supplier_order(&order, config);
    println!("   To: {}", supplier.to);
    println!("   Subject: {}", supplier.subject);

    println!("5. Order sent to supplier...");
    order.update_status(OrderStatus::Processing, Some("Sent to supplier"));
    order.fulfillment.supplier_order_id = Some(random_digits("ALI-", 10));

    println!("6. Order shipped...");
    order.update_status(OrderStatus::Shipped, Some("Tracking provided by supplier"));
    order.fulfillment.tracking_number = Some(random_digits("YT", 16));
    order.fulfillment.carrier = Some("Yanwen / USPS".into());
    order.fulfillment.shipped_at = Some(Utc::now());
    order.fulfillment.estimated_delivery =
        Some((Utc::now() + Duration::days(12)).format("%B %d, %Y").to_string());
    println!(
        "   Tracking: {}",
        order.fulfillment.tracking_number.as_deref().unwrap_or("")
    );

    println!("7. Generating shipping notification...");
    let shipping = emails::shipping_notification(&order, config);
    println!("   Subject: {}", shipping.subject);

    println!("8. Saving order...");
    store.append(order.clone())?;
    println!("   Saved to: {}", store.path().display());

    println!("9. Exporting to CSV...");
    let doc = store.load()?;
    let csv_path = export_orders_csv(&doc.orders, &config.data_dir)?;
    println!("   Orders exported to: {}", csv_path.display());

    info!(order_id = %order.order_id, "order flow simulation complete");
    Ok(order)
}
