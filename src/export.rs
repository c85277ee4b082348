//! CSV export of the orders store, shaped for spreadsheet import.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::orders::Order;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// The fixed 19-column spreadsheet row. Nested fields that are absent on the
/// order render as empty strings, never as `null`.
#[derive(Debug, Serialize, PartialEq)]
pub struct OrderRow {
    pub order_id: String,
    pub created_at: String,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub items: String,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub tracking_number: String,
    pub shipped_at: String,
}

pub const COLUMN_COUNT: usize = 19;

/// Flatten one order into its spreadsheet row.
pub fn order_row(order: &Order) -> OrderRow {
    let items = order
        .items
        .iter()
        .map(|i| format!("{} x{}", i.name, i.quantity))
        .collect::<Vec<_>>()
        .join("; ");

    OrderRow {
        order_id: order.order_id.clone(),
        created_at: order.created_at.to_rfc3339(),
        status: order.status.to_string(),
        customer_name: order.customer.name.clone(),
        customer_email: order.customer.email.clone(),
        customer_phone: order.customer.phone.clone(),
        address: order.customer.address.line1.clone(),
        city: order.customer.address.city.clone(),
        state: order.customer.address.state.clone(),
        zip: order.customer.address.zip.clone(),
        country: order.customer.address.country.clone(),
        items,
        subtotal: format!("{:.2}", order.subtotal),
        shipping: format!("{:.2}", order.shipping),
        total: format!("{:.2}", order.total),
        payment_method: order.payment.method.clone(),
        transaction_id: order.payment.transaction_id.clone().unwrap_or_default(),
        tracking_number: order.fulfillment.tracking_number.clone().unwrap_or_default(),
        shipped_at: order
            .fulfillment
            .shipped_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    }
}

/// Write `data_dir/orders_export.csv` with one row per order.
pub fn export_orders_csv(orders: &[Order], data_dir: &Path) -> ExportResult<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join("orders_export.csv");
    let mut writer = csv::Writer::from_path(&path)?;
    for order in orders {
        writer.serialize(order_row(order))?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{Customer, LineItem, Order, OrderStatus};
    use tempfile::tempdir;

    fn sample_order() -> Order {
        let mut customer = Customer::default();
        customer.name = "John Smith".into();
        customer.email = "john@example.com".into();
        customer.address.line1 = "123 Main Street".into();
        customer.address.city = "New York".into();
        customer.address.country = "US".into();
        Order::new(
            customer,
            vec![
                LineItem {
                    id: "galaxy-star-projector".into(),
                    name: "Galaxy Star Projector Pro".into(),
                    sku: "GSP-001".into(),
                    variant: "Black".into(),
                    price: 34.99,
                    quantity: 1,
                },
                LineItem {
                    id: "led-strip-lights".into(),
                    name: "Smart LED Strip Lights 65ft".into(),
                    sku: "LSL-001".into(),
                    variant: "Standard".into(),
                    price: 29.99,
                    quantity: 2,
                },
            ],
        )
    }

    #[test]
    fn test_items_column_joins_name_and_quantity() {
        let row = order_row(&sample_order());
        assert_eq!(
            row.items,
            "Galaxy Star Projector Pro x1; Smart LED Strip Lights 65ft x2"
        );
    }

    #[test]
    fn test_missing_nested_fields_render_empty() {
        let row = order_row(&sample_order());
        assert_eq!(row.transaction_id, "");
        assert_eq!(row.tracking_number, "");
        assert_eq!(row.shipped_at, "");
    }

    #[test]
    fn test_export_has_header_and_one_row_per_order() {
        let dir = tempdir().unwrap();
        let orders = vec![sample_order(), sample_order(), sample_order()];
        let path = export_orders_csv(&orders, dir.path()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), COLUMN_COUNT);
        assert_eq!(&headers[0], "order_id");
        assert_eq!(&headers[18], "shipped_at");

        let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row.len(), COLUMN_COUNT);
        }
    }

    #[test]
    fn test_exported_row_reflects_status_and_totals() {
        let dir = tempdir().unwrap();
        let mut order = sample_order();
        order.update_status(OrderStatus::Shipped, None);
        let path = export_orders_csv(std::slice::from_ref(&order), dir.path()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[2], "shipped");
        assert_eq!(&record[12], "94.97"); // 34.99 + 2*29.99
        assert_eq!(&record[13], "0.00");
        assert_eq!(&record[14], "94.97");
    }
}
