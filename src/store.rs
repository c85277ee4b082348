use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::orders::{Order, OrderStatus};

/// Errors from the JSON-document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization/Deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unknown order: {0}")]
    UnknownOrder(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The persisted orders document: `{"orders": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OrdersDocument {
    pub orders: Vec<Order>,
}

/// A flat JSON-file store for orders, kept under `data_dir/orders.json`.
///
/// Orders are only ever appended or mutated in place; nothing is deleted.
/// A missing file loads as an empty store.
pub struct Store {
    orders_path: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Store {
            orders_path: data_dir.as_ref().join("orders.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.orders_path
    }

    /// Load the orders document. A missing file is not an error: it yields
    /// an empty store. A present-but-corrupt file is.
    pub fn load(&self) -> StoreResult<OrdersDocument> {
        match std::fs::read_to_string(&self.orders_path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(OrdersDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, doc: &OrdersDocument) -> StoreResult<()> {
        if let Some(parent) = self.orders_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.orders_path, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }

    /// Append one order to the store.
    pub fn append(&self, order: Order) -> StoreResult<()> {
        let mut doc = self.load()?;
        info!(order_id = %order.order_id, "appending order to store");
        doc.orders.push(order);
        self.save(&doc)
    }

    /// Find `order_id` in the store, apply the status update, save, and
    /// return the updated order.
    pub fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        notes: Option<&str>,
    ) -> StoreResult<Order> {
        let mut doc = self.load()?;
        let order = doc
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| StoreError::UnknownOrder(order_id.to_owned()))?;
        order.update_status(new_status, notes);
        let updated = order.clone();
        self.save(&doc)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{Customer, LineItem};
    use tempfile::tempdir;

    fn sample_order() -> Order {
        Order::new(
            Customer::default(),
            vec![LineItem {
                id: "led-strip-lights".into(),
                name: "Smart LED Strip Lights 65ft".into(),
                sku: "LSL-001".into(),
                variant: "Standard".into(),
                price: 29.99,
                quantity: 1,
            }],
        )
    }

    #[test]
    fn test_missing_file_loads_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let doc = store.load().unwrap();
        assert!(doc.orders.is_empty());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let order = sample_order();
        let id = order.order_id.clone();
        store.append(order).unwrap();
        store.append(sample_order()).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.orders.len(), 2);
        assert_eq!(doc.orders[0].order_id, id);
    }

    #[test]
    fn test_update_status_persists_history() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let order = sample_order();
        let id = order.order_id.clone();
        store.append(order).unwrap();

        let updated = store
            .update_status(&id, OrderStatus::Paid, Some("payment confirmed"))
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);

        let doc = store.load().unwrap();
        assert_eq!(doc.orders[0].status, OrderStatus::Paid);
        assert_eq!(doc.orders[0].status_history.len(), 1);
        assert_eq!(doc.orders[0].status_history[0].status, OrderStatus::Pending);
    }

    #[test]
    fn test_update_status_unknown_order() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        let res = store.update_status("SB-000000-XXXX", OrderStatus::Paid, None);
        assert!(matches!(res, Err(StoreError::UnknownOrder(_))));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Serde(_))));
    }
}
