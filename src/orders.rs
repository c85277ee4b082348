use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat shipping fee in dollars, waived at [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING: f64 = 4.99;
/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 50.0;

/// Lifecycle status of an order.
///
/// There is deliberately no enforced transition table: any status may be set
/// from any other, and every change is recorded in the order's
/// [`status history`](Order::status_history) instead. `is_terminal` describes
/// the state; it does not guard anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// Returns true if no further fulfillment activity is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .find(|st| st.to_string() == s)
            .copied()
            .ok_or_else(|| format!("unknown order status: `{}`", s))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// One line of a cart. Prices are dollars; no validation is performed, so a
/// negative price or quantity propagates silently into the totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub variant: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fulfillment {
    pub supplier_order_id: Option<String>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub shipped_at: Option<DateTime<Utc>>,
    /// Human-readable date, e.g. "September 04, 2026".
    pub estimated_delivery: Option<String>,
}

/// One entry of the append-only status audit log: the status the order held
/// before the change, the status it changed to, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub changed_to: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A customer purchase record.
///
/// Created once per checkout, mutated in place through status updates and
/// fulfillment assignments, persisted by appending to the orders store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub payment: Payment,
    pub fulfillment: Fulfillment,
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
}

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate an order id like `SB-260823-K4QZ`.
///
/// Unique by construction (date prefix + random suffix) but with no
/// collision check against the store.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    format!("SB-{}-{}", now.format("%y%m%d"), random_code("", 4))
}

/// `random_code("PAY-", 12)` -> "PAY-" followed by 12 uppercase alphanumerics.
pub fn random_code(prefix: &str, len: usize) -> String {
    let mut rng = rand::rng();
    let tail: String = (0..len)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{}{}", prefix, tail)
}

/// `random_digits("ALI-", 10)` -> "ALI-" followed by 10 decimal digits.
pub fn random_digits(prefix: &str, len: usize) -> String {
    let mut rng = rand::rng();
    let tail: String = (0..len)
        .map(|_| rng.random_range(b'0'..=b'9') as char)
        .collect();
    format!("{}{}", prefix, tail)
}

impl Order {
    /// Build a new pending order from customer data and cart items.
    ///
    /// Subtotal is Σ price×quantity; shipping is a flat fee waived at the
    /// free-shipping threshold; total is subtotal + shipping.
    pub fn new(customer: Customer, items: Vec<LineItem>) -> Self {
        let now = Utc::now();
        let subtotal: f64 = items.iter().map(|i| i.price * i.quantity as f64).sum();
        let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            FLAT_SHIPPING
        };

        Order {
            order_id: generate_order_id(now),
            created_at: now,
            updated_at: now,
            status: OrderStatus::Pending,
            customer,
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
            payment: Payment {
                method: "paypal".into(),
                ..Payment::default()
            },
            fulfillment: Fulfillment::default(),
            status_history: Vec::new(),
        }
    }

    /// Unconditionally move the order to `new_status`, appending a history
    /// entry that records the prior status. Invalid transitions (e.g.
    /// delivered→pending) are accepted without error.
    pub fn update_status(&mut self, new_status: OrderStatus, notes: Option<&str>) {
        let now = Utc::now();
        self.status_history.push(StatusChange {
            status: self.status,
            changed_to: new_status,
            timestamp: now,
            notes: notes.map(str::to_owned),
        });
        self.status = new_status;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_customer() -> Customer {
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

    fn item(id: &str, price: f64, quantity: u32) -> LineItem {
        LineItem {
            id: id.into(),
            name: id.into(),
            sku: String::new(),
            variant: String::new(),
            price,
            quantity,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Cart over the free-shipping threshold: shipping waived.
    #[test]
    fn test_totals_above_free_shipping_threshold() {
        let order = Order::new(
            sample_customer(),
            vec![item("projector", 34.99, 1), item("led-strip", 29.99, 1)],
        );
        assert!(close(order.subtotal, 64.98));
        assert!(close(order.shipping, 0.0));
        assert!(close(order.total, 64.98));
    }

    /// Cart under the threshold: flat fee applies.
    #[test]
    fn test_totals_below_free_shipping_threshold() {
        let order = Order::new(sample_customer(), vec![item("blender", 10.0, 1)]);
        assert!(close(order.subtotal, 10.0));
        assert!(close(order.shipping, 4.99));
        assert!(close(order.total, 14.99));
    }

    /// Shipping is zero exactly at the threshold.
    #[test]
    fn test_free_shipping_at_exact_threshold() {
        let order = Order::new(sample_customer(), vec![item("x", 25.0, 2)]);
        assert!(close(order.subtotal, 50.0));
        assert!(close(order.shipping, 0.0));
    }

    /// Total always equals subtotal + shipping, quantities included.
    #[test]
    fn test_total_is_subtotal_plus_shipping() {
        let order = Order::new(sample_customer(), vec![item("x", 7.25, 3)]);
        assert!(close(order.total, order.subtotal + order.shipping));
    }

    #[test]
    fn test_update_status_appends_exactly_one_entry() {
        let mut order = Order::new(sample_customer(), vec![item("x", 10.0, 1)]);
        assert!(order.status_history.is_empty());

        order.update_status(OrderStatus::Paid, Some("PayPal payment confirmed"));
        assert_eq!(order.status_history.len(), 1);
        assert_eq!(order.status, OrderStatus::Paid);

        let entry = &order.status_history[0];
        assert_eq!(entry.status, OrderStatus::Pending);
        assert_eq!(entry.changed_to, OrderStatus::Paid);
        assert_eq!(entry.notes.as_deref(), Some("PayPal payment confirmed"));
    }

    /// No transition table: even delivered→pending is accepted and logged.
    #[test]
    fn test_backwards_transition_is_accepted() {
        let mut order = Order::new(sample_customer(), vec![item("x", 10.0, 1)]);
        order.update_status(OrderStatus::Delivered, None);
        order.update_status(OrderStatus::Pending, None);

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.status_history.len(), 2);
        assert_eq!(order.status_history[1].status, OrderStatus::Delivered);
        assert_eq!(order.status_history[1].changed_to, OrderStatus::Pending);
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for st in OrderStatus::ALL {
            assert_eq!(st.to_string().parse::<OrderStatus>(), Ok(st));
        }
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_id_shape() {
        let id = generate_order_id(Utc::now());
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SB");
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }
}
