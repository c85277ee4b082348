//! Email rendering for the order lifecycle.
//!
//! Nothing here talks SMTP; each generator returns a ready-to-send
//! [`EmailMessage`] and the caller decides what to do with it.

use crate::config::Config;
use crate::orders::Order;

/// What the body of an [`EmailMessage`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Html,
    Text,
}

/// A rendered email, ready for whatever transport the caller has.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub kind: BodyKind,
}

/// Customer-facing order confirmation with an itemized summary and the
/// shipping address.
pub fn order_confirmation(order: &Order, config: &Config) -> EmailMessage {
    let items_html: String = order
        .items
        .iter()
        .map(|item| {
            format!(
                "<tr>\
                 <td style=\"padding: 10px; border-bottom: 1px solid #eee;\">{}</td>\
                 <td style=\"padding: 10px; border-bottom: 1px solid #eee;\">{}</td>\
                 <td style=\"padding: 10px; border-bottom: 1px solid #eee;\">${:.2}</td>\
                 </tr>",
                item.name, item.quantity, item.price
            )
        })
        .collect();

    let address = &order.customer.address;
    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: linear-gradient(135deg, #6366f1, #4f46e5); color: white; padding: 30px; text-align: center; border-radius: 8px 8px 0 0; }}
        .content {{ background: #f9fafb; padding: 30px; border-radius: 0 0 8px 8px; }}
        .order-box {{ background: white; padding: 20px; border-radius: 8px; margin: 20px 0; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th {{ text-align: left; padding: 10px; background: #f3f4f6; }}
        .total {{ font-size: 24px; color: #6366f1; font-weight: bold; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Thank You for Your Order!</h1>
            <p>Order #{order_id}</p>
        </div>
        <div class="content">
            <p>Hi {name},</p>
            <p>We've received your order and are getting it ready! You'll receive another email when your order ships.</p>

            <div class="order-box">
                <h3>Order Summary</h3>
                <table>
                    <tr><th>Product</th><th>Qty</th><th>Price</th></tr>
                    {items}
                </table>
                <hr>
                <p>Subtotal: ${subtotal:.2}</p>
                <p>Shipping: ${shipping:.2}</p>
                <p class="total">Total: ${total:.2}</p>
            </div>

            <div class="order-box">
                <h3>Shipping Address</h3>
                <p>{name}<br>{line1}<br>{line2}<br>{city}, {state} {zip}<br>{country}</p>
            </div>

            <p><strong>Estimated Delivery:</strong> 10-15 business days</p>
            <p>Questions? Reply to this email or contact {support}</p>
        </div>
    </div>
</body>
</html>"#,
        order_id = order.order_id,
        name = order.customer.name,
        items = items_html,
        subtotal = order.subtotal,
        shipping = order.shipping,
        total = order.total,
        line1 = address.line1,
        line2 = address.line2,
        city = address.city,
        state = address.state,
        zip = address.zip,
        country = address.country,
        support = config.support_email,
    );

    EmailMessage {
        to: order.customer.email.clone(),
        subject: format!(
            "Order Confirmed! #{} - {}",
            order.order_id, config.store_name
        ),
        body,
        kind: BodyKind::Html,
    }
}

/// Plain-text fulfillment request addressed to the supplier.
pub fn supplier_order(order: &Order, config: &Config) -> EmailMessage {
    let items_text: String = order
        .items
        .iter()
        .map(|item| {
            let sku = if item.sku.is_empty() { "N/A" } else { &item.sku };
            let variant = if item.variant.is_empty() {
                "Standard"
            } else {
                &item.variant
            };
            format!(
                "Product: {}\nSKU: {}\nQuantity: {}\nVariant: {}\n---\n",
                item.name, sku, item.quantity, variant
            )
        })
        .collect();

    let address = &order.customer.address;
    let body = format!(
        "NEW ORDER - {order_id}\n\n\
         Please fulfill the following order:\n\n\
         {items}\n\
         SHIP TO:\n\
         {name}\n{line1}\n{line2}\n{city}, {state} {zip}\n{country}\n\
         Phone: {phone}\n\n\
         SHIPPING METHOD: ePacket / Standard\n\n\
         Please provide tracking number once shipped.\n\n\
         Thank you,\n\
         {store} Orders\n",
        order_id = order.order_id,
        items = items_text,
        name = order.customer.name,
        line1 = address.line1,
        line2 = address.line2,
        city = address.city,
        state = address.state,
        zip = address.zip,
        country = address.country,
        phone = order.customer.phone,
        store = config.store_name,
    );

    EmailMessage {
        to: config.supplier_email.clone(),
        subject: format!("New Order #{} - Please Fulfill", order.order_id),
        body,
        kind: BodyKind::Text,
    }
}

/// Customer-facing shipping notification with the tracking details.
pub fn shipping_notification(order: &Order, config: &Config) -> EmailMessage {
    let tracking = order
        .fulfillment
        .tracking_number
        .as_deref()
        .unwrap_or("pending");
    let carrier = order.fulfillment.carrier.as_deref().unwrap_or("TBD");
    let eta = order
        .fulfillment
        .estimated_delivery
        .as_deref()
        .unwrap_or("10-15 business days");

    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: #10b981; color: white; padding: 30px; text-align: center; border-radius: 8px; }}
        .tracking-box {{ background: #f0fdf4; border: 2px solid #10b981; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center; }}
        .tracking-number {{ font-size: 24px; font-weight: bold; color: #059669; letter-spacing: 2px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Your Order Has Shipped!</h1>
        </div>
        <p>Hi {name},</p>
        <p>Great news! Your order #{order_id} is on its way!</p>

        <div class="tracking-box">
            <p>Tracking Number:</p>
            <p class="tracking-number">{tracking}</p>
            <p>Carrier: {carrier}</p>
        </div>

        <p><strong>Estimated Delivery:</strong> {eta}</p>
        <p>Track your package: <a href="https://track.example.com/{tracking}">Click Here</a></p>
        <p>Thanks for shopping with {store}!</p>
    </div>
</body>
</html>"#,
        name = order.customer.name,
        order_id = order.order_id,
        tracking = tracking,
        carrier = carrier,
        eta = eta,
        store = config.store_name,
    );

    EmailMessage {
        to: order.customer.email.clone(),
        subject: format!("Your Order Has Shipped! #{}", order.order_id),
        body,
        kind: BodyKind::Html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{Address, Customer, LineItem, Order};

    fn sample_order() -> Order {
        Order::new(
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
            },
            vec![LineItem {
                id: "galaxy-star-projector".into(),
                name: "Galaxy Star Projector Pro".into(),
                sku: "GSP-001".into(),
                variant: "Black".into(),
                price: 34.99,
                quantity: 1,
            }],
        )
    }

    #[test]
    fn test_confirmation_addresses_customer_and_totals() {
        let order = sample_order();
        let email = order_confirmation(&order, &Config::default());

        assert_eq!(email.to, "john@example.com");
        assert_eq!(email.kind, BodyKind::Html);
        assert!(email.subject.contains(&order.order_id));
        assert!(email.body.contains("Hi John Smith"));
        assert!(email.body.contains("Total: $39.98")); // 34.99 + 4.99 shipping
        assert!(email.body.contains("123 Main Street"));
    }

    #[test]
    fn test_supplier_email_goes_to_supplier_with_sku() {
        let order = sample_order();
        let config = Config::default();
        let email = supplier_order(&order, &config);

        assert_eq!(email.to, config.supplier_email);
        assert_eq!(email.kind, BodyKind::Text);
        assert!(email.body.contains("SKU: GSP-001"));
        assert!(email.body.contains("Variant: Black"));
        assert!(email.body.contains("Phone: +1-555-123-4567"));
    }

    #[test]
    fn test_supplier_email_defaults_missing_sku_and_variant() {
        let mut order = sample_order();
        order.items[0].sku.clear();
        order.items[0].variant.clear();
        let email = supplier_order(&order, &Config::default());
        assert!(email.body.contains("SKU: N/A"));
        assert!(email.body.contains("Variant: Standard"));
    }

    #[test]
    fn test_shipping_notification_includes_tracking() {
        let mut order = sample_order();
        order.fulfillment.tracking_number = Some("YT1234567890123456".into());
        order.fulfillment.carrier = Some("Yanwen / USPS".into());
        order.fulfillment.estimated_delivery = Some("September 04, 2026".into());

        let email = shipping_notification(&order, &Config::default());
        assert!(email.subject.contains(&order.order_id));
        assert!(email.body.contains("YT1234567890123456"));
        assert!(email.body.contains("Yanwen / USPS"));
        assert!(email.body.contains("September 04, 2026"));
    }

    #[test]
    fn test_shipping_notification_without_fulfillment_falls_back() {
        let order = sample_order();
        let email = shipping_notification(&order, &Config::default());
        assert!(email.body.contains("pending"));
        assert!(email.body.contains("10-15 business days"));
    }
}
