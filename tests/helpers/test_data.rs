// Test Data Factory
//
// Request payloads and provider events used across the integration tests.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use uuid::Uuid;

pub struct TestDataFactory;

impl TestDataFactory {
    /// Unique email address
    pub fn random_email() -> String {
        format!("guest-{}@example.com", Uuid::new_v4().simple())
    }

    /// Convert a dollar amount to cents
    pub fn cents(amount: Decimal) -> i64 {
        (amount * dec!(100)).to_i64().unwrap()
    }

    /// Catalog checkout priced server-side
    pub fn package_checkout(package_id: &str, occupancy: &str, visitors: i64) -> Value {
        json!({
            "package_id": package_id,
            "occupancy": occupancy,
            "visitor_count": visitors,
            "email": "guest@example.com",
            "customer_name": "Ada Obi",
            "phone": "+2348000000000"
        })
    }

    /// Checkout with a client-supplied title and amount, in the booking front end's shape
    pub fn custom_checkout(title: &str, amount_cents: i64, visitors: i64) -> Value {
        json!({
            "packageTitle": title,
            "amountInCents": amount_cents,
            "visitorCount": visitors,
            "customerName": "Chidi Okafor",
            "customerEmail": "chidi@example.com",
            "customerPhone": "+2348111111111"
        })
    }

    pub fn new_package(package_id: &str) -> Value {
        json!({
            "package_id": package_id,
            "title": "ABUJA WEEKEND",
            "description": "A weekend in the capital.",
            "date": "NOVEMBER 7TH - 9TH, 2025",
            "single_price": Self::cents(dec!(1500)),
            "double_price": "1,200"
        })
    }

    pub fn register(email: &str, password: &str) -> Value {
        json!({
            "email": email,
            "password": password,
            "firstName": "Ngozi",
            "lastName": "Eze"
        })
    }

    /// Provider event body for a checkout session
    pub fn webhook_event(event_type: &str, session_id: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": format!("evt_{}", Uuid::new_v4().simple()),
            "object": "event",
            "type": event_type,
            "data": {
                "object": {
                    "id": session_id,
                    "object": "checkout.session",
                    "payment_status": "paid"
                }
            }
        }))
        .unwrap()
    }
}
