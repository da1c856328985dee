//! Common test utilities

use std::sync::Arc;

use axum::Router;
use icefactory::api::{self, AppState};
use icefactory::domain::{OrderItem, OrderSubmission, Registration, SalesContext};
use icefactory::store::MemoryStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn sales_context() -> SalesContext {
    SalesContext {
        sales_person: "Ravi".to_string(),
        factory_details: "Frostline Creamery, Vijayawada".to_string(),
        factory_phone_number: "0866-1234567".to_string(),
    }
}

pub fn registration(email: &str, name: &str, district: &str, state: &str) -> Registration {
    Registration {
        email: email.to_string(),
        name: name.to_string(),
        phone: "9876543210".to_string(),
        address: String::new(),
        district: district.to_string(),
        state: state.to_string(),
        user_type: "District".to_string(),
    }
}

pub fn item(name: &str, price: Decimal, quantity: u32, total: Decimal) -> OrderItem {
    OrderItem {
        product_name: name.to_string(),
        price,
        quantity,
        total_amount: total,
    }
}

pub fn submission(email: &str, date: &str, items: Vec<OrderItem>) -> OrderSubmission {
    OrderSubmission {
        id: uuid::Uuid::nil(),
        email: email.to_string(),
        date: date.to_string(),
        items,
    }
}

/// Store seeded with the canonical fixture: Ann (registered, Guntur/AP)
/// with two submissions on 2024-01-01, and an unregistered customer with
/// one submission on 2024-01-02.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();

    store.add_registration(registration("a@x.com", "Ann", "Guntur", "AP"));

    store.add_order_submission(submission(
        "a@x.com",
        "2024-01-01",
        vec![item("Vanilla", dec!(50), 2, dec!(100))],
    ));
    store.add_order_submission(submission(
        "a@x.com",
        "2024-01-01",
        vec![item("Choco", dec!(50), 1, dec!(50))],
    ));
    store.add_order_submission(submission(
        "ghost@x.com",
        "2024-01-02",
        vec![item("Mango", dec!(75), 1, dec!(75))],
    ));

    Arc::new(store)
}

/// Full application router over an in-memory store.
pub fn app(store: Arc<MemoryStore>) -> Router {
    api::build_router(AppState {
        store,
        sales: sales_context(),
    })
}
