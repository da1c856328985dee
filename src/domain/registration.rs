//! Customer registrations
//!
//! Registrations are created by the external registration flow and are
//! read-only for this workflow: the merge step looks them up by email to
//! attach customer details to an order aggregate.

use serde::{Deserialize, Serialize};

/// A customer profile from the `registrations` collection.
///
/// `email` is the natural key. Duplicate emails are not expected but not
/// rejected; lookups resolve last-write-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub phone: String,
    /// Free-text address from the registration form. Stored but unused:
    /// aggregates derive their address from district and state.
    #[serde(default)]
    pub address: String,
    pub district: String,
    pub state: String,
    pub user_type: String,
}

impl Registration {
    /// Postal address shown on aggregates and invoices.
    pub fn postal_address(&self) -> String {
        format!("{}, {}", self.district, self.state)
    }
}
