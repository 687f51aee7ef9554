use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Client details entered alongside the quotation.
///
/// Shipping mirrors billing as a one-shot copy: turning `same_as_billing` on
/// copies the billing address into shipping at that moment. Later billing edits
/// do not propagate, and turning the flag off keeps whatever shipping held.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gst_number: String,
    pub billing_address: String,
    pub shipping_address: String,
    pub same_as_billing: bool,
}

impl ClientInfo {
    /// Explicit state transition for the mirroring toggle; the copy happens
    /// here and nowhere else.
    pub fn set_same_as_billing(&mut self, value: bool) {
        if value {
            self.shipping_address = self.billing_address.clone();
        }
        self.same_as_billing = value;
    }

    /// The address the quotation document ships to.
    pub fn effective_shipping_address(&self) -> &str {
        if self.same_as_billing {
            &self.billing_address
        } else {
            &self.shipping_address
        }
    }
}
