use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;

/// One selected item with its quantity. The item's fields are copied in
/// at add-time; a later catalog change must not reach into carts or
/// placed orders.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u64,
}

impl CartLine {
    pub(super) fn first_of(item: &MenuItem) -> Self {
        CartLine {
            item: item.clone(),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> u64 {
        self.item.price * self.quantity
    }
}
