use anyhow::Result;
use log::*;

use infra::ids::Id;
use infra::persistence::Storage;

use crate::menu::MenuItem;

mod models;

pub use self::models::CartLine;

/// Side-store key holding the serialized line collection.
const CART_KEY: &str = "cartItems";

/// The per-session cart: at most one line per item id, each with quantity
/// of at least one. Every mutation mirrors the whole collection to the
/// side-store before returning.
#[derive(Debug)]
pub struct Cart<S> {
    lines: Vec<CartLine>,
    store: S,
}

impl<S: Storage> Cart<S> {
    /// Rehydrate from the side-store. Absent or undecodable state seeds an
    /// empty cart; it is never fatal.
    pub fn load(store: S) -> Result<Self> {
        let lines: Vec<CartLine> = store.load(CART_KEY)?.unwrap_or_default();
        debug!("Rehydrated {} cart line(s)", lines.len());
        Ok(Cart { lines, store })
    }

    pub fn add_item(&mut self, item: &MenuItem) -> Result<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine::first_of(item));
        }
        self.persist()
    }

    /// Absent ids are a no-op, not an error.
    pub fn remove_item(&mut self, id: Id<MenuItem>) -> Result<()> {
        self.lines.retain(|l| l.item.id != id);
        self.persist()
    }

    /// A quantity of zero removes the line; lines never store zero.
    pub fn set_quantity(&mut self, id: Id<MenuItem>, quantity: u64) -> Result<()> {
        if quantity == 0 {
            return self.remove_item(id);
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == id) {
            line.quantity = quantity;
        }
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.lines.clear();
        self.persist()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Recomputed on every read, never cached.
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(CART_KEY, &self.lines)
    }
}
