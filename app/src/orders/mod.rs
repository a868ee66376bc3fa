use anyhow::Result;
use chrono::{DateTime, Utc};
use log::*;

use infra::persistence::Storage;

use crate::services::{Queryable, Request};

mod models;

pub use self::models::{Order, Status};

/// Side-store key holding the serialized order log.
const ORDERS_KEY: &str = "orders";

/// The order log: newest first, append-only. Orders are never edited or
/// deleted; only their status advances, and that via the derivation rule
/// applied on read.
#[derive(Debug)]
pub struct Orders<S> {
    store: S,
}

/// List every placed order, statuses freshly derived.
#[derive(Debug, Clone, Copy)]
pub struct OrderHistory;

impl<S: Storage> Orders<S> {
    pub fn new(store: S) -> Self {
        Orders { store }
    }

    /// Load the log, re-derive every status against the current clock, and
    /// write the log back only if something advanced. Absent or
    /// undecodable state reads as an empty log.
    pub fn load_all(&self) -> Result<Vec<Order>> {
        self.load_all_at(Utc::now())
    }

    fn load_all_at(&self, now: DateTime<Utc>) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.store.load(ORDERS_KEY)?.unwrap_or_default();

        let mut changed = false;
        for order in orders.iter_mut() {
            let derived = order.status_at(now);
            if derived != order.status {
                info!("Order {} is now {}", order.id, derived);
                order.status = derived;
                changed = true;
            }
        }
        if changed {
            self.store.save(ORDERS_KEY, &orders)?;
        }

        Ok(orders)
    }

    /// Prepend to the log and persist the whole sequence.
    pub fn append(&self, order: Order) -> Result<()> {
        let mut orders: Vec<Order> = self.store.load(ORDERS_KEY)?.unwrap_or_default();
        debug!("Append order {} to {} existing", order.id, orders.len());
        orders.insert(0, order);
        self.store.save(ORDERS_KEY, &orders)
    }
}

impl Request for OrderHistory {
    type Resp = Vec<Order>;
}

impl<S: Storage> Queryable<OrderHistory> for Orders<S> {
    fn query(&self, _: OrderHistory) -> Result<Vec<Order>> {
        self.load_all()
    }
}
