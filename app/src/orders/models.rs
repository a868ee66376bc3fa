use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::*;
use serde::{Deserialize, Serialize};

use infra::ids::{Entity, Id};

use crate::cart::CartLine;

/// Minutes after placement at which a preparing order becomes collectable.
const READY_AFTER_MINUTES: i64 = 5;

/// A placed order. `items` and `total` are snapshots taken at placement;
/// nothing mutates them afterwards. Only `status` moves, and only via the
/// derivation rule.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Id<Order>,
    pub items: Vec<CartLine>,
    pub total: u64,
    /// RFC 3339, kept as text: one bad stamp should degrade that order to
    /// `Preparing`, not poison the whole log.
    #[serde(rename = "placedAt")]
    pub placed_at: String,
    pub status: Status,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Preparing,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
}

impl Order {
    pub(crate) fn place(id: Id<Order>, items: Vec<CartLine>, placed_at: DateTime<Utc>) -> Self {
        let total = items.iter().map(CartLine::line_total).sum();
        Order {
            id,
            items,
            total,
            placed_at: placed_at.to_rfc3339(),
            status: Status::Preparing,
        }
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// The status this order should show as of `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> Status {
        derive_status(&self.placed_at, self.status, now)
    }
}

/// One-way transition: `Preparing` becomes `ReadyForPickup` once more than
/// the threshold has elapsed since placement. An unparseable stamp, or a
/// clock reading from before the stamp, reads as not-yet-elapsed.
fn derive_status(placed_at: &str, stored: Status, now: DateTime<Utc>) -> Status {
    if stored != Status::Preparing {
        return stored;
    }
    let placed = match DateTime::parse_from_rfc3339(placed_at) {
        Ok(t) => t.with_timezone(&Utc),
        Err(e) => {
            debug!("Unparseable placement stamp {:?}: {}", placed_at, e);
            return stored;
        }
    };
    if now.signed_duration_since(placed) > Duration::minutes(READY_AFTER_MINUTES) {
        Status::ReadyForPickup
    } else {
        stored
    }
}

impl fmt::Display for Status {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Preparing => write!(fmt, "Preparing"),
            Status::ReadyForPickup => write!(fmt, "Ready for Pickup"),
        }
    }
}

impl Entity for Order {
    const PREFIX: &'static str = "order";
}
