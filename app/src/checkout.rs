use anyhow::Result;
use chrono::Utc;
use log::*;

use infra::ids::IdGen;
use infra::persistence::Storage;

use crate::cart::Cart;
use crate::orders::{Order, Orders};

/// What came of a checkout attempt. An empty cart is reported, not
/// treated as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Placed(Order),
    NothingToOrder,
}

/// Snapshot the cart into a new order, append it to the log, then empty
/// the cart. The only operation that touches both stores.
///
/// The append must be durable before the cart clears: a failure in
/// between leaves a stale cart behind, never a dropped order.
pub fn place_order<S: Storage>(
    cart: &mut Cart<S>,
    orders: &Orders<S>,
    idgen: &IdGen,
) -> Result<CheckoutOutcome> {
    if cart.is_empty() {
        debug!("Checkout requested with an empty cart");
        return Ok(CheckoutOutcome::NothingToOrder);
    }

    let order = Order::place(idgen.generate(), cart.lines().to_vec(), Utc::now());

    orders.append(order.clone())?;
    cart.clear()?;

    info!(
        "Placed order {}: {} item(s), total {}",
        order.id,
        order.item_count(),
        order.total
    );
    Ok(CheckoutOutcome::Placed(order))
}

#[cfg(test)]
mod test {
    use super::*;

    use infra::ids::Id;
    use infra::persistence::SledStore;

    use crate::menu::{Menu, MenuItem};
    use crate::orders::Status;

    struct Rig {
        menu: Menu,
        cart: Cart<SledStore>,
        orders: Orders<SledStore>,
        idgen: IdGen,
    }

    impl Rig {
        fn new() -> Self {
            env_logger::try_init().unwrap_or_default();
            let store = SledStore::temporary().expect("temporary store");
            Rig {
                menu: Menu::new(),
                cart: Cart::load(store.clone()).expect("load cart"),
                orders: Orders::new(store),
                idgen: IdGen::new(),
            }
        }

        fn item(&self, id: i64) -> MenuItem {
            self.menu.item(Id::from(id)).expect("catalog item").clone()
        }

        fn checkout(&mut self) -> CheckoutOutcome {
            place_order(&mut self.cart, &self.orders, &self.idgen).expect("place order")
        }
    }

    #[test]
    fn places_the_cart_as_a_preparing_order_and_empties_it() {
        let mut rig = Rig::new();
        let samosa = rig.item(1); // 30
        let sandwich = rig.item(2); // 50

        rig.cart.add_item(&samosa).expect("add");
        rig.cart.add_item(&samosa).expect("add");
        rig.cart.add_item(&sandwich).expect("add");

        let outcome = rig.checkout();

        let order = match outcome {
            CheckoutOutcome::Placed(order) => order,
            other => panic!("expected a placed order, got {:?}", other),
        };
        assert_eq!(order.total, 110);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.status, Status::Preparing);
        assert!(rig.cart.is_empty());

        let listed = rig.orders.load_all().expect("load");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, order.id);
    }

    #[test]
    fn empty_cart_checkout_reports_nothing_to_order() {
        let mut rig = Rig::new();

        let outcome = rig.checkout();

        assert_eq!(outcome, CheckoutOutcome::NothingToOrder);
        assert!(rig.cart.is_empty());
        assert_eq!(rig.orders.load_all().expect("load"), vec![]);
    }

    #[test]
    fn placed_snapshots_ignore_later_cart_changes() {
        let mut rig = Rig::new();
        let chai = rig.item(5);

        rig.cart.add_item(&chai).expect("add");
        let outcome = rig.checkout();
        let placed = match outcome {
            CheckoutOutcome::Placed(order) => order,
            other => panic!("expected a placed order, got {:?}", other),
        };

        let fries = rig.item(7);
        for _ in 0..4 {
            rig.cart.add_item(&fries).expect("add");
        }

        let listed = rig.orders.load_all().expect("load");
        assert_eq!(listed[0].items, placed.items);
        assert_eq!(listed[0].total, placed.total);
    }

    #[test]
    fn rapid_orders_get_distinct_ids_newest_first() {
        let mut rig = Rig::new();

        for _ in 0..3 {
            let samosa = rig.item(1);
            rig.cart.add_item(&samosa).expect("add");
            rig.checkout();
        }

        let listed = rig.orders.load_all().expect("load");
        assert_eq!(listed.len(), 3);
        assert!(
            listed[0].id > listed[1].id && listed[1].id > listed[2].id,
            "ids should be distinct and newest first: {:?}",
            listed.iter().map(|o| o.id).collect::<Vec<_>>()
        );
    }
}
