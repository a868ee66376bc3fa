use anyhow::Result;
use log::*;

pub mod cart;
pub mod chat;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod orders;
pub mod services;

use infra::ids::IdGen;
use infra::persistence::SledStore;

pub use crate::checkout::CheckoutOutcome;

/// Composition root: opens the side-store, rehydrates the cart, and hands
/// out the stores. One instance per running application; nothing here is
/// a hidden singleton.
#[derive(Debug)]
pub struct TuckShop {
    menu: menu::Menu,
    cart: cart::Cart<SledStore>,
    orders: orders::Orders<SledStore>,
    idgen: IdGen,
}

impl TuckShop {
    pub fn new(config: &config::Config) -> Result<Self> {
        let store = config.db.build()?;

        info!("Opening the tuck shop");
        let menu = menu::Menu::new();
        let cart = cart::Cart::load(store.clone())?;
        let orders = orders::Orders::new(store);
        let idgen = IdGen::new();

        Ok(TuckShop {
            menu,
            cart,
            orders,
            idgen,
        })
    }

    pub fn menu(&self) -> &menu::Menu {
        &self.menu
    }

    pub fn cart(&self) -> &cart::Cart<SledStore> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut cart::Cart<SledStore> {
        &mut self.cart
    }

    pub fn orders(&self) -> &orders::Orders<SledStore> {
        &self.orders
    }

    /// Run the checkout orchestration over this shop's own stores.
    pub fn place_order(&mut self) -> Result<CheckoutOutcome> {
        checkout::place_order(&mut self.cart, &self.orders, &self.idgen)
    }
}
