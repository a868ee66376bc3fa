use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use structopt::StructOpt;

use infra::ids::Id;
use tuckshop::chat::{self, ChatAction};
use tuckshop::menu::{DietFilter, FindItem, MenuItem};
use tuckshop::orders::OrderHistory;
use tuckshop::services::Queryable;
use tuckshop::{CheckoutOutcome, TuckShop};

#[derive(Debug, StructOpt)]
#[structopt(name = "tuck", about = "Tuck shop counter")]
struct Opt {
    /// Configuration file
    #[structopt(parse(from_os_str))]
    config: PathBuf,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "show-menu", about = "Show the menu")]
    ShowMenu {
        /// all, veg or nonveg
        #[structopt(long = "diet", default_value = "all")]
        diet: DietFilter,
        /// Only items whose name or description matches
        #[structopt(long = "search", default_value = "")]
        search: String,
    },
    #[structopt(name = "cart", about = "Manage the cart")]
    Cart(CartCommands),
    #[structopt(name = "order", about = "Place an order, or review past ones")]
    Order(OrderCommands),
    #[structopt(name = "chat", about = "Ask the assistant")]
    Chat { message: Vec<String> },
}

#[derive(Debug, StructOpt)]
enum CartCommands {
    #[structopt(name = "add", about = "Add one of an item")]
    Add { item: i64 },
    #[structopt(name = "remove", about = "Drop an item")]
    Remove { item: i64 },
    #[structopt(name = "set", about = "Set an item's quantity")]
    Set { item: i64, quantity: u64 },
    #[structopt(name = "show", about = "Show the cart")]
    Show,
    #[structopt(name = "clear", about = "Empty the cart")]
    Clear,
}

#[derive(Debug, StructOpt)]
enum OrderCommands {
    #[structopt(name = "place", about = "Place the cart as an order")]
    Place,
    #[structopt(name = "list", about = "List placed orders, newest first")]
    List,
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    tuckshop: tuckshop::config::Config,
    env_logger: tuckshop::config::EnvLogger,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let mut config_buf = String::new();
    File::open(&opt.config)?.read_to_string(&mut config_buf)?;
    let config: Config = toml::from_str(&config_buf)?;

    config.env_logger.builder().init();

    let mut shop = TuckShop::new(&config.tuckshop)?;

    match opt.command {
        Commands::ShowMenu { diet, search } => {
            for item in shop.menu().filtered(diet, &search) {
                print_item(item);
            }
        }
        Commands::Cart(cmd) => cart_command(&mut shop, cmd)?,
        Commands::Order(cmd) => order_command(&mut shop, cmd)?,
        Commands::Chat { message } => {
            let reply = chat::respond(&message.join(" "));
            println!("{}", reply.text);
            if let Some(action) = reply.action {
                println!("(try: tuck {})", suggested_command(action));
            }
        }
    }

    Ok(())
}

fn cart_command(shop: &mut TuckShop, cmd: CartCommands) -> Result<()> {
    match cmd {
        CartCommands::Add { item } => {
            let id = Id::<MenuItem>::from(item);
            match shop.menu().query(FindItem(id))? {
                Some(item) => {
                    shop.cart_mut().add_item(&item)?;
                    println!("Added {} to the cart", item.name);
                }
                None => println!("No such item: {}", id),
            }
        }
        CartCommands::Remove { item } => {
            shop.cart_mut().remove_item(Id::from(item))?;
        }
        CartCommands::Set { item, quantity } => {
            shop.cart_mut().set_quantity(Id::from(item), quantity)?;
        }
        CartCommands::Show => {
            for line in shop.cart().lines() {
                println!(
                    "{}: {} x{} = ₹{}",
                    line.item.id,
                    line.item.name,
                    line.quantity,
                    line.line_total()
                );
            }
            println!(
                "{} item(s), total ₹{}",
                shop.cart().item_count(),
                shop.cart().total()
            );
        }
        CartCommands::Clear => {
            shop.cart_mut().clear()?;
            println!("Cart emptied");
        }
    }
    Ok(())
}

fn order_command(shop: &mut TuckShop, cmd: OrderCommands) -> Result<()> {
    match cmd {
        OrderCommands::Place => match shop.place_order()? {
            CheckoutOutcome::Placed(order) => {
                println!(
                    "Order {} placed: {} item(s), total ₹{}. It is being prepared.",
                    order.id,
                    order.item_count(),
                    order.total
                );
            }
            CheckoutOutcome::NothingToOrder => {
                println!("Nothing to order; the cart is empty.");
            }
        },
        OrderCommands::List => {
            for order in shop.orders().query(OrderHistory)? {
                println!(
                    "{} [{}] placed {}: total ₹{}",
                    order.id, order.status, order.placed_at, order.total
                );
                for line in &order.items {
                    println!("  {} x{} = ₹{}", line.item.name, line.quantity, line.line_total());
                }
            }
        }
    }
    Ok(())
}

fn print_item(item: &MenuItem) {
    println!(
        "{}: {} ₹{} [{}{}]",
        item.id,
        item.name,
        item.price,
        item.category,
        if item.veg { ", veg" } else { "" }
    );
    println!("   {}", item.description);
}

fn suggested_command(action: ChatAction) -> &'static str {
    match action {
        ChatAction::ShowMenu => "show-menu",
        ChatAction::ShowCart => "cart show",
        ChatAction::ShowOrders => "order list",
    }
}
