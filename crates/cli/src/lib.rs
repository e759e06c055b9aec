pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::config::{ConfigOverrides, LoadOptions};

use commands::{
    cart::CartCommand,
    catalog::{PriceArgs, ProductsArgs},
    coupons::CouponsCommand,
    favorites::FavoritesCommand,
    inventory::InventoryCommand,
    orders::OrdersCommand,
    pages::PagesCommand,
    team::TeamCommand,
    CommandResult,
};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog and admin CLI",
    long_about = "Browse the catalog with segment pricing, manage the cart and favorites, and run admin tasks against the storefront API.",
    after_help = "Examples:\n  storefront doctor --json\n  storefront products --customer cust_123 --sort price-low-high\n  storefront cart add var_10mg --quantity 2"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a storefront.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the API base URL")]
    api_url: Option<String>,
    #[arg(long, global = true, help = "Override the API bearer token")]
    api_token: Option<String>,
    #[arg(long, global = true, help = "Products fetched per catalog page")]
    page_size: Option<u32>,
    #[arg(long, global = true, help = "Customer whose segment prices apply by default")]
    customer_id: Option<String>,
    #[arg(long, global = true, help = "Override the log level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and check that the API is reachable")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List products with display prices for a customer segment")]
    Products(ProductsArgs),
    #[command(about = "Resolve the display price of one product")]
    Price(PriceArgs),
    #[command(subcommand, about = "Show or change the cart")]
    Cart(CartCommand),
    #[command(subcommand, about = "List or change favorite products")]
    Favorites(FavoritesCommand),
    #[command(subcommand, about = "List, inspect or cancel orders")]
    Orders(OrdersCommand),
    #[command(subcommand, about = "Show or adjust variant stock")]
    Inventory(InventoryCommand),
    #[command(subcommand, about = "Manage discount coupons")]
    Coupons(CouponsCommand),
    #[command(subcommand, about = "Manage content pages")]
    Pages(PagesCommand),
    #[command(subcommand, about = "Manage sales reps and managers")]
    Team(TeamCommand),
}

impl Cli {
    /// An explicit `--config` path must exist; otherwise the default
    /// locations are optional.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                api_base_url: self.api_url.clone(),
                api_token: self.api_token.clone(),
                page_size: self.page_size,
                customer_id: self.customer_id.clone(),
                log_level: self.log_level.clone(),
            },
        }
    }
}

pub fn execute(cli: Cli) -> CommandResult {
    let options = cli.load_options();

    match cli.command {
        Command::Config => commands::config::run(options),
        Command::Doctor { json } => commands::doctor::run(options, json),
        Command::Products(args) => commands::catalog::products(options, args),
        Command::Price(args) => commands::catalog::price(options, args),
        Command::Cart(command) => commands::cart::run(options, command),
        Command::Favorites(command) => commands::favorites::run(options, command),
        Command::Orders(command) => commands::orders::run(options, command),
        Command::Inventory(command) => commands::inventory::run(options, command),
        Command::Coupons(command) => commands::coupons::run(options, command),
        Command::Pages(command) => commands::pages::run(options, command),
        Command::Team(command) => commands::team::run(options, command),
    }
}
