use std::sync::Arc;

use clap::Subcommand;
use storefront_api::CartContext;
use storefront_core::{
    config::LoadOptions,
    domain::cart::{Cart, CartItemId},
    VariantId,
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    #[command(about = "Show the current cart")]
    Show,
    #[command(about = "Add a product variant to the cart")]
    Add {
        variant_id: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    #[command(about = "Change the quantity of a cart line")]
    Update { item_id: String, quantity: u32 },
    #[command(about = "Remove a cart line")]
    Remove { item_id: String },
}

pub fn run(options: LoadOptions, command: CartCommand) -> CommandResult {
    with_session("cart", options, |session| {
        let cart = CartContext::new(Arc::clone(&session.api));
        let result = session.block_on(async {
            match command {
                CartCommand::Show => cart.refresh().await,
                CartCommand::Add { variant_id, quantity } => {
                    cart.add_item(&VariantId(variant_id), quantity).await
                }
                CartCommand::Update { item_id, quantity } => {
                    cart.update_quantity(&CartItemId(item_id), quantity).await
                }
                CartCommand::Remove { item_id } => cart.remove_item(&CartItemId(item_id)).await,
            }
        });
        respond("cart", result, summary)
    })
}

fn summary(cart: &Cart) -> String {
    format!("{} item(s), subtotal {}", cart.item_count(), cart.display_subtotal())
}
