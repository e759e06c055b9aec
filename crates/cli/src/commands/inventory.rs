use clap::Subcommand;
use serde::Serialize;
use storefront_api::{forms, StorefrontApi};
use storefront_core::{
    config::LoadOptions,
    domain::inventory::{InventoryAdjustment, InventoryLevel},
    VariantId,
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    #[command(about = "Show stock for a variant")]
    Show { variant_id: String },
    #[command(about = "Adjust stock for a variant by a signed delta")]
    Adjust {
        variant_id: String,
        #[arg(long, allow_negative_numbers = true)]
        delta: i64,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Debug, Serialize)]
struct StockView {
    #[serde(flatten)]
    level: InventoryLevel,
    available: i64,
    low_stock: bool,
}

impl From<InventoryLevel> for StockView {
    fn from(level: InventoryLevel) -> Self {
        Self { available: level.available(), low_stock: level.is_low(), level }
    }
}

pub fn run(options: LoadOptions, command: InventoryCommand) -> CommandResult {
    with_session("inventory", options, |session| {
        let result = match command {
            InventoryCommand::Show { variant_id } => {
                session.block_on(session.api.get_inventory(&VariantId(variant_id)))
            }
            InventoryCommand::Adjust { variant_id, delta, reason } => {
                let adjustment = InventoryAdjustment { delta, reason };
                session.block_on(forms::submit_inventory_adjustment(
                    session.api.as_ref(),
                    &VariantId(variant_id),
                    &adjustment,
                ))
            }
        };
        respond("inventory", result.map(StockView::from), |view| {
            let low = if view.low_stock { " (low stock)" } else { "" };
            format!("{}: {} available{low}", view.level.variant_id.0, view.available)
        })
    })
}
