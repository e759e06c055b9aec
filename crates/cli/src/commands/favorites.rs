use std::sync::Arc;

use clap::Subcommand;
use serde::Serialize;
use storefront_api::{ApiError, FavoritesContext, StorefrontApi};
use storefront_core::{config::LoadOptions, ProductId};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    #[command(about = "List favorite products")]
    List,
    #[command(about = "Mark a product as favorite")]
    Add { product_id: String },
    #[command(about = "Remove a product from favorites")]
    Remove { product_id: String },
}

#[derive(Debug, Serialize)]
struct FavoriteState {
    product_id: ProductId,
    favorite: bool,
    changed: bool,
}

pub fn run(options: LoadOptions, command: FavoritesCommand) -> CommandResult {
    with_session("favorites", options, |session| match command {
        FavoritesCommand::List => {
            let result = session.block_on(session.api.list_favorites());
            respond("favorites", result, |products| format!("{} favorite(s)", products.len()))
        }
        FavoritesCommand::Add { product_id } => {
            set_favorite(session.block_on(async {
                let favorites = FavoritesContext::new(Arc::clone(&session.api));
                ensure_state(&favorites, ProductId(product_id), true).await
            }))
        }
        FavoritesCommand::Remove { product_id } => {
            set_favorite(session.block_on(async {
                let favorites = FavoritesContext::new(Arc::clone(&session.api));
                ensure_state(&favorites, ProductId(product_id), false).await
            }))
        }
    })
}

async fn ensure_state<A>(
    favorites: &FavoritesContext<A>,
    product_id: ProductId,
    wanted: bool,
) -> Result<FavoriteState, ApiError>
where
    A: StorefrontApi + ?Sized,
{
    favorites.refresh().await?;
    if favorites.contains(&product_id).await == wanted {
        return Ok(FavoriteState { product_id, favorite: wanted, changed: false });
    }
    let favorite = favorites.toggle(&product_id).await?;
    Ok(FavoriteState { product_id, favorite, changed: true })
}

fn set_favorite(result: Result<FavoriteState, ApiError>) -> CommandResult {
    respond("favorites", result, |state| {
        let verb = if state.favorite { "is a favorite" } else { "is not a favorite" };
        let note = if state.changed { "" } else { " (unchanged)" };
        format!("{} {verb}{note}", state.product_id.0)
    })
}
