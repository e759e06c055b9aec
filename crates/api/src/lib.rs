pub mod browse;
pub mod cart;
pub mod client;
pub mod error;
pub mod favorites;
pub mod forms;
pub mod storefront;

pub use browse::CatalogBrowser;
pub use cart::CartContext;
pub use client::HttpApiClient;
pub use error::ApiError;
pub use favorites::FavoritesContext;
pub use storefront::{PageRequest, StorefrontApi};
