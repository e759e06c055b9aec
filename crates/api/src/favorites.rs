use std::collections::BTreeSet;
use std::sync::Arc;

use storefront_core::domain::product::ProductId;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::ApiError;
use crate::storefront::StorefrontApi;

pub struct FavoritesContext<A: ?Sized> {
    api: Arc<A>,
    favorites: Arc<RwLock<BTreeSet<String>>>,
}

impl<A: ?Sized> Clone for FavoritesContext<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), favorites: Arc::clone(&self.favorites) }
    }
}

impl<A> FavoritesContext<A>
where
    A: StorefrontApi + ?Sized,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api, favorites: Arc::new(RwLock::new(BTreeSet::new())) }
    }

    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let products = self.api.list_favorites().await?;
        let ids: BTreeSet<String> = products.into_iter().map(|product| product.id.0).collect();
        let count = ids.len();
        *self.favorites.write().await = ids;
        Ok(count)
    }

    pub async fn contains(&self, product: &ProductId) -> bool {
        self.favorites.read().await.contains(&product.0)
    }

    pub async fn ids(&self) -> Vec<ProductId> {
        self.favorites.read().await.iter().cloned().map(ProductId).collect()
    }

    /// Flip the favorite state of `product` and return the new state. The
    /// local set only changes once the API accepted the mutation.
    pub async fn toggle(&self, product: &ProductId) -> Result<bool, ApiError> {
        if self.contains(product).await {
            self.api.remove_favorite(product).await?;
            self.favorites.write().await.remove(&product.0);
            info!(event_name = "favorites.removed", product_id = %product.0, "favorite removed");
            Ok(false)
        } else {
            self.api.add_favorite(product).await?;
            self.favorites.write().await.insert(product.0.clone());
            info!(event_name = "favorites.added", product_id = %product.0, "favorite added");
            Ok(true)
        }
    }
}
