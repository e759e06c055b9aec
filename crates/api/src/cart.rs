use std::sync::Arc;

use storefront_core::{
    domain::{
        cart::{Cart, CartItemId},
        product::VariantId,
    },
    validation::validate_cart_quantity,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::ApiError;
use crate::storefront::StorefrontApi;

/// Shared view of the server-held cart. Each successful mutation replaces the
/// snapshot with the cart the API returned, so concurrent mutations resolve
/// last-write-wins. A failed call leaves the snapshot untouched.
pub struct CartContext<A: ?Sized> {
    api: Arc<A>,
    snapshot: Arc<RwLock<Cart>>,
}

impl<A: ?Sized> Clone for CartContext<A> {
    fn clone(&self) -> Self {
        Self { api: Arc::clone(&self.api), snapshot: Arc::clone(&self.snapshot) }
    }
}

impl<A> CartContext<A>
where
    A: StorefrontApi + ?Sized,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api, snapshot: Arc::new(RwLock::new(Cart::default())) }
    }

    pub async fn snapshot(&self) -> Cart {
        self.snapshot.read().await.clone()
    }

    pub async fn item_count(&self) -> u64 {
        self.snapshot.read().await.item_count()
    }

    pub async fn refresh(&self) -> Result<Cart, ApiError> {
        let cart = self.api.get_cart().await?;
        Ok(self.replace(cart).await)
    }

    pub async fn add_item(&self, variant: &VariantId, quantity: u32) -> Result<Cart, ApiError> {
        validate_cart_quantity(quantity)?;
        let cart = self.api.add_to_cart(variant, quantity).await?;
        info!(
            event_name = "cart.item.added",
            variant_id = %variant.0,
            quantity,
            "cart item added"
        );
        Ok(self.replace(cart).await)
    }

    pub async fn update_quantity(
        &self,
        item: &CartItemId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        validate_cart_quantity(quantity)?;
        let cart = self.api.update_cart_item(item, quantity).await?;
        Ok(self.replace(cart).await)
    }

    pub async fn remove_item(&self, item: &CartItemId) -> Result<Cart, ApiError> {
        let cart = self.api.remove_cart_item(item).await?;
        info!(event_name = "cart.item.removed", item_id = %item.0, "cart item removed");
        Ok(self.replace(cart).await)
    }

    async fn replace(&self, cart: Cart) -> Cart {
        let mut guard = self.snapshot.write().await;
        *guard = cart.clone();
        cart
    }
}
