use async_trait::async_trait;
use storefront_core::domain::{
    cart::{Cart, CartItemId},
    content::{ContentPage, ContentPageDraft, ContentPageId},
    coupon::{Coupon, CouponDraft, CouponId},
    customer::{Customer, CustomerId},
    inventory::{InventoryAdjustment, InventoryLevel},
    order::{Order, OrderId, OrderStatus},
    page::Page,
    product::{Product, ProductId, VariantId},
    team::{SalesManager, SalesManagerId, SalesRep, SalesRepId},
};

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }
}

/// Operations the storefront and admin screens perform against the REST API.
/// Every call is a single request; nothing is retried.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn list_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError>;
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError>;

    async fn list_favorites(&self) -> Result<Vec<Product>, ApiError>;
    async fn add_favorite(&self, product: &ProductId) -> Result<(), ApiError>;
    async fn remove_favorite(&self, product: &ProductId) -> Result<(), ApiError>;

    async fn get_cart(&self) -> Result<Cart, ApiError>;
    async fn add_to_cart(&self, variant: &VariantId, quantity: u32) -> Result<Cart, ApiError>;
    async fn update_cart_item(&self, item: &CartItemId, quantity: u32) -> Result<Cart, ApiError>;
    async fn remove_cart_item(&self, item: &CartItemId) -> Result<Cart, ApiError>;

    async fn list_orders(
        &self,
        request: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError>;
    async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError>;
    async fn cancel_order(&self, id: &OrderId) -> Result<Order, ApiError>;

    async fn get_inventory(&self, variant: &VariantId) -> Result<InventoryLevel, ApiError>;
    async fn adjust_inventory(
        &self,
        variant: &VariantId,
        adjustment: &InventoryAdjustment,
    ) -> Result<InventoryLevel, ApiError>;

    async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError>;
    async fn create_coupon(&self, draft: &CouponDraft) -> Result<Coupon, ApiError>;
    async fn update_coupon(&self, id: &CouponId, draft: &CouponDraft) -> Result<Coupon, ApiError>;
    async fn delete_coupon(&self, id: &CouponId) -> Result<(), ApiError>;

    async fn list_pages(&self) -> Result<Vec<ContentPage>, ApiError>;
    async fn get_page(&self, slug: &str) -> Result<ContentPage, ApiError>;
    async fn create_page(&self, draft: &ContentPageDraft) -> Result<ContentPage, ApiError>;
    async fn update_page(
        &self,
        id: &ContentPageId,
        draft: &ContentPageDraft,
    ) -> Result<ContentPage, ApiError>;
    async fn delete_page(&self, id: &ContentPageId) -> Result<(), ApiError>;

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, ApiError>;
    async fn list_sales_managers(&self) -> Result<Vec<SalesManager>, ApiError>;
    async fn assign_sales_rep(
        &self,
        manager: &SalesManagerId,
        rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError>;
    async fn unassign_sales_rep(
        &self,
        manager: &SalesManagerId,
        rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError>;
}
