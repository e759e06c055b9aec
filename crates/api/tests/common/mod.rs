#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use storefront_api::{ApiError, PageRequest, StorefrontApi};
use storefront_core::domain::{
    cart::{Cart, CartItem, CartItemId},
    content::{ContentPage, ContentPageDraft, ContentPageId},
    coupon::{Coupon, CouponDraft, CouponId},
    customer::{Customer, CustomerId, CustomerType},
    inventory::{InventoryAdjustment, InventoryLevel},
    order::{Order, OrderId, OrderStatus},
    page::{Page, Pagination},
    product::{CatalogVariant, Product, ProductId, SegmentPrice, VariantId},
    team::{SalesManager, SalesManagerId, SalesRep, SalesRepId},
};

#[derive(Default)]
pub struct FakeState {
    pub products: Vec<Product>,
    pub customers: HashMap<String, Customer>,
    pub favorites: BTreeSet<String>,
    pub cart: Cart,
    pub coupons: Vec<Coupon>,
    pub pages: Vec<ContentPage>,
    pub inventory: HashMap<String, InventoryLevel>,
    pub orders: Vec<Order>,
    pub fail_with: Option<u16>,
    pub calls: Vec<String>,
}

/// In-memory stand-in for the REST API. `fail_with` makes every call return
/// that status until cleared.
#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.state.lock().expect("fake state").products = products;
        api
    }

    pub fn add_customer(&self, id: &str, customer_type: Option<CustomerType>) {
        self.state.lock().expect("fake state").customers.insert(
            id.to_owned(),
            Customer {
                id: CustomerId(id.to_owned()),
                name: format!("Customer {id}"),
                email: None,
                customer_type,
                is_active: true,
            },
        );
    }

    pub fn fail_with(&self, status: Option<u16>) {
        self.state.lock().expect("fake state").fail_with = status;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("fake state").calls.clone()
    }

    fn enter(&self, call: &str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().expect("fake state");
        state.calls.push(call.to_owned());
        if let Some(status) = state.fail_with {
            return Err(ApiError::Status {
                status,
                message: format!("{call} failed"),
                correlation_id: format!("fake-{call}"),
            });
        }
        Ok(state)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{what} not found"),
        correlation_id: "fake".to_owned(),
    }
}

pub fn product(id: &str, name: &str, regular: i64, segments: Vec<SegmentPrice>) -> Product {
    Product {
        id: ProductId(id.to_owned()),
        name: name.to_owned(),
        slug: name.to_lowercase(),
        description: None,
        category: None,
        price: Decimal::new(regular, 0),
        original_price: None,
        stock_quantity: 0,
        image_url: None,
        is_active: true,
        created_at: None,
        variants: vec![CatalogVariant {
            id: VariantId(format!("{id}-v1")),
            name: "10mg".to_owned(),
            sku: None,
            regular_price: Decimal::new(regular, 0),
            sale_price: None,
            segment_prices: segments,
            is_active: true,
            stock_quantity: 5,
        }],
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn list_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError> {
        let state = self.enter("list_products")?;
        let limit = request.limit as usize;
        let start = (request.page as usize - 1) * limit;
        let items: Vec<Product> = state.products.iter().skip(start).take(limit).cloned().collect();
        let total = state.products.len() as u64;
        let pages = state.products.len().div_ceil(limit).max(1) as u32;
        Ok(Page {
            items,
            pagination: Pagination { page: request.page, limit: request.limit, total, pages },
        })
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let state = self.enter("get_product")?;
        state
            .products
            .iter()
            .find(|product| &product.id == id)
            .cloned()
            .ok_or_else(|| not_found("product"))
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        let state = self.enter("get_customer")?;
        state.customers.get(&id.0).cloned().ok_or_else(|| not_found("customer"))
    }

    async fn list_favorites(&self) -> Result<Vec<Product>, ApiError> {
        let state = self.enter("list_favorites")?;
        Ok(state
            .products
            .iter()
            .filter(|product| state.favorites.contains(&product.id.0))
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, product: &ProductId) -> Result<(), ApiError> {
        let mut state = self.enter("add_favorite")?;
        state.favorites.insert(product.0.clone());
        Ok(())
    }

    async fn remove_favorite(&self, product: &ProductId) -> Result<(), ApiError> {
        let mut state = self.enter("remove_favorite")?;
        state.favorites.remove(&product.0);
        Ok(())
    }

    async fn get_cart(&self) -> Result<Cart, ApiError> {
        Ok(self.enter("get_cart")?.cart.clone())
    }

    async fn add_to_cart(&self, variant: &VariantId, quantity: u32) -> Result<Cart, ApiError> {
        let mut state = self.enter("add_to_cart")?;
        let next_id = format!("item-{}", state.cart.items.len() + 1);
        let product_id = variant.0.trim_end_matches("-v1").to_owned();
        state.cart.items.push(CartItem {
            id: CartItemId(next_id),
            product_id: ProductId(product_id),
            variant_id: variant.clone(),
            name: variant.0.clone(),
            quantity,
            unit_price: Decimal::new(40, 0),
        });
        Ok(state.cart.clone())
    }

    async fn update_cart_item(&self, item: &CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        let mut state = self.enter("update_cart_item")?;
        let line = state
            .cart
            .items
            .iter_mut()
            .find(|line| &line.id == item)
            .ok_or_else(|| not_found("cart item"))?;
        line.quantity = quantity;
        Ok(state.cart.clone())
    }

    async fn remove_cart_item(&self, item: &CartItemId) -> Result<Cart, ApiError> {
        let mut state = self.enter("remove_cart_item")?;
        state.cart.items.retain(|line| &line.id != item);
        Ok(state.cart.clone())
    }

    async fn list_orders(
        &self,
        request: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError> {
        let state = self.enter("list_orders")?;
        let items: Vec<Order> = state
            .orders
            .iter()
            .filter(|order| status.map_or(true, |status| order.status == status))
            .cloned()
            .collect();
        let total = items.len() as u64;
        Ok(Page {
            items,
            pagination: Pagination { page: request.page, limit: request.limit, total, pages: 1 },
        })
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let state = self.enter("get_order")?;
        state.orders.iter().find(|order| &order.id == id).cloned().ok_or_else(|| not_found("order"))
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        let mut state = self.enter("cancel_order")?;
        let order = state
            .orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| not_found("order"))?;
        if !order.status.offers_cancel() {
            return Err(ApiError::Status {
                status: 409,
                message: "order can no longer be cancelled".to_owned(),
                correlation_id: "fake-cancel".to_owned(),
            });
        }
        order.status = OrderStatus::Cancelled;
        Ok(order.clone())
    }

    async fn get_inventory(&self, variant: &VariantId) -> Result<InventoryLevel, ApiError> {
        let state = self.enter("get_inventory")?;
        state.inventory.get(&variant.0).cloned().ok_or_else(|| not_found("inventory"))
    }

    async fn adjust_inventory(
        &self,
        variant: &VariantId,
        adjustment: &InventoryAdjustment,
    ) -> Result<InventoryLevel, ApiError> {
        let mut state = self.enter("adjust_inventory")?;
        let level = state.inventory.entry(variant.0.clone()).or_insert_with(|| InventoryLevel {
            variant_id: variant.clone(),
            quantity: 0,
            reserved_quantity: 0,
            low_stock_threshold: None,
            updated_at: None,
        });
        level.quantity += adjustment.delta;
        Ok(level.clone())
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        Ok(self.enter("list_coupons")?.coupons.clone())
    }

    async fn create_coupon(&self, draft: &CouponDraft) -> Result<Coupon, ApiError> {
        let mut state = self.enter("create_coupon")?;
        let coupon = Coupon {
            id: CouponId(format!("cpn-{}", state.coupons.len() + 1)),
            code: draft.code.clone(),
            discount_type: draft.discount_type,
            discount_value: draft.discount_value,
            minimum_order_amount: draft.minimum_order_amount,
            usage_limit: draft.usage_limit,
            usage_count: 0,
            starts_at: draft.starts_at,
            expires_at: draft.expires_at,
            is_active: draft.is_active,
        };
        state.coupons.push(coupon.clone());
        Ok(coupon)
    }

    async fn update_coupon(&self, id: &CouponId, draft: &CouponDraft) -> Result<Coupon, ApiError> {
        let mut state = self.enter("update_coupon")?;
        let coupon = state
            .coupons
            .iter_mut()
            .find(|coupon| &coupon.id == id)
            .ok_or_else(|| not_found("coupon"))?;
        coupon.code = draft.code.clone();
        coupon.discount_value = draft.discount_value;
        coupon.expires_at = draft.expires_at;
        coupon.is_active = draft.is_active;
        Ok(coupon.clone())
    }

    async fn delete_coupon(&self, id: &CouponId) -> Result<(), ApiError> {
        let mut state = self.enter("delete_coupon")?;
        state.coupons.retain(|coupon| &coupon.id != id);
        Ok(())
    }

    async fn list_pages(&self) -> Result<Vec<ContentPage>, ApiError> {
        Ok(self.enter("list_pages")?.pages.clone())
    }

    async fn get_page(&self, slug: &str) -> Result<ContentPage, ApiError> {
        let state = self.enter("get_page")?;
        state.pages.iter().find(|page| page.slug == slug).cloned().ok_or_else(|| not_found("page"))
    }

    async fn create_page(&self, draft: &ContentPageDraft) -> Result<ContentPage, ApiError> {
        let mut state = self.enter("create_page")?;
        let page = ContentPage {
            id: ContentPageId(format!("page-{}", state.pages.len() + 1)),
            slug: draft.slug.clone(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            status: draft.status,
            updated_at: None,
        };
        state.pages.push(page.clone());
        Ok(page)
    }

    async fn update_page(
        &self,
        id: &ContentPageId,
        draft: &ContentPageDraft,
    ) -> Result<ContentPage, ApiError> {
        let mut state = self.enter("update_page")?;
        let page = state
            .pages
            .iter_mut()
            .find(|page| &page.id == id)
            .ok_or_else(|| not_found("page"))?;
        page.title = draft.title.clone();
        page.body = draft.body.clone();
        Ok(page.clone())
    }

    async fn delete_page(&self, id: &ContentPageId) -> Result<(), ApiError> {
        let mut state = self.enter("delete_page")?;
        state.pages.retain(|page| &page.id != id);
        Ok(())
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, ApiError> {
        self.enter("list_sales_reps")?;
        Ok(Vec::new())
    }

    async fn list_sales_managers(&self) -> Result<Vec<SalesManager>, ApiError> {
        self.enter("list_sales_managers")?;
        Ok(Vec::new())
    }

    async fn assign_sales_rep(
        &self,
        _manager: &SalesManagerId,
        _rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError> {
        self.enter("assign_sales_rep")?;
        Err(not_found("sales manager"))
    }

    async fn unassign_sales_rep(
        &self,
        _manager: &SalesManagerId,
        _rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError> {
        self.enter("unassign_sales_rep")?;
        Err(not_found("sales manager"))
    }
}
