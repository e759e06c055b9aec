use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{
    config::ApiConfig,
    domain::{
        cart::{Cart, CartItemId},
        content::{ContentPage, ContentPageDraft, ContentPageId},
        coupon::{Coupon, CouponDraft, CouponId},
        customer::{Customer, CustomerId},
        inventory::{InventoryAdjustment, InventoryLevel},
        order::{Order, OrderId, OrderStatus},
        page::{Page, Pagination},
        product::{Product, ProductId, VariantId},
        team::{SalesManager, SalesManagerId, SalesRep, SalesRepId},
    },
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::storefront::{PageRequest, StorefrontApi};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_ERROR_MESSAGE_LEN: usize = 200;

/// reqwest-backed client for the storefront REST API.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl HttpApiClient {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Client)?;
        Self::with_client(client, config.normalized_base_url(), config.token.clone())
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        token: Option<SecretString>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim().trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url, token })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> PreparedRequest {
        let url = self.url(segments);
        let correlation_id = Uuid::new_v4().to_string();
        let path = url.path().to_string();
        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, correlation_id.as_str());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        PreparedRequest { builder, correlation_id, method, path }
    }

    async fn fetch<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> Result<T, ApiError> {
        let correlation_id = prepared.correlation_id.clone();
        let body = self.dispatch(prepared).await?;
        serde_json::from_str(&body).map_err(|source| {
            warn!(
                event_name = "api.response.decode_failed",
                correlation_id = %correlation_id,
                error = %source,
                "api response body did not match the expected shape"
            );
            ApiError::Decode { correlation_id, source }
        })
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        prepared: PreparedRequest,
    ) -> Result<Page<T>, ApiError> {
        let body: ListBody<T> = self.fetch(prepared).await?;
        Ok(body.into_page())
    }

    async fn execute(&self, prepared: PreparedRequest) -> Result<(), ApiError> {
        self.dispatch(prepared).await.map(|_| ())
    }

    async fn dispatch(&self, prepared: PreparedRequest) -> Result<String, ApiError> {
        let PreparedRequest { builder, correlation_id, method, path } = prepared;
        let started = Instant::now();
        debug!(
            event_name = "api.request.sent",
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
            "sending api request"
        );

        let response = builder.send().await.map_err(|source| {
            warn!(
                event_name = "api.request.transport_failed",
                correlation_id = %correlation_id,
                method = %method,
                path = %path,
                error = %source,
                "api request did not complete"
            );
            ApiError::Transport { correlation_id: correlation_id.clone(), source }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            correlation_id: correlation_id.clone(),
            source,
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("request failed").to_string()
            });
            warn!(
                event_name = "api.request.rejected",
                correlation_id = %correlation_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                elapsed_ms,
                message = %message,
                "api request returned an error status"
            );
            return Err(ApiError::Status { status: status.as_u16(), message, correlation_id });
        }

        debug!(
            event_name = "api.request.completed",
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "api request completed"
        );
        Ok(body)
    }
}

struct PreparedRequest {
    builder: RequestBuilder,
    correlation_id: String,
    method: Method,
    path: String,
}

impl PreparedRequest {
    fn query(mut self, query: &[(&str, String)]) -> Self {
        self.builder = self.builder.query(query);
        self
    }

    fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.json(body);
        self
    }
}

/// Pulls a human-readable reason out of an error body: `{"error": ..}`,
/// `{"message": ..}`, or the raw text when it is short.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(payload) = serde_json::from_str::<Value>(trimmed) {
        for key in ["error", "message"] {
            match payload.get(key) {
                Some(Value::String(message)) if !message.trim().is_empty() => {
                    return Some(message.trim().to_string());
                }
                Some(Value::Object(nested)) => {
                    if let Some(Value::String(message)) = nested.get("message") {
                        return Some(message.trim().to_string());
                    }
                }
                _ => {}
            }
        }
        return None;
    }

    Some(trimmed.chars().take(MAX_ERROR_MESSAGE_LEN).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Enveloped(ListEnvelope<T>),
}

#[derive(Deserialize)]
struct ListEnvelope<T> {
    #[serde(
        alias = "data",
        alias = "products",
        alias = "favorites",
        alias = "orders",
        alias = "coupons",
        alias = "pages",
        alias = "reps",
        alias = "salesReps",
        alias = "managers",
        alias = "salesManagers"
    )]
    items: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

impl<T> ListBody<T> {
    fn into_page(self) -> Page<T> {
        match self {
            Self::Bare(items) => Page::unpaginated(items),
            Self::Enveloped(ListEnvelope { items, pagination: Some(pagination) }) => {
                Page { items, pagination }
            }
            Self::Enveloped(ListEnvelope { items, pagination: None }) => Page::unpaginated(items),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartBody<'a> {
    variant_id: &'a VariantId,
    quantity: u32,
}

#[derive(Serialize)]
struct QuantityBody {
    quantity: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteBody<'a> {
    product_id: &'a ProductId,
}

fn page_query(request: PageRequest) -> Vec<(&'static str, String)> {
    vec![("page", request.page.to_string()), ("limit", request.limit.to_string())]
}

#[async_trait]
impl StorefrontApi for HttpApiClient {
    async fn list_products(&self, request: PageRequest) -> Result<Page<Product>, ApiError> {
        let prepared = self.request(Method::GET, &["products"]).query(&page_query(request));
        self.fetch_list(prepared).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.fetch(self.request(Method::GET, &["products", id.0.as_str()])).await
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ApiError> {
        self.fetch(self.request(Method::GET, &["customers", id.0.as_str()])).await
    }

    async fn list_favorites(&self) -> Result<Vec<Product>, ApiError> {
        let page: Page<Product> =
            self.fetch_list(self.request(Method::GET, &["favorites"])).await?;
        Ok(page.items)
    }

    async fn add_favorite(&self, product: &ProductId) -> Result<(), ApiError> {
        let prepared = self
            .request(Method::POST, &["favorites"])
            .json(&FavoriteBody { product_id: product });
        self.execute(prepared).await
    }

    async fn remove_favorite(&self, product: &ProductId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["favorites", product.0.as_str()])).await
    }

    async fn get_cart(&self) -> Result<Cart, ApiError> {
        self.fetch(self.request(Method::GET, &["cart"])).await
    }

    async fn add_to_cart(&self, variant: &VariantId, quantity: u32) -> Result<Cart, ApiError> {
        let prepared = self
            .request(Method::POST, &["cart", "items"])
            .json(&AddToCartBody { variant_id: variant, quantity });
        self.fetch(prepared).await
    }

    async fn update_cart_item(&self, item: &CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        let prepared = self
            .request(Method::PATCH, &["cart", "items", item.0.as_str()])
            .json(&QuantityBody { quantity });
        self.fetch(prepared).await
    }

    async fn remove_cart_item(&self, item: &CartItemId) -> Result<Cart, ApiError> {
        self.fetch(self.request(Method::DELETE, &["cart", "items", item.0.as_str()])).await
    }

    async fn list_orders(
        &self,
        request: PageRequest,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, ApiError> {
        let mut query = page_query(request);
        if let Some(status) = status {
            query.push(("status", status.as_api_str().to_string()));
        }
        self.fetch_list(self.request(Method::GET, &["orders"]).query(&query)).await
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.fetch(self.request(Method::GET, &["orders", id.0.as_str()])).await
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.fetch(self.request(Method::POST, &["orders", id.0.as_str(), "cancel"])).await
    }

    async fn get_inventory(&self, variant: &VariantId) -> Result<InventoryLevel, ApiError> {
        self.fetch(self.request(Method::GET, &["inventory", variant.0.as_str()])).await
    }

    async fn adjust_inventory(
        &self,
        variant: &VariantId,
        adjustment: &InventoryAdjustment,
    ) -> Result<InventoryLevel, ApiError> {
        let segments = ["inventory", variant.0.as_str(), "adjust"];
        self.fetch(self.request(Method::POST, &segments).json(adjustment)).await
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        let page: Page<Coupon> = self.fetch_list(self.request(Method::GET, &["coupons"])).await?;
        Ok(page.items)
    }

    async fn create_coupon(&self, draft: &CouponDraft) -> Result<Coupon, ApiError> {
        self.fetch(self.request(Method::POST, &["coupons"]).json(draft)).await
    }

    async fn update_coupon(&self, id: &CouponId, draft: &CouponDraft) -> Result<Coupon, ApiError> {
        self.fetch(self.request(Method::PUT, &["coupons", id.0.as_str()]).json(draft)).await
    }

    async fn delete_coupon(&self, id: &CouponId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["coupons", id.0.as_str()])).await
    }

    async fn list_pages(&self) -> Result<Vec<ContentPage>, ApiError> {
        let page: Page<ContentPage> =
            self.fetch_list(self.request(Method::GET, &["pages"])).await?;
        Ok(page.items)
    }

    async fn get_page(&self, slug: &str) -> Result<ContentPage, ApiError> {
        self.fetch(self.request(Method::GET, &["pages", slug])).await
    }

    async fn create_page(&self, draft: &ContentPageDraft) -> Result<ContentPage, ApiError> {
        self.fetch(self.request(Method::POST, &["pages"]).json(draft)).await
    }

    async fn update_page(
        &self,
        id: &ContentPageId,
        draft: &ContentPageDraft,
    ) -> Result<ContentPage, ApiError> {
        self.fetch(self.request(Method::PUT, &["pages", id.0.as_str()]).json(draft)).await
    }

    async fn delete_page(&self, id: &ContentPageId) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["pages", id.0.as_str()])).await
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, ApiError> {
        let page: Page<SalesRep> =
            self.fetch_list(self.request(Method::GET, &["sales-reps"])).await?;
        Ok(page.items)
    }

    async fn list_sales_managers(&self) -> Result<Vec<SalesManager>, ApiError> {
        let page: Page<SalesManager> =
            self.fetch_list(self.request(Method::GET, &["sales-managers"])).await?;
        Ok(page.items)
    }

    async fn assign_sales_rep(
        &self,
        manager: &SalesManagerId,
        rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError> {
        let segments = ["sales-managers", manager.0.as_str(), "reps", rep.0.as_str()];
        self.fetch(self.request(Method::POST, &segments)).await
    }

    async fn unassign_sales_rep(
        &self,
        manager: &SalesManagerId,
        rep: &SalesRepId,
    ) -> Result<SalesManager, ApiError> {
        let segments = ["sales-managers", manager.0.as_str(), "reps", rep.0.as_str()];
        self.fetch(self.request(Method::DELETE, &segments)).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;

    use super::{error_message, HttpApiClient, ListBody};

    #[test]
    fn url_joins_segments_under_the_base_path_and_escapes_ids() {
        let client = HttpApiClient::with_client(Client::new(), "https://api.example.test/v1/", None)
            .expect("client");

        assert_eq!(
            client.url(&["products", "a b/c"]).as_str(),
            "https://api.example.test/v1/products/a%20b%2Fc"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpApiClient::with_client(Client::new(), "not a url", None).is_err());
        assert!(
            HttpApiClient::with_client(Client::new(), "mailto:ops@example.test", None).is_err()
        );
    }

    #[test]
    fn error_message_prefers_structured_fields() {
        assert_eq!(error_message(r#"{"error":"Out of stock"}"#).as_deref(), Some("Out of stock"));
        assert_eq!(
            error_message(r#"{"error":{"message":"Coupon code taken"}}"#).as_deref(),
            Some("Coupon code taken")
        );
        assert_eq!(error_message(r#"{"status":"bad"}"#), None);
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message("   "), None);
    }

    #[test]
    fn list_bodies_accept_bare_arrays_and_envelopes() {
        let bare: ListBody<u32> = serde_json::from_str("[1,2,3]").expect("bare list");
        let page = bare.into_page();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pagination.pages, 1);

        let enveloped: ListBody<u32> = serde_json::from_str(
            r#"{"orders":[4,5],"pagination":{"page":2,"limit":2,"total":9,"pages":5}}"#,
        )
        .expect("enveloped list");
        let page = enveloped.into_page();
        assert_eq!(page.items, vec![4, 5]);
        assert_eq!(page.pagination.page, 2);
        assert!(page.pagination.has_more());
    }
}
