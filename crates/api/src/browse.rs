use std::sync::Arc;

use storefront_core::{
    catalog::{ListingFilter, ProductCard, ProductListing, SortOrder},
    domain::customer::{CustomerId, CustomerType},
    pricing::{PriceResolver, SegmentPriceResolver},
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::storefront::{PageRequest, StorefrontApi};

/// Product list screen state: the loaded pages, the viewing customer's
/// segment, and the page size used for "load more".
pub struct CatalogBrowser<A: ?Sized, R = SegmentPriceResolver> {
    api: Arc<A>,
    listing: ProductListing<R>,
    page_size: u32,
    customer_type: Option<CustomerType>,
}

impl<A> CatalogBrowser<A>
where
    A: StorefrontApi + ?Sized,
{
    pub fn new(api: Arc<A>, page_size: u32) -> Self {
        Self::with_resolver(api, page_size, SegmentPriceResolver)
    }
}

impl<A, R> CatalogBrowser<A, R>
where
    A: StorefrontApi + ?Sized,
    R: PriceResolver,
{
    pub fn with_resolver(api: Arc<A>, page_size: u32, resolver: R) -> Self {
        Self { api, listing: ProductListing::new(resolver), page_size, customer_type: None }
    }

    pub fn customer_type(&self) -> Option<CustomerType> {
        self.customer_type
    }

    pub fn set_customer_type(&mut self, customer_type: Option<CustomerType>) {
        self.customer_type = customer_type;
    }

    /// Look up the viewing customer's segment. Without a customer, or when
    /// the lookup fails, the listing prices as anonymous rather than failing.
    pub async fn identify(&mut self, customer: Option<&CustomerId>) -> Option<CustomerType> {
        let Some(customer_id) = customer else {
            self.customer_type = None;
            return None;
        };

        self.customer_type = match self.api.get_customer(customer_id).await {
            Ok(customer) => customer.customer_type,
            Err(error) => {
                warn!(
                    event_name = "catalog.customer_lookup_failed",
                    customer_id = %customer_id.0,
                    correlation_id = error.correlation_id().unwrap_or("none"),
                    error = %error,
                    "customer lookup failed; pricing as anonymous"
                );
                None
            }
        };
        self.customer_type
    }

    pub async fn load_first_page(&mut self) -> Result<usize, ApiError> {
        let page = self.api.list_products(PageRequest::new(1, self.page_size)).await?;
        let count = page.items.len();
        self.listing.reset(page);
        debug!(event_name = "catalog.page_loaded", page = 1, count, "loaded first product page");
        Ok(count)
    }

    /// Fetch the next page if there is one. Returns how many products arrived.
    pub async fn load_more(&mut self) -> Result<Option<usize>, ApiError> {
        let Some(next) = self.listing.next_page() else {
            return Ok(None);
        };
        if next == 1 {
            return self.load_first_page().await.map(Some);
        }

        let page = self.api.list_products(PageRequest::new(next, self.page_size)).await?;
        let count = page.items.len();
        self.listing.append(page);
        debug!(event_name = "catalog.page_loaded", page = next, count, "loaded more products");
        Ok(Some(count))
    }

    pub fn has_more(&self) -> bool {
        self.listing.has_more()
    }

    pub fn listing(&self) -> &ProductListing<R> {
        &self.listing
    }

    pub fn cards(&self, filter: &ListingFilter, sort: SortOrder) -> Vec<ProductCard> {
        self.listing.visible_cards(filter, sort, self.customer_type)
    }
}
