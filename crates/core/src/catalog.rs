use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    customer::CustomerType,
    page::{Page, Pagination},
    product::{Product, ProductId},
};
use crate::pricing::{DisplayPrice, PriceResolver, SegmentPriceResolver};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    NameAsc,
    NameDesc,
    Newest,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "featured" => Ok(Self::Featured),
            "price-low-high" | "price-asc" => Ok(Self::PriceLowHigh),
            "price-high-low" | "price-desc" => Ok(Self::PriceHighLow),
            "name-asc" | "name" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "newest" => Ok(Self::Newest),
            other => Err(format!(
                "unknown sort order `{other}` (expected featured|price-low-high|\
                 price-high-low|name-asc|name-desc|newest)"
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock_only: bool,
}

impl ListingFilter {
    fn matches_text(&self, product: &Product) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        let haystacks = [
            Some(product.name.as_str()),
            product.description.as_deref(),
            product.category.as_ref().map(|category| category.name.as_str()),
        ];
        haystacks.into_iter().flatten().any(|text| text.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, product: &Product) -> bool {
        match self.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(slug) => product
                .category
                .as_ref()
                .is_some_and(|category| category.slug.eq_ignore_ascii_case(slug)),
        }
    }

    fn matches_price(&self, price: &DisplayPrice) -> bool {
        self.min_price.map_or(true, |min| price.price >= min)
            && self.max_price.map_or(true, |max| price.price <= max)
    }
}

/// What a product tile shows: identity plus the price for the viewing customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub price: DisplayPrice,
}

/// Products loaded so far, page by page. Filtering and sorting run over the
/// loaded pages only; nothing here asks the API for a filtered result.
pub struct ProductListing<R = SegmentPriceResolver> {
    resolver: R,
    products: Vec<Product>,
    pagination: Option<Pagination>,
}

impl Default for ProductListing<SegmentPriceResolver> {
    fn default() -> Self {
        Self::new(SegmentPriceResolver)
    }
}

impl<R: PriceResolver> ProductListing<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver, products: Vec::new(), pagination: None }
    }

    /// Replace everything with a freshly fetched first page.
    pub fn reset(&mut self, page: Page<Product>) {
        self.products.clear();
        self.append(page);
    }

    /// Append a "load more" page. Products already present keep their
    /// position; a repeated id from a shifted page is skipped.
    pub fn append(&mut self, page: Page<Product>) {
        for product in page.items {
            if !self.products.iter().any(|existing| existing.id == product.id) {
                self.products.push(product);
            }
        }
        self.pagination = Some(page.pagination);
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn loaded_count(&self) -> usize {
        self.products.len()
    }

    pub fn total(&self) -> Option<u64> {
        self.pagination.map(|pagination| pagination.total)
    }

    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|pagination| pagination.has_more())
    }

    /// Page number to request next; `1` before anything was loaded.
    pub fn next_page(&self) -> Option<u32> {
        match self.pagination {
            None => Some(1),
            Some(pagination) if pagination.has_more() => Some(pagination.page + 1),
            Some(_) => None,
        }
    }

    pub fn visible_cards(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        customer_type: Option<CustomerType>,
    ) -> Vec<ProductCard> {
        let mut visible: Vec<(&Product, ProductCard)> = self
            .products
            .iter()
            .filter(|product| product.is_active)
            .filter(|product| filter.matches_text(product) && filter.matches_category(product))
            .map(|product| (product, self.card(product, customer_type)))
            .filter(|(_, card)| filter.matches_price(&card.price))
            .filter(|(_, card)| !filter.in_stock_only || card.in_stock)
            .collect();

        match sort {
            SortOrder::Featured => {}
            SortOrder::PriceLowHigh => {
                visible.sort_by(|a, b| a.1.price.price.cmp(&b.1.price.price));
            }
            SortOrder::PriceHighLow => {
                visible.sort_by(|a, b| b.1.price.price.cmp(&a.1.price.price));
            }
            SortOrder::NameAsc => visible.sort_by(|a, b| compare_names(&a.0.name, &b.0.name)),
            SortOrder::NameDesc => visible.sort_by(|a, b| compare_names(&b.0.name, &a.0.name)),
            // Undated products sink to the end.
            SortOrder::Newest => visible.sort_by(|a, b| match (a.0.created_at, b.0.created_at) {
                (Some(left), Some(right)) => right.cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        }

        visible.into_iter().map(|(_, card)| card).collect()
    }

    fn card(&self, product: &Product, customer_type: Option<CustomerType>) -> ProductCard {
        ProductCard {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.category.as_ref().map(|category| category.name.clone()),
            image_url: product.image_url.clone(),
            in_stock: product.in_stock(),
            price: self.resolver.resolve_product(product, customer_type),
        }
    }
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}
