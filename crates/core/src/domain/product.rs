use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerType;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPrice {
    pub customer_type: CustomerType,
    pub regular_price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVariant {
    pub id: VariantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub regular_price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub segment_prices: Vec<SegmentPrice>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub stock_quantity: i64,
}

impl CatalogVariant {
    /// First segment price stored under `customer_type`. The API keeps at
    /// most one per type; on duplicates the earliest entry wins.
    pub fn segment_price(&self, customer_type: CustomerType) -> Option<&SegmentPrice> {
        self.segment_prices.iter().find(|segment| segment.customer_type == customer_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub variants: Vec<CatalogVariant>,
}

impl Product {
    /// The variant list pricing is driven by: the first active one.
    pub fn primary_variant(&self) -> Option<&CatalogVariant> {
        self.variants.iter().find(|variant| variant.is_active)
    }

    pub fn in_stock(&self) -> bool {
        let mut active = self.variants.iter().filter(|variant| variant.is_active).peekable();
        if active.peek().is_none() {
            return self.stock_quantity > 0;
        }
        active.any(|variant| variant.stock_quantity > 0)
    }
}

fn default_true() -> bool {
    true
}
