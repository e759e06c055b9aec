use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{
    customer::CustomerType,
    product::{CatalogVariant, Product},
};

/// Segment key each customer type is priced under. Only two paid tiers are
/// stored server-side, so wholesale reads retail prices and enterprise tier 2
/// reads tier 1 prices. Pricing lookups only; the customer keeps its type.
const PRICING_TIERS: [(CustomerType, CustomerType); 4] = [
    (CustomerType::Retail, CustomerType::Retail),
    (CustomerType::Wholesale, CustomerType::Retail),
    (CustomerType::EnterpriseTier1, CustomerType::EnterpriseTier1),
    (CustomerType::EnterpriseTier2, CustomerType::EnterpriseTier1),
];

pub fn pricing_key(customer_type: CustomerType) -> CustomerType {
    PRICING_TIERS
        .iter()
        .find(|(from, _)| *from == customer_type)
        .map(|(_, to)| *to)
        .unwrap_or(customer_type)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "segment", rename_all = "snake_case")]
pub enum PriceSource {
    ProductFallback,
    Segment(CustomerType),
    Variant,
}

/// Price to display, plus the struck-through original when a discount is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPrice {
    pub price: Decimal,
    pub original: Option<Decimal>,
    pub source: PriceSource,
}

impl DisplayPrice {
    pub fn is_discounted(&self) -> bool {
        self.original.is_some()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PriceInput<'a> {
    pub variant: Option<&'a CatalogVariant>,
    pub customer_type: Option<CustomerType>,
    pub fallback_price: Decimal,
    pub fallback_original_price: Option<Decimal>,
}

impl<'a> PriceInput<'a> {
    pub fn for_product(product: &'a Product, customer_type: Option<CustomerType>) -> Self {
        Self {
            variant: product.primary_variant(),
            customer_type,
            fallback_price: product.price,
            fallback_original_price: product.original_price,
        }
    }
}

pub trait PriceResolver: Send + Sync {
    fn resolve(&self, input: PriceInput<'_>) -> DisplayPrice;

    fn resolve_product(
        &self,
        product: &Product,
        customer_type: Option<CustomerType>,
    ) -> DisplayPrice {
        self.resolve(PriceInput::for_product(product, customer_type))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SegmentPriceResolver;

impl PriceResolver for SegmentPriceResolver {
    fn resolve(&self, input: PriceInput<'_>) -> DisplayPrice {
        resolve_display_price(input)
    }
}

pub fn resolve_display_price(input: PriceInput<'_>) -> DisplayPrice {
    let Some(variant) = input.variant else {
        return DisplayPrice {
            price: input.fallback_price,
            original: input.fallback_original_price,
            source: PriceSource::ProductFallback,
        };
    };

    if let Some(customer_type) = input.customer_type {
        let target = pricing_key(customer_type);
        if let Some(segment) = variant.segment_price(target) {
            trace!(
                event_name = "pricing.resolve.segment",
                variant_id = %variant.id.0,
                customer_type = customer_type.as_api_str(),
                pricing_key = target.as_api_str(),
                "resolved price from segment pricing"
            );
            let source = PriceSource::Segment(target);
            return match segment.sale_price {
                Some(sale) if sale > Decimal::ZERO => {
                    DisplayPrice { price: sale, original: Some(segment.regular_price), source }
                }
                _ => DisplayPrice { price: segment.regular_price, original: None, source },
            };
        }
    }

    // Any non-zero variant sale counts, unlike the strictly positive segment sale.
    match variant.sale_price {
        Some(sale) if !sale.is_zero() => DisplayPrice {
            price: sale,
            original: Some(variant.regular_price),
            source: PriceSource::Variant,
        },
        _ => DisplayPrice {
            price: variant.regular_price,
            original: None,
            source: PriceSource::Variant,
        },
    }
}
