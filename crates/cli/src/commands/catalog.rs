use std::sync::Arc;

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use storefront_api::{ApiError, CatalogBrowser, StorefrontApi};
use storefront_core::{
    config::LoadOptions, pricing_key, CustomerId, CustomerType, DisplayPrice, ListingFilter,
    PriceResolver, ProductCard, ProductId, SegmentPriceResolver, SortOrder,
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[arg(long, help = "Match against name, description and category")]
    search: Option<String>,
    #[arg(long, help = "Category slug or name")]
    category: Option<String>,
    #[arg(long, help = "Lowest displayed price to include")]
    min_price: Option<Decimal>,
    #[arg(long, help = "Highest displayed price to include")]
    max_price: Option<Decimal>,
    #[arg(long, help = "Only products with stock on an active variant")]
    in_stock: bool,
    #[arg(long, default_value = "featured")]
    sort: SortOrder,
    #[arg(long, help = "Customer id whose segment prices apply")]
    customer: Option<String>,
    #[arg(long, conflicts_with = "customer", help = "Price as this customer type")]
    customer_type: Option<CustomerType>,
    #[arg(long, default_value_t = 1, help = "How many pages to load before filtering")]
    pages: u32,
}

#[derive(Debug, Serialize)]
struct ProductsOutput {
    customer_type: Option<CustomerType>,
    loaded: usize,
    total: Option<u64>,
    has_more: bool,
    cards: Vec<ProductCard>,
}

pub fn products(options: LoadOptions, args: ProductsArgs) -> CommandResult {
    with_session("products", options, |session| {
        let mut browser =
            CatalogBrowser::new(Arc::clone(&session.api), session.config.catalog.page_size);
        let customer = args
            .customer
            .clone()
            .or_else(|| session.config.catalog.customer_id.clone())
            .map(CustomerId);

        let loaded = session.block_on(async {
            match args.customer_type {
                Some(customer_type) => browser.set_customer_type(Some(customer_type)),
                None => {
                    browser.identify(customer.as_ref()).await;
                }
            }
            browser.load_first_page().await?;
            for _ in 1..args.pages.max(1) {
                if browser.load_more().await?.is_none() {
                    break;
                }
            }
            Ok::<_, ApiError>(())
        });
        if let Err(error) = loaded {
            return CommandResult::api_failure("products", error);
        }

        let filter = ListingFilter {
            search: args.search,
            category: args.category,
            min_price: args.min_price,
            max_price: args.max_price,
            in_stock_only: args.in_stock,
        };
        let output = ProductsOutput {
            customer_type: browser.customer_type(),
            loaded: browser.listing().loaded_count(),
            total: browser.listing().total(),
            has_more: browser.has_more(),
            cards: browser.cards(&filter, args.sort),
        };
        let message = format!("{} of {} loaded products shown", output.cards.len(), output.loaded);
        CommandResult::success_with("products", message, &output)
    })
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    product_id: String,
    #[arg(long, help = "Customer type to price for; anonymous when omitted")]
    customer_type: Option<CustomerType>,
}

#[derive(Debug, Serialize)]
struct PriceOutput {
    product_id: ProductId,
    name: String,
    customer_type: Option<CustomerType>,
    pricing_key: Option<CustomerType>,
    variant_id: Option<String>,
    price: DisplayPrice,
}

pub fn price(options: LoadOptions, args: PriceArgs) -> CommandResult {
    with_session("price", options, |session| {
        let product_id = ProductId(args.product_id);
        let result = session.block_on(session.api.get_product(&product_id)).map(|product| {
            PriceOutput {
                price: SegmentPriceResolver.resolve_product(&product, args.customer_type),
                variant_id: product.primary_variant().map(|variant| variant.id.0.clone()),
                product_id: product.id,
                name: product.name,
                customer_type: args.customer_type,
                pricing_key: args.customer_type.map(pricing_key),
            }
        });
        respond("price", result, |output| match output.price.original {
            Some(original) => format!("{}: {} (was {})", output.name, output.price.price, original),
            None => format!("{}: {}", output.name, output.price.price),
        })
    })
}
