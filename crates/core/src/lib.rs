pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod notice;
pub mod pricing;
pub mod validation;

pub use catalog::{ListingFilter, ProductCard, ProductListing, SortOrder};
pub use domain::customer::{Customer, CustomerId, CustomerType};
pub use domain::page::{Page, Pagination};
pub use domain::product::{CatalogVariant, Product, ProductId, SegmentPrice, VariantId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use notice::{Notice, NoticeLevel};
pub use pricing::{
    pricing_key, resolve_display_price, DisplayPrice, PriceInput, PriceResolver, PriceSource,
    SegmentPriceResolver,
};
pub use validation::{FieldError, FieldErrors};
