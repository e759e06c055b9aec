use chrono::Utc;
use storefront_core::{
    domain::{
        content::{ContentPage, ContentPageDraft, ContentPageId},
        coupon::{Coupon, CouponDraft, CouponId},
        inventory::{InventoryAdjustment, InventoryLevel},
        order::{Order, OrderId},
        product::VariantId,
    },
    validation::{
        validate_content_page, validate_coupon, validate_inventory_adjustment, FormMode,
    },
};
use tracing::info;

use crate::error::ApiError;
use crate::storefront::StorefrontApi;

// Admin form submissions. Input is checked first and the API is only called
// with a clean form; a rejected form comes back as `ApiError::InvalidInput`.

pub async fn submit_coupon<A>(
    api: &A,
    existing: Option<&CouponId>,
    draft: &CouponDraft,
) -> Result<Coupon, ApiError>
where
    A: StorefrontApi + ?Sized,
{
    let mode = if existing.is_some() { FormMode::Update } else { FormMode::Create };
    validate_coupon(draft, mode, Utc::now())?;
    let coupon = match existing {
        Some(id) => api.update_coupon(id, draft).await?,
        None => api.create_coupon(draft).await?,
    };
    info!(
        event_name = "admin.coupon.saved",
        coupon_id = %coupon.id.0,
        created = existing.is_none(),
        "coupon saved"
    );
    Ok(coupon)
}

pub async fn submit_content_page<A>(
    api: &A,
    existing: Option<&ContentPageId>,
    draft: &ContentPageDraft,
) -> Result<ContentPage, ApiError>
where
    A: StorefrontApi + ?Sized,
{
    validate_content_page(draft)?;
    let page = match existing {
        Some(id) => api.update_page(id, draft).await?,
        None => api.create_page(draft).await?,
    };
    info!(event_name = "admin.page.saved", page_id = %page.id.0, slug = %page.slug, "page saved");
    Ok(page)
}

pub async fn submit_inventory_adjustment<A>(
    api: &A,
    variant: &VariantId,
    adjustment: &InventoryAdjustment,
) -> Result<InventoryLevel, ApiError>
where
    A: StorefrontApi + ?Sized,
{
    validate_inventory_adjustment(adjustment)?;
    let level = api.adjust_inventory(variant, adjustment).await?;
    info!(
        event_name = "admin.inventory.adjusted",
        variant_id = %variant.0,
        delta = adjustment.delta,
        quantity = level.quantity,
        "inventory adjusted"
    );
    Ok(level)
}

/// Cancel an order. The server owns the state machine; the client only asks.
pub async fn cancel_order<A>(api: &A, id: &OrderId) -> Result<Order, ApiError>
where
    A: StorefrontApi + ?Sized,
{
    let order = api.cancel_order(id).await?;
    info!(
        event_name = "admin.order.cancel_requested",
        order_id = %order.id.0,
        status = order.status.as_api_str(),
        "order cancel requested"
    );
    Ok(order)
}
