use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    content::ContentPageDraft,
    coupon::{CouponDraft, DiscountType},
    inventory::InventoryAdjustment,
};

pub const MAX_CART_QUANTITY: u32 = 999;
const MAX_COUPON_CODE_LEN: usize = 32;
const MAX_PAGE_TITLE_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Inline messages collected for one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|error| error.field == field).map(|error| error.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Whether a form creates a new record or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

pub fn validate_cart_quantity(quantity: u32) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if quantity == 0 || quantity > MAX_CART_QUANTITY {
        errors.push("quantity", format!("quantity must be between 1 and {MAX_CART_QUANTITY}"));
    }
    errors.into_result()
}

pub fn validate_coupon(
    draft: &CouponDraft,
    mode: FormMode,
    now: DateTime<Utc>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let code = draft.code.trim();
    if code.is_empty() {
        errors.push("code", "code is required");
    } else if code.len() > MAX_COUPON_CODE_LEN
        || !code.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        errors.push(
            "code",
            format!(
                "code must be at most {MAX_COUPON_CODE_LEN} letters, digits, `-` or `_`"
            ),
        );
    }

    if draft.discount_value <= Decimal::ZERO {
        errors.push("discount_value", "discount value must be greater than zero");
    } else if draft.discount_type == DiscountType::Percentage
        && draft.discount_value > Decimal::ONE_HUNDRED
    {
        errors.push("discount_value", "percentage discount cannot exceed 100");
    }

    if draft.minimum_order_amount.is_some_and(|amount| amount < Decimal::ZERO) {
        errors.push("minimum_order_amount", "minimum order amount cannot be negative");
    }

    if draft.usage_limit == Some(0) {
        errors.push("usage_limit", "usage limit must be at least 1 when set");
    }

    if let Some(expires_at) = draft.expires_at {
        if draft.starts_at.is_some_and(|starts_at| expires_at <= starts_at) {
            errors.push("expires_at", "expiry must be after the start date");
        } else if mode == FormMode::Create && expires_at <= now {
            errors.push("expires_at", "expiry must be in the future");
        }
    }

    errors.into_result()
}

pub fn validate_content_page(draft: &ContentPageDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("title", "title is required");
    } else if title.chars().count() > MAX_PAGE_TITLE_LEN {
        errors.push("title", format!("title must be at most {MAX_PAGE_TITLE_LEN} characters"));
    }

    let slug = draft.slug.trim();
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
    if !well_formed {
        errors.push("slug", "slug must be lowercase letters, digits and inner hyphens");
    }

    if draft.body.trim().is_empty() {
        errors.push("body", "body is required");
    }

    errors.into_result()
}

pub fn validate_inventory_adjustment(adjustment: &InventoryAdjustment) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if adjustment.delta == 0 {
        errors.push("delta", "adjustment must change the quantity");
    }
    if adjustment.reason.trim().is_empty() {
        errors.push("reason", "a reason is required for inventory adjustments");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{
        validate_cart_quantity, validate_content_page, validate_coupon,
        validate_inventory_adjustment, FormMode,
    };
    use crate::domain::{
        content::{ContentPageDraft, PageStatus},
        coupon::{CouponDraft, DiscountType},
        inventory::InventoryAdjustment,
    };

    fn coupon() -> CouponDraft {
        CouponDraft {
            code: "SPRING-25".to_owned(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(25, 0),
            minimum_order_amount: None,
            usage_limit: Some(100),
            starts_at: None,
            expires_at: None,
            is_active: true,
        }
    }

    fn page() -> ContentPageDraft {
        ContentPageDraft {
            slug: "shipping-policy".to_owned(),
            title: "Shipping policy".to_owned(),
            body: "We ship within 2 business days.".to_owned(),
            status: PageStatus::Draft,
        }
    }

    #[test]
    fn cart_quantity_bounds() {
        assert!(validate_cart_quantity(1).is_ok());
        assert!(validate_cart_quantity(999).is_ok());

        let errors = validate_cart_quantity(0).expect_err("zero quantity");
        assert_eq!(errors.message_for("quantity"), Some("quantity must be between 1 and 999"));
        assert!(validate_cart_quantity(1000).is_err());
    }

    #[test]
    fn valid_coupon_passes() {
        assert!(validate_coupon(&coupon(), FormMode::Create, Utc::now()).is_ok());
    }

    #[test]
    fn coupon_errors_are_reported_per_field() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).single().expect("now");
        let draft = CouponDraft {
            code: "bad code!".to_owned(),
            discount_value: Decimal::new(150, 0),
            usage_limit: Some(0),
            starts_at: Some(now + Duration::days(10)),
            expires_at: Some(now + Duration::days(5)),
            ..coupon()
        };

        let errors = validate_coupon(&draft, FormMode::Create, now).expect_err("invalid coupon");

        assert_eq!(errors.errors.len(), 4);
        assert!(errors.message_for("code").is_some());
        assert_eq!(
            errors.message_for("discount_value"),
            Some("percentage discount cannot exceed 100")
        );
        assert!(errors.message_for("usage_limit").is_some());
        assert_eq!(errors.message_for("expires_at"), Some("expiry must be after the start date"));
    }

    #[test]
    fn fixed_coupon_may_exceed_one_hundred_but_not_expire_in_the_past() {
        let now = Utc::now();
        let draft = CouponDraft {
            discount_type: DiscountType::FixedAmount,
            discount_value: Decimal::new(250, 0),
            expires_at: Some(now - Duration::hours(1)),
            ..coupon()
        };

        let errors = validate_coupon(&draft, FormMode::Create, now).expect_err("expired coupon");

        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.message_for("expires_at"), Some("expiry must be in the future"));
    }

    #[test]
    fn expired_coupon_can_still_be_edited() {
        let now = Utc::now();
        let draft = CouponDraft {
            expires_at: Some(now - Duration::days(30)),
            is_active: false,
            ..coupon()
        };

        assert!(validate_coupon(&draft, FormMode::Update, now).is_ok());

        let inverted = CouponDraft {
            starts_at: Some(now - Duration::days(10)),
            expires_at: Some(now - Duration::days(30)),
            ..coupon()
        };
        let errors =
            validate_coupon(&inverted, FormMode::Update, now).expect_err("inverted window");
        assert_eq!(errors.message_for("expires_at"), Some("expiry must be after the start date"));
    }

    #[test]
    fn content_page_requires_title_slug_and_body() {
        assert!(validate_content_page(&page()).is_ok());

        let draft = ContentPageDraft {
            slug: "Shipping Policy".to_owned(),
            title: "   ".to_owned(),
            body: String::new(),
            ..page()
        };
        let errors = validate_content_page(&draft).expect_err("invalid page");

        assert_eq!(errors.errors.len(), 3);
        assert!(validate_content_page(&ContentPageDraft { slug: "-faq".to_owned(), ..page() })
            .is_err());
    }

    #[test]
    fn inventory_adjustment_needs_delta_and_reason() {
        let ok = InventoryAdjustment { delta: -3, reason: "damaged in transit".to_owned() };
        assert!(validate_inventory_adjustment(&ok).is_ok());

        let errors = validate_inventory_adjustment(&InventoryAdjustment {
            delta: 0,
            reason: " ".to_owned(),
        })
        .expect_err("invalid adjustment");
        assert_eq!(errors.errors.len(), 2);
    }
}
