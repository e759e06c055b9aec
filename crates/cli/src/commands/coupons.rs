use chrono::{DateTime, Utc};
use clap::Subcommand;
use rust_decimal::Decimal;
use storefront_api::{forms, StorefrontApi};
use storefront_core::{
    config::LoadOptions,
    domain::coupon::{CouponDraft, CouponId, DiscountType},
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum CouponsCommand {
    #[command(about = "List coupons")]
    List,
    #[command(about = "Create a coupon")]
    Create {
        #[arg(long)]
        code: String,
        #[arg(long = "type", help = "percentage or fixed")]
        discount_type: DiscountType,
        #[arg(long)]
        value: Decimal,
        #[arg(long)]
        min_order: Option<Decimal>,
        #[arg(long)]
        usage_limit: Option<u32>,
        #[arg(long, help = "RFC 3339 start time")]
        starts_at: Option<DateTime<Utc>>,
        #[arg(long, help = "RFC 3339 expiry time")]
        expires_at: Option<DateTime<Utc>>,
        #[arg(long, help = "Create the coupon disabled")]
        inactive: bool,
    },
    #[command(about = "Delete a coupon")]
    Delete { coupon_id: String },
}

pub fn run(options: LoadOptions, command: CouponsCommand) -> CommandResult {
    with_session("coupons", options, |session| match command {
        CouponsCommand::List => {
            let result = session.block_on(session.api.list_coupons());
            respond("coupons", result, |coupons| format!("{} coupon(s)", coupons.len()))
        }
        CouponsCommand::Create {
            code,
            discount_type,
            value,
            min_order,
            usage_limit,
            starts_at,
            expires_at,
            inactive,
        } => {
            let draft = CouponDraft {
                code: code.trim().to_ascii_uppercase(),
                discount_type,
                discount_value: value,
                minimum_order_amount: min_order,
                usage_limit,
                starts_at,
                expires_at,
                is_active: !inactive,
            };
            let result =
                session.block_on(forms::submit_coupon(session.api.as_ref(), None, &draft));
            respond("coupons", result, |coupon| format!("coupon {} created", coupon.code))
        }
        CouponsCommand::Delete { coupon_id } => {
            let id = CouponId(coupon_id);
            let result = session.block_on(session.api.delete_coupon(&id));
            respond("coupons", result, |_| format!("coupon {} deleted", id.0))
        }
    })
}
