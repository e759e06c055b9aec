use clap::Subcommand;
use storefront_api::{forms, PageRequest, StorefrontApi};
use storefront_core::{
    config::LoadOptions,
    domain::order::{OrderId, OrderStatus},
};

use super::{respond, with_session, CommandResult, EXIT_FAILURE};

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    #[command(about = "List orders, optionally filtered by status")]
    List {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    #[command(about = "Show one order")]
    Show { order_id: String },
    #[command(about = "Cancel an order that has not shipped yet")]
    Cancel { order_id: String },
}

pub fn run(options: LoadOptions, command: OrdersCommand) -> CommandResult {
    with_session("orders", options, |session| match command {
        OrdersCommand::List { status, page, limit } => {
            let result =
                session.block_on(session.api.list_orders(PageRequest::new(page, limit), status));
            respond("orders", result, |page| {
                format!(
                    "{} order(s) on page {} of {}",
                    page.items.len(),
                    page.pagination.page,
                    page.pagination.pages
                )
            })
        }
        OrdersCommand::Show { order_id } => {
            let result = session.block_on(session.api.get_order(&OrderId(order_id)));
            respond("orders", result, |order| {
                format!("order {} is {}", order.display_number(), order.status.as_api_str())
            })
        }
        OrdersCommand::Cancel { order_id } => {
            let id = OrderId(order_id);
            let order = match session.block_on(session.api.get_order(&id)) {
                Ok(order) => order,
                Err(error) => return CommandResult::api_failure("orders", error),
            };
            if !order.status.offers_cancel() {
                return CommandResult::failure(
                    "orders",
                    "bad_request",
                    format!(
                        "order {} is {} and can no longer be cancelled",
                        order.display_number(),
                        order.status.as_api_str()
                    ),
                    EXIT_FAILURE,
                );
            }
            let result = session.block_on(forms::cancel_order(session.api.as_ref(), &id));
            respond("orders", result, |order| {
                format!("order {} is now {}", order.display_number(), order.status.as_api_str())
            })
        }
    })
}
