use std::num::NonZeroUsize;

use clap::Args;
use mims::{
    listing::Listing,
    orders::{Order, OrderFilter, OrderStatus},
};
use mims_app::{context::AppContext, session::SessionContext};

use crate::cli::render_table;

#[derive(Debug, Args)]
pub(crate) struct OrdersArgs {
    /// Only orders in this state (pendiente, confirmado, procesado, enviado, entregado, cancelado)
    #[arg(long, value_parser = parse_status)]
    status: Option<OrderStatus>,

    /// Search by client name or order number
    #[arg(long, default_value = "")]
    search: String,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Orders per page
    #[arg(long, default_value_t = NonZeroUsize::MIN.saturating_add(9))]
    page_size: NonZeroUsize,
}

fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    OrderStatus::ALL
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| format!("unknown order status {raw:?}"))
}

pub(crate) async fn run(
    args: OrdersArgs,
    context: &AppContext,
    session: &SessionContext,
) -> Result<(), String> {
    let orders = context
        .orders
        .list_orders(session)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    let listing = Listing::new(orders, args.page_size)
        .sorted_by(|a: &Order, b: &Order| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let filter = OrderFilter {
        search: args.search,
        status: args.status,
    };

    let page = listing.page(&filter, args.page);

    if page.items.is_empty() {
        println!("no orders found");
        return Ok(());
    }

    println!(
        "{}",
        render_table(
            ["#", "Cliente", "Fecha", "Estado", "Total"],
            page.items.iter().map(|order| {
                [
                    order.id.to_string(),
                    order.client.display_name(),
                    order
                        .created_at
                        .map(|created_at| created_at.to_string())
                        .unwrap_or_default(),
                    order.status.to_string(),
                    order.total.to_string(),
                ]
            }),
            4,
        )
    );
    println!(
        "page {} of {} ({} orders)",
        page.page, page.total_pages, page.total_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_by_backend_name() {
        assert_eq!(parse_status("Enviado"), Ok(OrderStatus::Shipped));
        assert!(parse_status("perdido").is_err());
    }
}
