use std::num::NonZeroUsize;

use clap::Args;
use jiff::civil::Date;
use mims::{
    invoices::{InvoiceFilter, newest_first, total_spent},
    listing::Listing,
};
use mims_app::{context::AppContext, session::SessionContext};
use rust_decimal::Decimal;

use crate::cli::render_table;

#[derive(Debug, Args)]
pub(crate) struct InvoicesArgs {
    /// Only the signed-in client's purchase history
    #[arg(long)]
    mine: bool,

    /// Search by client name or invoice number
    #[arg(long, default_value = "")]
    search: String,

    /// Issued on or after (YYYY-MM-DD)
    #[arg(long)]
    from: Option<Date>,

    /// Issued on or before (YYYY-MM-DD)
    #[arg(long)]
    to: Option<Date>,

    /// Minimum total
    #[arg(long)]
    min_total: Option<Decimal>,

    /// Maximum total
    #[arg(long)]
    max_total: Option<Decimal>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Invoices per page
    #[arg(long, default_value_t = NonZeroUsize::MIN.saturating_add(9))]
    page_size: NonZeroUsize,
}

pub(crate) async fn run(
    args: InvoicesArgs,
    context: &AppContext,
    session: &SessionContext,
) -> Result<(), String> {
    let invoices = if args.mine {
        context.invoices.client_history(session).await
    } else {
        context.invoices.list_invoices(session).await
    }
    .map_err(|error| format!("failed to list invoices: {error}"))?;

    let spent = total_spent(&invoices);
    let listing = Listing::new(invoices, args.page_size).sorted_by(newest_first);

    let filter = InvoiceFilter {
        search: args.search,
        from: args.from,
        to: args.to,
        min_total: args.min_total,
        max_total: args.max_total,
    };

    let page = listing.page(&filter, args.page);

    if page.items.is_empty() {
        println!("no invoices found");
        return Ok(());
    }

    println!(
        "{}",
        render_table(
            ["#", "Cliente", "Fecha", "Pago", "Total"],
            page.items.iter().map(|invoice| {
                [
                    invoice.id.to_string(),
                    invoice.client_label(),
                    invoice.issued_on.to_string(),
                    invoice.payment_method.as_str().to_string(),
                    invoice.total.to_string(),
                ]
            }),
            4,
        )
    );
    println!(
        "page {} of {} ({} invoices)",
        page.page, page.total_pages, page.total_count
    );

    if let Some(spent) = spent {
        println!("total invoiced: {spent}");
    }

    Ok(())
}
