use clap::{Parser, Subcommand};
use mims_app::{
    config::{ApiConfig, LoggingConfig},
    context::{AppContext, initial_session},
    observability::init_logging,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

mod catalog;
mod invoices;
mod login;
mod order;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "mims-app", about = "Droguería MIMS CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    api: ApiConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and print the issued token
    Login(login::LoginArgs),

    /// Browse the medicine catalog
    Catalog(catalog::CatalogArgs),

    /// List orders
    Orders(orders::OrdersArgs),

    /// List invoices
    Invoices(invoices::InvoicesArgs),

    /// Place an order
    Order(order::OrderArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_logging(&self.logging).map_err(|error| format!("failed to set up logging: {error}"))?;

        let context = AppContext::from_config(&self.api)
            .map_err(|error| format!("failed to configure API client: {error}"))?;
        let session = initial_session(&self.api);

        match self.command {
            Commands::Login(args) => login::run(args, &context, session).await,
            Commands::Catalog(args) => catalog::run(args, &context, &session).await,
            Commands::Orders(args) => orders::run(args, &context, &session).await,
            Commands::Invoices(args) => invoices::run(args, &context, &session).await,
            Commands::Order(args) => order::run(args, &context, session).await,
        }
    }
}

/// Render rows under `header`, right-aligning the columns from `numeric_from` on.
fn render_table<const N: usize>(
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
    numeric_from: usize,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(header);

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric_from..N), Alignment::right());

    table.to_string()
}
