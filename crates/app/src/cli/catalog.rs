use clap::Args;
use mims::medicines::{Medicine, StockLevel};
use mims_app::{
    context::AppContext,
    domain::catalog::{CATALOG_PAGE_SIZE, CatalogQuery},
    session::SessionContext,
};
use rust_decimal::Decimal;

use crate::cli::render_table;

#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Search by name
    #[arg(long, default_value = "")]
    search: String,

    /// Category id
    #[arg(long)]
    category: Option<u64>,

    /// Minimum sale price
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Maximum sale price
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Only medicines with stock
    #[arg(long)]
    available: bool,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Results per page
    #[arg(long, default_value_t = CATALOG_PAGE_SIZE)]
    page_size: u32,
}

pub(crate) async fn run(
    args: CatalogArgs,
    context: &AppContext,
    session: &SessionContext,
) -> Result<(), String> {
    let query = CatalogQuery {
        page: args.page,
        page_size: args.page_size,
        category: args.category,
        search: args.search,
        min_price: args.min_price,
        max_price: args.max_price,
        only_available: args.available,
    };

    let page = context
        .catalog
        .list_catalog(session, &query)
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    if page.results.is_empty() {
        println!("no medicines found");
        return Ok(());
    }

    println!(
        "{}",
        render_table(
            ["Id", "Nombre", "Categoría", "Precio", "Stock"],
            page.results.iter().map(row),
            3,
        )
    );
    println!(
        "page {} of {} ({} medicines)",
        query.page.max(1),
        page.total_pages(query.page_size),
        page.count
    );

    Ok(())
}

fn row(medicine: &Medicine) -> [String; 5] {
    let stock = match medicine.stock_level() {
        StockLevel::Out => "agotado".to_string(),
        StockLevel::Few | StockLevel::Plenty => medicine.available_stock().to_string(),
    };

    [
        medicine.id.to_string(),
        medicine.name.clone(),
        medicine
            .category
            .as_ref()
            .map(|category| category.name.clone())
            .unwrap_or_default(),
        medicine.sale_price.to_string(),
        stock,
    ]
}
