use std::io;

use clap::Args;
use mims::{
    cart::Cart,
    medicines::Medicine,
    products::ProductId,
    receipt::write_cart,
};
use mims_app::{
    context::AppContext,
    domain::orders::checkout,
    session::SessionContext,
};
use rusty_money::iso::COP;

use crate::cli::login::{LoginArgs, sign_in_with};

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    #[command(flatten)]
    login: LoginArgs,

    /// Medicine and quantity as `<id>:<quantity>`; repeat for more lines
    #[arg(long = "item", value_parser = parse_item, required = true)]
    items: Vec<(ProductId, u32)>,
}

fn parse_item(raw: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected <id>:<quantity>, got {raw:?}"))?;

    let id = id.trim();

    if id.is_empty() {
        return Err(format!("missing medicine id in {raw:?}"));
    }

    let quantity = quantity
        .trim()
        .parse()
        .map_err(|error| format!("invalid quantity in {raw:?}: {error}"))?;

    Ok((ProductId::new(id), quantity))
}

pub(crate) async fn run(
    args: OrderArgs,
    context: &AppContext,
    mut session: SessionContext,
) -> Result<(), String> {
    sign_in_with(&args.login, context, &mut session).await?;

    let medicines: Vec<Medicine> = context
        .catalog
        .categories_with_medicines(&session)
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?
        .into_iter()
        .flat_map(|category| category.medicines)
        .collect();

    let mut cart = Cart::new(COP);

    for (id, quantity) in &args.items {
        let medicine = medicines
            .iter()
            .find(|medicine| &medicine.id == id)
            .ok_or_else(|| format!("medicine {id} is not in the catalog"))?;

        let snapshot = medicine
            .snapshot(COP)
            .map_err(|error| format!("invalid price for {}: {error}", medicine.name))?;

        cart.add_item(&snapshot, *quantity)
            .map_err(|error| format!("failed to add {}: {error}", medicine.name))?;
    }

    write_cart(io::stdout().lock(), &cart)
        .map_err(|error| format!("failed to print cart: {error}"))?;

    let order = checkout(&mut cart, &session, context.orders.as_ref())
        .await
        .map_err(|error| format!("failed to place order: {error}"))?;

    println!("order #{} placed ({})", order.id, order.status);

    Ok(())
}
