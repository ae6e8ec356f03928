//! Cart CLI

use std::{
    io::{self, Write},
    process,
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;

use cart_store::{
    cart::{Cart, CartOutcome, CartStoreError, UpdateProductAmount, summary},
    catalog::ProductId,
    config::CartConfig,
    context::CartContext,
    notifications::{ChannelNotifier, Notification},
    observability,
};

#[derive(Debug, Parser)]
#[command(name = "cart", about = "Shopping cart CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CartConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the persisted cart
    Show,

    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove a product line
    Remove(ProductArgs),

    /// Set the quantity of a product line
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Catalog product identifier
    product_id: u64,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Catalog product identifier
    product_id: u64,

    /// New quantity; zero or less leaves the cart untouched
    #[arg(allow_negative_numbers = true)]
    amount: i64,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match observability::init(&cli.config.logging) {
        Ok(()) => run(cli).await,
        Err(error) => Err(error.to_string()),
    };

    if let Err(error) = result {
        #[expect(
            clippy::print_stderr,
            reason = "final error report after the command has finished"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let (notifier, mut notifications) = ChannelNotifier::new();

    let context = CartContext::from_config(&cli.config, Arc::new(notifier))
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    let store = &context.store;

    let result = match cli.command {
        Commands::Show => return print_cart(&store.cart()),
        Commands::Add(args) => store.add_product(ProductId::new(args.product_id)).await,
        Commands::Remove(args) => store.remove_product(ProductId::new(args.product_id)).await,
        Commands::Update(args) => {
            store
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId::new(args.product_id),
                    amount: args.amount,
                })
                .await
        }
    };

    report_notifications(&mut notifications)?;

    match result {
        Ok(CartOutcome::Committed(cart)) => print_cart(&cart),
        Ok(CartOutcome::Rejected(_) | CartOutcome::Ignored) => Ok(()),
        Err(error) => Err(describe(&error)),
    }
}

fn report_notifications(receiver: &mut UnboundedReceiver<Notification>) -> Result<(), String> {
    let mut stderr = io::stderr().lock();

    while let Ok(notification) = receiver.try_recv() {
        writeln!(stderr, "{notification}")
            .map_err(|error| format!("failed to report notification: {error}"))?;
    }

    Ok(())
}

fn print_cart(cart: &Cart) -> Result<(), String> {
    summary::write_cart(io::stdout().lock(), cart)
        .map_err(|error| format!("failed to print cart: {error}"))
}

fn describe(error: &CartStoreError) -> String {
    match error {
        CartStoreError::Catalog(source) => format!("catalog request failed: {source}"),
        CartStoreError::Storage(source) => format!("cart storage failed: {source}"),
    }
}
