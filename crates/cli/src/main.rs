//! Souq CLI - drive the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product
//! souq add --id p1 --name "Ajwa Dates" --price 45 --image /img/ajwa.jpg
//!
//! # Change a quantity (negative deltas remove units)
//! souq qty p1 -1
//!
//! # Remove a product
//! souq remove p1
//!
//! # Show the cart
//! souq show
//!
//! # Confirm checkout (simulated payment)
//! souq checkout --name "Layla"
//! ```
//!
//! # Commands
//!
//! - `add` - Add a product, or one more unit of it
//! - `qty` - Change a product's quantity
//! - `remove` - Remove a product
//! - `show` - Print the item list, count and total
//! - `checkout` - Summarize, wait for the simulated gateway, clear the cart
//!
//! The cart lives in `SOUQ_STORE_DIR` (default `.souq`), see
//! [`souq_cart::CartConfig`] for the full list of variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use souq_cart::{CartConfig, CartManager, CartPanel, FileStore, RenderSettings};
use souq_core::{CustomerName, Price, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "souq")]
#[command(author, version, about = "Souq shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(long)]
        id: ProductId,

        /// Product display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Price,

        /// Product image URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Change a product's quantity
    Qty {
        /// Product id
        id: ProductId,

        /// Units to add (positive) or take away (negative)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Show the cart
    Show,
    /// Confirm checkout
    Checkout {
        /// Customer name for the confirmation
        #[arg(short, long)]
        name: CustomerName,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "souq_cart=info,souq_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let store = FileStore::open(&config.store_dir)?;
    let mut cart = CartManager::load(store, config.storage_key.clone());

    let settings = RenderSettings::from(&config);
    let panel = CartPanel::new();
    let (items, count, total) = panel.projections(&settings);
    cart.register(items);
    cart.register(count);
    cart.register(total);

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => commands::cart::add(&mut cart, id, name, price, image),
        Commands::Qty { id, delta } => commands::cart::change_quantity(&mut cart, &id, delta),
        Commands::Remove { id } => commands::cart::remove(&mut cart, &id),
        Commands::Show => {}
        Commands::Checkout { name } => {
            commands::checkout::run(&mut cart, &config, name).await?;
        }
    }

    commands::output::print_panel(&panel);
    Ok(())
}
