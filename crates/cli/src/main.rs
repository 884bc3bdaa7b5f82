//! Groovy CLI - Browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List products in size M, cheapest first
//! groovy products --size M --sort asc
//!
//! # Add a product to the cart and look at it
//! groovy cart add 12064273040195392 S
//! groovy cart show
//!
//! # Change quantities
//! groovy cart increase 12064273040195392 S --by 2
//! groovy cart set 12064273040195392 S 10
//!
//! # Review, then confirm checkout
//! groovy checkout
//! groovy checkout --yes
//! ```
//!
//! State (cart, visibility, filter) is restored from `GROOVY_STATE_PATH` at
//! startup and written back after every change.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use groovy_core::{SizeLabel, Sku, SortOrder};
use groovy_storefront::config::StorefrontConfig;
use groovy_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "groovy")]
#[command(author, version, about = "Groovy Goods storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products for the current size filter and sort order
    Products {
        /// Only show products offered in these sizes, e.g. XS S M ML L XL XXL (repeatable; replaces the saved filter)
        #[arg(short, long = "size")]
        sizes: Vec<SizeLabel>,

        /// Drop the saved size filter
        #[arg(long, conflicts_with = "sizes")]
        all_sizes: bool,

        /// Price order (`asc` or `desc`)
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Retry a failed fetch this many times
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review the cart total and confirm checkout
    Checkout {
        /// Confirm; without this flag the checkout is only previewed
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Open the cart panel
    Open,
    /// Close the cart panel
    Close,
    /// Add a product in a size
    Add {
        sku: Sku,
        size: SizeLabel,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Retry a failed product lookup this many times
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },
    /// Raise a line's quantity
    Increase {
        sku: Sku,
        size: SizeLabel,

        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Lower a line's quantity (never below 1)
    Decrease {
        sku: Sku,
        size: SizeLabel,

        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Set a line's quantity
    Set {
        sku: Sku,
        size: SizeLabel,
        quantity: u32,
    },
    /// Remove a line
    Remove { sku: Sku, size: SizeLabel },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "groovy=info,groovy_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::load(config).await?;
    tracing::debug!(
        state_path = %state.config().state_path.display(),
        products = state.catalog().len(),
        "Storefront ready"
    );

    match cli.command {
        Commands::Products {
            sizes,
            all_sizes,
            sort,
            retries,
        } => {
            let sizes = if all_sizes {
                Some(Vec::new())
            } else if sizes.is_empty() {
                None
            } else {
                Some(sizes)
            };
            commands::products::list(&mut state, sizes, sort, retries).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Open => commands::cart::set_visibility(&mut state, true),
            CartAction::Close => commands::cart::set_visibility(&mut state, false),
            CartAction::Add {
                sku,
                size,
                quantity,
                retries,
            } => commands::cart::add(&mut state, sku, size, quantity, retries).await?,
            CartAction::Increase { sku, size, by } => {
                commands::cart::increase(&mut state, sku, &size, by);
            }
            CartAction::Decrease { sku, size, by } => {
                commands::cart::decrease(&mut state, sku, &size, by);
            }
            CartAction::Set {
                sku,
                size,
                quantity,
            } => commands::cart::set_quantity(&mut state, sku, &size, quantity)?,
            CartAction::Remove { sku, size } => commands::cart::remove(&mut state, sku, &size),
        },
        Commands::Checkout { yes } => commands::checkout::run(&mut state, yes)?,
    }
    Ok(())
}
