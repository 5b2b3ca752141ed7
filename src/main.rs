use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use orange_pages::app::App;
use orange_pages::catalog::{AssetQuery, AssetSort, Catalog, CategoryFilter, NodeQuery};
use orange_pages::config::Config;
use orange_pages::logging;
use orange_pages::navigation::View;
use orange_pages::orders::{OrderBook, OrderQuery, StatusFilter};
use orange_pages::session::Session;
use orange_pages::ui::terminal_guard::install_panic_hook;

#[derive(Parser)]
#[command(name = "orange-pages")]
#[command(about = "Taproot asset explorer and marketplace for the Lightning Network")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// View to open on start (dashboard, asset-discovery, node-explorer, ...)
    #[arg(long)]
    view: Option<View>,
}

#[derive(Subcommand)]
enum Commands {
    /// List assets
    Assets {
        /// Filter by name or symbol
        #[arg(short, long)]
        search: Option<String>,

        /// Asset type (all, collectibles, utility, defi, protocol)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Sort key (market_cap, volume, price, change)
        #[arg(long, default_value = "market_cap")]
        sort: AssetSort,
    },

    /// List Lightning nodes
    Nodes {
        /// Filter by name, alias or pubkey
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List orders
    Orders {
        /// Order status (all, completed, pending, processing, failed, cancelled)
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Filter by asset, symbol or order id
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Clear the stored session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();

    // File-based for TUI, stderr for CLI
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Assets {
            search,
            category,
            sort,
        }) => cmd_assets(search, category, sort),
        Some(Commands::Nodes { search }) => cmd_nodes(search),
        Some(Commands::Orders { status, search }) => cmd_orders(status, search),
        Some(Commands::Logout) => cmd_logout(&config)?,
        None => {
            let start = cli.view.unwrap_or(View::Dashboard);
            run_tui(config, start, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, start: View, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let session = Session::open(&config.state_path()).context("Failed to open session")?;
    let mut app = App::new(config, session, start, log_file_path.clone());
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_assets(search: Option<String>, category: CategoryFilter, sort: AssetSort) {
    let catalog = Catalog::builtin();
    let query = AssetQuery {
        search: search.unwrap_or_default(),
        category,
        sort,
    };
    let assets = query.apply(catalog.assets());
    tracing::debug!(count = assets.len(), sort = %sort, "listing assets");

    if assets.is_empty() {
        println!("No assets match");
        return;
    }

    println!("Assets ({}) by {}", assets.len(), sort.label());
    println!("{}", "─".repeat(72));
    for asset in assets {
        println!(
            "{:<22} {:<6} {:<12} {:>12} {:>8} {:>12}",
            asset.name,
            asset.symbol,
            asset.category.label(),
            asset.price.to_string(),
            asset.change_display(),
            asset.market_cap.compact(),
        );
    }
}

fn cmd_nodes(search: Option<String>) {
    let catalog = Catalog::builtin();
    let query = NodeQuery {
        search: search.unwrap_or_default(),
    };
    let nodes = query.apply(catalog.nodes());
    tracing::debug!(count = nodes.len(), "listing nodes");

    if nodes.is_empty() {
        println!("No nodes match");
        return;
    }

    println!("Lightning Nodes ({})", nodes.len());
    println!("{}", "─".repeat(72));
    for node in nodes {
        println!(
            "{:<20} {:<9} {:>10} {:>5} ch {:>7}  {}",
            node.name,
            node.status.label(),
            node.capacity.compact(),
            node.channels,
            node.uptime_display(),
            node.short_pubkey(),
        );
    }
}

fn cmd_orders(status: StatusFilter, search: Option<String>) {
    let book = OrderBook::seeded();
    let query = OrderQuery {
        search: search.unwrap_or_default(),
        status,
        ..OrderQuery::default()
    };
    let orders = book.filter(&query);
    tracing::debug!(count = orders.len(), status = status.label(), "listing orders");

    if orders.is_empty() {
        println!("No orders match");
        return;
    }

    let stats = book.stats();
    println!(
        "Orders ({} of {}) · {} completed · {} pending · volume {}",
        orders.len(),
        stats.total,
        stats.completed,
        stats.pending,
        stats.volume_display()
    );
    println!("{}", "─".repeat(72));
    for order in orders {
        println!(
            "{:<17} {:<4} {:<6} {:>8} {:>11} {:<10} {}",
            order.id,
            order.side.label(),
            order.symbol,
            order.quantity_display(),
            order.grand_total().to_string(),
            order.status.label(),
            order.date_display(),
        );
    }
}

fn cmd_logout(config: &Config) -> Result<()> {
    let mut session = Session::open(&config.state_path()).context("Failed to open session")?;
    if !session.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    session.logout().context("Failed to clear session")?;
    println!("Signed out ({})", session.store().path().display());
    Ok(())
}
