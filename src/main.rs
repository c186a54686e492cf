//! inventory_desk: drive the order workflow of an inventory backend from a
//! terminal.
//!
//! Usage:
//!   inventory_desk products
//!   inventory_desk orders
//!   inventory_desk order 5
//!   inventory_desk submit --item 7:3 --item 8:1
//!   inventory_desk status 5 completed
//!   inventory_desk --config desk.toml stats

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Instrument};

use inventory_desk::app_system::{setup_tracing, InventorySystem};
use inventory_desk::config::ClientConfig;
use inventory_desk::domain::{LineField, OrderId, OrderStatus};
use inventory_desk::orders::format_money;

#[derive(Parser, Debug)]
#[command(name = "inventory_desk", about = "Inventory order desk")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the product catalog.
    Products,
    /// List all orders.
    Orders,
    /// Show one order and its items.
    Order { id: OrderId },
    /// Create an order from `<product>:<quantity>` lines.
    Submit {
        #[arg(long = "item", value_name = "PRODUCT:QTY", required = true)]
        items: Vec<String>,
    },
    /// Move an order to a new status.
    Status { id: OrderId, status: OrderStatus },
    /// Show dashboard figures.
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let config = ClientConfig::load(args.config)?;
    let system = InventorySystem::new(&config)?;

    let span = tracing::info_span!("command", command = ?args.command);
    let outcome = run(&system, args.command).instrument(span).await;
    if let Err(e) = &outcome {
        error!(error = %e, "Command failed");
    }

    system.shutdown().await.map_err(|e| anyhow!(e))?;
    outcome
}

async fn run(system: &InventorySystem, command: Command) -> Result<()> {
    match command {
        Command::Products => {
            system.catalog.refresh().await?;
            for product in system.catalog.products().iter() {
                println!(
                    "{:<8} {:<32} {:>16} {:>6}",
                    product.id,
                    product.name,
                    format_money(product.price),
                    product.stock
                );
            }
        }
        Command::Orders => {
            system.orders.refresh().await?;
            for summary in system.orders.summaries() {
                println!("{summary}");
            }
        }
        Command::Order { id } => {
            system.orders.refresh().await?;
            let view = system.orders.detail(id).ok_or_else(|| anyhow!("Order {id} not found"))?;
            print!("{view}");
        }
        Command::Submit { items } => {
            system.catalog.refresh().await?;
            for (index, item) in items.iter().enumerate() {
                let Some((product_id, quantity)) = item.split_once(':') else {
                    bail!("expected PRODUCT:QTY, got {item:?}");
                };
                if index > 0 {
                    system.composer.add_line();
                }
                system.composer.set_line(index, LineField::ProductId, product_id)?;
                system.composer.set_line(index, LineField::Quantity, quantity)?;
            }
            for line in system.composer.lines() {
                info!(product_id = %line.product_id, product = %line.product_name, quantity = %line.quantity, "Draft line");
            }
            let order = system.submission.submit().await?;
            println!("Created order #{} ({})", order.id, format_money(order.total_price));
        }
        Command::Status { id, status } => {
            system.orders.refresh().await?;
            system.status.transition(id, status).await?;
            if let Some(summary) = system.orders.summaries().into_iter().find(|s| s.id == id) {
                println!("{summary}");
            }
        }
        Command::Stats => {
            let stats = system.api.dashboard_stats().await?;
            println!("Products:         {}", stats.product_count);
            println!("Units in stock:   {}", stats.total_stock);
            println!("Completed orders: {}", stats.completed_orders);
            println!("Revenue:          {}", format_money(stats.revenue));
        }
    }
    Ok(())
}
