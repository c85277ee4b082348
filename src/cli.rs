use clap::{Parser, Subcommand, builder::PossibleValuesParser};

use crate::{
    config::Config,
    export::export_orders_csv,
    fetcher::{ImageFetcher, save_catalog, save_gallery},
    marketing,
    orders::OrderStatus,
    products::Product,
    simulate::run_order_flow,
    store::Store,
};

/// Storefront automation CLI
#[derive(Parser)]
#[command(name = "sellbuddy")]
#[command(
    version = "0.1",
    about = "Storefront automation: image fetching, order handling, marketing copy"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch product images and write the JSON catalog and HTML gallery
    FetchImages {
        /// Also download the image files locally
        #[arg(long)]
        download: bool,
    },
    /// Run the end-to-end order flow simulation
    SimulateOrder,
    /// Export the orders store to CSV for spreadsheet import
    ExportOrders,
    /// Set an order's status, appending to its history
    UpdateStatus {
        /// Order id, e.g. SB-260823-K4QZ
        order_id: String,

        #[arg(value_parser = PossibleValuesParser::new([
            "pending", "paid", "processing", "shipped",
            "delivered", "cancelled", "refunded",
        ]))]
        status: String,

        /// Optional note recorded in the history entry
        #[arg(long)]
        note: Option<String>,
    },
    /// Generate social marketing content and a posting calendar
    Marketing,
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

async fn handle_fetch_images(config: &Config, download: bool) -> anyhow::Result<()> {
    let fetcher = ImageFetcher::new(config)?;
    let catalog = fetcher.fetch_all(Product::supported()).await;

    let catalog_path = save_catalog(&catalog, &config.data_dir)?;
    println!("Image catalog saved to: {}", catalog_path.display());

    let gallery_path = save_gallery(&catalog, &config.reports_dir)?;
    println!("Gallery saved to: {}", gallery_path.display());

    if download {
        let files = fetcher.download_all(&catalog, &config.images_dir).await?;
        println!("Downloaded {} image files", files.len());
    }

    println!("------ Summary ------");
    for (product_id, images) in &catalog.products {
        println!("{}: {} images", product_id, images.len());
        if let Some(first) = images.first() {
            println!("  Main: {}", first.url);
        }
    }
    Ok(())
}

fn handle_update_status(
    config: &Config,
    order_id: &str,
    status_str: &str,
    note: Option<&str>,
) -> anyhow::Result<()> {
    // PossibleValuesParser already vetted the string
    let status: OrderStatus = status_str.parse().map_err(anyhow::Error::msg)?;
    let store = Store::new(&config.data_dir);
    let order = store.update_status(order_id, status, note)?;
    println!(
        "Order {} is now {} ({} history entries)",
        order.order_id,
        order.status,
        order.status_history.len()
    );
    Ok(())
}

fn handle_export_orders(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.data_dir);
    let doc = store.load()?;
    let path = export_orders_csv(&doc.orders, &config.data_dir)?;
    println!("Exported {} orders to: {}", doc.orders.len(), path.display());
    Ok(())
}

fn handle_marketing(config: &Config) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let written = marketing::generate_all(Product::supported(), &config.content_dir, &mut rng)?;
    for path in &written {
        println!("Saved: {}", path.display());
    }
    Ok(())
}

pub async fn run_cli() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::FetchImages { download } => handle_fetch_images(&config, download).await,
        Commands::SimulateOrder => {
            let order = run_order_flow(&config)?;
            println!("Order flow simulation complete: {}", order.order_id);
            Ok(())
        }
        Commands::ExportOrders => handle_export_orders(&config),
        Commands::UpdateStatus {
            order_id,
            status,
            note,
        } => handle_update_status(&config, &order_id, &status, note.as_deref()),
        Commands::Marketing => handle_marketing(&config),
    }
}
