mod output;

use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use mpsdk_client::{ApiClient, BasketService, CatalogService, DivisionService, OrderService};
use mpsdk_core::catalog::SearchQuery;
use mpsdk_core::OrderStatus;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mpsdk-cli")]
#[command(about = "Marketplace API command line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a product by id
    Product { id: String },
    /// Show a declination by id (e.g. 12_3_7)
    Declination { id: String },
    /// Resolve the brand of a product
    Brand { product_id: String },
    /// Stream the whole catalog as JSON lines
    Export {
        /// Language sent as Accept-Language for this export
        #[arg(long)]
        language: Option<String>,
    },
    /// Search the catalog
    Search {
        query: String,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "12")]
        per_page: u32,
    },
    /// Show a company by id
    Company { id: i64 },
    /// List orders received by the signed-in vendor
    Orders {
        /// Filter by status name or code (e.g. STANDBY_VENDOR or P)
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// List the divisions of a country
    Divisions {
        country: String,
        /// Print the divisions as an indented tree
        #[arg(long)]
        tree: bool,
    },
    /// Show a basket by id
    Basket { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = mpsdk_core::load_sdk_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let client = ApiClient::new(&config)?;
    run(&client, cli.command).await
}

async fn run(client: &ApiClient, command: Commands) -> anyhow::Result<()> {
    let catalog = CatalogService::new(client);
    match command {
        Commands::Product { id } => output::print_json(&catalog.product_by_id(&id).await?)?,
        Commands::Declination { id } => {
            output::print_json(&catalog.declination_by_id(&id).await?)?;
        }
        Commands::Brand { product_id } => {
            let product = catalog.product_by_id(&product_id).await?;
            match catalog.brand_from_product(&product).await? {
                Some(brand) => output::print_json(&brand)?,
                None => println!("product #{product_id} has no brand"),
            }
        }
        Commands::Export { language } => {
            let products = std::pin::pin!(catalog.all_products(language.as_deref()));
            let count = output::print_json_lines(products).await?;
            tracing::info!(count, "catalog export complete");
        }
        Commands::Search {
            query,
            page,
            per_page,
        } => {
            let query = SearchQuery {
                page,
                results_per_page: per_page,
                ..SearchQuery::new(query)
            };
            output::print_json(&catalog.search(&query).await?)?;
        }
        Commands::Company { id } => output::print_json(&catalog.company_by_id(id).await?)?,
        Commands::Orders { status } => {
            let orders = OrderService::new(client).vendor_orders(status).await?;
            if orders.is_empty() {
                println!("no orders found");
            } else {
                output::print_json(&orders)?;
            }
        }
        Commands::Divisions { country, tree } => {
            let divisions = DivisionService::new(client);
            if tree {
                let roots = divisions.division_tree(&country).await?;
                print!("{}", output::format_division_tree(&roots));
            } else {
                output::print_json(&divisions.divisions(&country).await?)?;
            }
        }
        Commands::Basket { id } => {
            output::print_json(&BasketService::new(client).basket(&id).await?)?;
        }
    }

    Ok(())
}
