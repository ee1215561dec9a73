mod rank;
mod sourcing;
mod wiring;

use aunz_core::Market;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aunz-cli")]
#[command(about = "AU/NZ import opportunity scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract search keywords from a product title and bridge them to
    /// sourcing-marketplace terms
    Keywords {
        title: String,
    },
    /// Match a listed product against sourcing-marketplace offers
    Match {
        /// Product title as listed in the target market
        #[arg(long)]
        title: String,

        /// Listed price in the market's currency
        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "NZ")]
        market: Market,

        /// Maximum matches to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// CNY ceiling on supplier unit price (defaults to the configured maximum)
        #[arg(long)]
        max_price: Option<f64>,

        /// Keep offers that fail the small/medium size limits
        #[arg(long)]
        include_large: bool,
    },
    /// Estimate profit for a resale price and a supplier unit price
    Profit {
        /// Resale price in the market's currency
        #[arg(long)]
        target_price: f64,

        /// Supplier unit price in CNY
        #[arg(long)]
        supplier_price: f64,

        #[arg(long, default_value = "NZ")]
        market: Market,

        #[arg(long, default_value_t = 100)]
        quantity: u32,

        /// Freight per unit in CNY (defaults to the configured estimate)
        #[arg(long)]
        shipping: Option<f64>,
    },
    /// Rank product categories for a market
    Rank {
        #[arg(long, default_value = "NZ")]
        market: Market,

        /// Restrict the run to these category keywords (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Print only keyword, rank and total score
        #[arg(long)]
        summary: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = aunz_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Keywords { title } => sourcing::run_keywords(&title),
        Commands::Match {
            title,
            price,
            market,
            limit,
            max_price,
            include_large,
        } => {
            let request = sourcing::MatchRequest {
                title,
                price,
                market,
                limit,
                max_price: max_price.unwrap_or(config.supplier_max_price),
                include_large,
            };
            sourcing::run_match(&config, request).await
        }
        Commands::Profit {
            target_price,
            supplier_price,
            market,
            quantity,
            shipping,
        } => sourcing::run_profit(
            target_price,
            supplier_price,
            market,
            quantity,
            shipping.unwrap_or(config.shipping_per_unit),
        ),
        Commands::Rank {
            market,
            keywords,
            summary,
        } => rank::run_rank(&config, market, &keywords, summary).await,
    }
}
