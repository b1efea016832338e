//! rs-rating CLI binary.
//!
//! Ranks stocks and industries by relative strength or financial-metric
//! strength, prints the tables and writes them as CSV files.

mod args;
mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use args::{ClientArgs, OutputArgs, PriceArgs, UniverseArgs};

#[derive(Parser)]
#[command(name = "rs-rating")]
#[command(about = "Relative-strength ratings and rankings of stocks and industries", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank by IBD relative strength
    Rs {
        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        price: PriceArgs,

        /// Rating period (12mo or 3mo)
        #[arg(long, default_value = "12mo")]
        rs_period: rs_rating::RsPeriod,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Rank by Mansfield relative strength
    Rsm {
        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        price: PriceArgs,

        /// Moving average of the Dorsey ratio (sma or ema)
        #[arg(long, default_value = "sma")]
        ma: rs_rating::MovingAverage,

        /// Moving-average window in bars (default: one year of bars)
        #[arg(short, long)]
        window: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Rank by financial-metric growth against the universe
    Fin {
        #[command(flatten)]
        universe: UniverseArgs,

        /// Financial metric (eps, revenue, net_income, operating_income,
        /// gross_profit, free_cash_flow)
        #[arg(short = 'M', long, default_value = "eps")]
        metric: rs_rating::FinancialMetric,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// List the constituents of an index
    Index {
        /// Index symbol, abbreviation or display name (e.g. ^GSPC, SPX, "S&P 500")
        symbol: String,

        /// Print the display name instead of the constituents
        #[arg(long)]
        name: bool,
    },

    /// List the rating methods
    Methods,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rs_rating=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rs_rating=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rs {
            universe,
            price,
            rs_period,
            output,
            client,
        } => {
            cmd::rs::run(&universe, &price, rs_period, &output, &client).await?;
        }
        Commands::Rsm {
            universe,
            price,
            ma,
            window,
            output,
            client,
        } => {
            let mansfield = rs_rating::MansfieldConfig { ma, window };
            cmd::rsm::run(&universe, &price, mansfield, &output, &client).await?;
        }
        Commands::Fin {
            universe,
            metric,
            output,
            client,
        } => {
            cmd::fin::run(&universe, metric, &output, &client).await?;
        }
        Commands::Index { symbol, name } => {
            cmd::index::run(&symbol, name).await?;
        }
        Commands::Methods => {
            cmd::methods::run(cli.verbose);
        }
    }

    Ok(())
}
