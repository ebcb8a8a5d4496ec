use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fincoai_core::CategoryTotals;
use fincoai_finance::{Normalized, RecordStore, normalize};
use fincoai_ingest::{
    CustomerProfile, GenerationClient, StreamEvent, collect_generation, parse_statement_file,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "fincoai", version, about = "FinCOAI transaction pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate synthetic transactions for a customer profile and normalize them
    Generate {
        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        household_size: u32,

        /// Annual income
        #[arg(long)]
        income: f64,

        #[arg(long)]
        zipcode: String,

        /// Generator base URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Normalize an uploaded statement (.json or .csv)
    Import {
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the saved category totals
    Totals,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.logging.filter);

    let store = RecordStore::new(cfg.data_dir()?);

    match cli.command {
        Command::Generate {
            age,
            gender,
            household_size,
            income,
            zipcode,
            server,
        } => {
            let profile = CustomerProfile {
                age,
                gender,
                household_size,
                income,
                zipcode,
            };
            let base_url = server.unwrap_or_else(|| cfg.server.base_url.clone());
            generate(&base_url, &profile, &store).await?;
        }

        Command::Import { file } => {
            if !file.exists() {
                bail!("statement not found: {}", file.display());
            }
            let txns = parse_statement_file(&file)
                .with_context(|| format!("parsing {}", file.display()))?;
            println!("Parsed {} transactions from {}", txns.len(), file.display());

            let out = normalize(&txns);
            store.save(&out)?;
            print_summary(&out);
        }

        Command::Totals => {
            let totals = store.load_totals()?;
            if totals.is_empty() {
                println!("No saved totals in {}", store.dir().display());
            } else {
                print_totals(&totals);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn generate(base_url: &str, profile: &CustomerProfile, store: &RecordStore) -> Result<()> {
    let client = GenerationClient::new(base_url);
    println!("Requesting transactions from {}", client.generate_url());

    let events = client
        .generate(profile)
        .await
        .context("start generation")?;

    let generation = collect_generation(events, |ev| {
        if let StreamEvent::Progress {
            message,
            completed,
            total,
        } = ev
        {
            let counter = match (completed, total) {
                (Some(done), Some(total)) => format!("[{done}/{total}] "),
                (Some(done), None) => format!("[{done}] "),
                _ => String::new(),
            };
            println!("{counter}{}", message.as_deref().unwrap_or(""));
        }
    })
    .await?;

    if !generation.completed {
        tracing::warn!("generation stream ended without a completion frame");
    }
    println!(
        "Received {} transactions ({} merchants)",
        generation.transactions.len(),
        generation.merchants.len()
    );

    let out = normalize(&generation.transactions);
    store.save(&out)?;
    print_summary(&out);
    Ok(())
}

fn print_summary(out: &Normalized) {
    println!("Normalized {} transactions\n", out.transactions.len());
    print_totals(&out.totals);

    if let Some(w) = &out.warning {
        println!(
            "\nWarning: {} of {} transactions ({:.0}%) could not be categorized",
            w.other_count,
            w.total_count,
            w.other_ratio() * 100.0
        );
    }
}

fn print_totals(totals: &CategoryTotals) {
    for (category, amount) in totals.iter() {
        println!("{:<16} ${:>10.2}", category.as_str(), amount);
    }
    println!("{:<16} ${:>10.2}", "Total", totals.grand_total());
}
