use anyhow::{Context, Result};
use base64::prelude::*;
use clap::{Parser, Subcommand};
use leadboard::analytics::{LeadAnalytics, Period};
use leadboard::config::Config;
use leadboard::models::NewLead;
use leadboard::storage::LeadStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "leadboard-admin")]
#[command(about = "Leadboard admin management CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random admin key for ADMIN_KEY
    GenKey,
    /// Insert a lead directly into the store
    AddLead {
        name: String,
        email: String,
        /// Funnel tag (e.g. contact_page, guide_landing)
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// e.g. pergola, shades, enclosure
        #[arg(long)]
        project_type: Option<String>,
        /// e.g. homeowner, builder, commercial
        #[arg(long)]
        customer_type: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Backdate the lead by this many days
        #[arg(long)]
        days_ago: Option<i64>,
    },
    /// Print the analytics report as JSON
    Report {
        /// 7d, 30d, 90d or 1y
        #[arg(long, default_value = "30d")]
        period: String,
    },
    /// Print the total number of stored leads
    Count,
}

async fn open() -> Result<(Config, Arc<dyn LeadStore>)> {
    let config = Config::from_env()?;
    let store = leadboard::open_store(&config).await?;
    Ok((config, store))
}

#[tokio::main]
async fn main() -> Result<()> {
    leadboard::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenKey => {
            let key: [u8; 32] = rand::random();
            println!("{}", BASE64_URL_SAFE_NO_PAD.encode(key));
        }
        Commands::AddLead {
            name,
            email,
            source,
            location,
            project_type,
            customer_type,
            phone,
            message,
            days_ago,
        } => {
            let (_, store) = open().await?;
            let created_at = days_ago
                .map(|d| (chrono::Utc::now() - chrono::Duration::days(d)).timestamp());
            let lead = store
                .insert_lead(&NewLead {
                    name,
                    email,
                    phone,
                    source,
                    location,
                    project_type,
                    customer_type,
                    message,
                    created_at,
                })
                .await?;
            println!("✓ Stored lead #{} ({})", lead.id, lead.email);
        }
        Commands::Report { period } => {
            let period: Period = period.parse()?;
            let (config, store) = open().await?;
            let analytics = LeadAnalytics::new(
                store,
                config.analytics.read_policy(),
                config.analytics.aggregation_settings()?,
            );
            let result = analytics.report(period).await?;
            let json =
                serde_json::to_string_pretty(&result).context("failed to serialize report")?;
            println!("{}", json);
        }
        Commands::Count => {
            let (_, store) = open().await?;
            println!("{}", store.count_leads().await?);
        }
    }

    Ok(())
}
