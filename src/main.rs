use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hotel_compare::api;
use hotel_compare::config::Config;
use hotel_compare::scrapers::SearchRequest;
use hotel_compare::HotelSearchService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotel-compare", about = "Compare hotel prices across travel sites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search API over HTTP
    Serve,
    /// Run one search and print the ranked hotels
    Search {
        #[arg(long)]
        city: String,
        #[arg(long)]
        check_in: Option<NaiveDate>,
        #[arg(long)]
        check_out: Option<NaiveDate>,
        #[arg(long)]
        adults: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        #[arg(long)]
        rooms: Option<u32>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        star_rating: Option<u8>,
        /// Also save the result as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hotel_compare=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let service = HotelSearchService::from_config(&config)?;

    match cli.command {
        Command::Serve => {
            let listener = tokio::net::TcpListener::bind(&config.bind_addr)
                .await
                .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
            info!("🏨 hotel-compare listening on {}", config.bind_addr);
            axum::serve(listener, api::router(Arc::new(service))).await?;
        }
        Command::Search {
            city,
            check_in,
            check_out,
            adults,
            children,
            rooms,
            min_price,
            max_price,
            star_rating,
            output,
        } => {
            let request = SearchRequest {
                city,
                check_in,
                check_out,
                adults,
                children,
                rooms,
                min_price,
                max_price,
                star_rating,
            };

            let entries = service.search(&request).await?;
            info!("\n✅ Found {} hotels\n", entries.len());

            for (i, entry) in entries.iter().enumerate() {
                println!("{}. {} (from {:.0})", i + 1, entry.hotel_name, entry.best_price);
                for offer in &entry.sources {
                    let marker = if offer.is_best_deal { " ★ best deal" } else { "" };
                    println!("   {}: {:.0}{}", offer.source, offer.price, marker);
                    println!("   {}", offer.booking_url);
                }
                println!();
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&entries)?;
                tokio::fs::write(&path, json).await?;
                info!("💾 Saved comparison to {}", path.display());
            }
        }
    }

    Ok(())
}
