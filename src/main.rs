// src/main.rs - CLI for contact harvesting and domain intelligence
use std::path::PathBuf;
use std::process::exit;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use contacthunt::store::Category;
use contacthunt::{AppConfig, ContactHunt};

#[derive(Parser)]
#[command(name = "contacthunt")]
#[command(about = "Domain-scoped contact harvesting and domain intelligence toolkit")]
struct Args {
    #[command(subcommand)]
    command: Cli,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cli {
    /// Crawl a domain's website for email addresses
    Harvest {
        #[arg(help = "Target domain (e.g. example.com)")]
        domain: String,

        #[arg(long, help = "Maximum number of pages to fetch")]
        max_pages: Option<usize>,
    },

    /// Generate candidate emails for a person's name
    Person {
        #[arg(help = "Full name of the person")]
        name: String,

        #[arg(long = "domain", help = "Domain to check (repeatable)")]
        domains: Vec<String>,
    },

    /// Normalize a phone number and infer its origin
    Phone {
        #[arg(help = "Phone number, with or without country code")]
        number: String,
    },

    /// Build an aggregated intelligence report for a domain
    Analyze {
        #[arg(help = "Target domain")]
        domain: String,
    },

    /// Export stored results to CSV
    Export {
        #[arg(help = "Category to export (emails, domains, phones)")]
        category: Category,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            exit(1);
        }
    };

    let mut app = match ContactHunt::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            exit(1);
        }
    };

    let outcome = match args.command {
        Cli::Harvest { domain, max_pages } => app
            .harvest_domain(&domain, max_pages)
            .await
            .and_then(|result| Ok(serde_json::to_string_pretty(&result)?)),
        Cli::Person { name, domains } => {
            let domains = if domains.is_empty() { None } else { Some(domains) };
            app.person_emails(&name, domains)
                .await
                .and_then(|result| Ok(serde_json::to_string_pretty(&result)?))
        }
        Cli::Phone { number } => app
            .phone_info(&number)
            .await
            .and_then(|result| Ok(serde_json::to_string_pretty(&result)?)),
        Cli::Analyze { domain } => app
            .analyze_domain(&domain)
            .await
            .and_then(|result| Ok(serde_json::to_string_pretty(&result)?)),
        Cli::Export { category } => app.export_to_csv(category).map(|path| match path {
            Some(path) => format!("Exported to {}", path.display()),
            None => format!("No {} results to export", category),
        }),
    };

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            exit(1);
        }
    }
}
