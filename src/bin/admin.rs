//! CLI administration tool for link-inspector.
//!
//! Runs the diagnostics offered over HTTP directly from a terminal and checks
//! database connectivity.
//!
//! # Usage
//!
//! ```bash
//! # Render a URL as a bitmap
//! cargo run --bin admin -- qr https://example.com
//!
//! # Classify a URL
//! cargo run --bin admin -- classify http://phishing.com/login
//!
//! # Follow a redirect chain
//! cargo run --bin admin -- trace https://bit.ly/xyz --max-hops 10
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `db`): PostgreSQL connection string

use link_inspector::application::services::{RedirectResolver, ResolverSettings};
use link_inspector::domain::classifier::PatternClassifier;
use link_inspector::domain::qr_matrix::{DATA_CAPACITY_BITS, synthesize};
use link_inspector::infrastructure::http::ReqwestProbe;
use link_inspector::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for link-inspector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the 29x29 bitmap for a URL
    Qr {
        url: String,
    },

    /// Classify a URL as safe or suspicious
    Classify {
        url: String,
    },

    /// Follow the redirect chain of a URL
    Trace {
        url: String,

        /// Maximum number of redirects to follow
        #[arg(long, default_value_t = 20)]
        max_hops: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 5)]
        hop_timeout: u64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the urls table if missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Qr { url } => print_qr(&url),
        Commands::Classify { url } => print_classification(&url),
        Commands::Trace {
            url,
            max_hops,
            hop_timeout,
        } => trace(&url, max_hops, hop_timeout).await?,
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

/// Prints the bitmap with two block glyphs per cell so it stays square.
fn print_qr(url: &str) {
    let matrix = synthesize(url);

    println!("{}", "▦ Bitmap".bright_blue().bold());
    println!();
    for row in matrix.rows() {
        let line: String = row
            .iter()
            .map(|&dark| if dark { "██" } else { "  " })
            .collect();
        println!("  {}", line);
    }
    println!();

    let bits = url.len() * 8;
    if bits > DATA_CAPACITY_BITS {
        println!(
            "{}",
            format!(
                "⚠️  {} of {} bits dropped (capacity {})",
                bits - DATA_CAPACITY_BITS,
                bits,
                DATA_CAPACITY_BITS
            )
            .yellow()
        );
    }
    println!(
        "{}",
        "Not a standard QR code: readers will not decode it.".bright_black()
    );
}

fn print_classification(url: &str) {
    let classifier = PatternClassifier::default();
    let verdict = classifier.classify(url);

    let label = if verdict.is_suspicious() {
        verdict.as_str().red().bold()
    } else {
        verdict.as_str().green().bold()
    };

    println!("{}", "🔎 Classification".bright_blue().bold());
    println!();
    println!("  URL:     {}", url.cyan());
    println!("  Verdict: {}", label);
    if let Some(rule) = classifier.matching_rule(url) {
        println!("  Rule:    {}", rule.name().yellow());
    }
    println!("  {}", verdict.message());
}

/// Follows the chain with a real HTTP client and prints every hop.
async fn trace(url: &str, max_hops: usize, hop_timeout: u64) -> Result<()> {
    let hop_timeout = Duration::from_secs(hop_timeout.max(1));
    let settings = ResolverSettings {
        max_hops,
        hop_timeout,
        total_timeout: hop_timeout * (max_hops.max(1) as u32 + 1),
    };

    let probe = ReqwestProbe::new(hop_timeout).context("Failed to build HTTP client")?;
    let resolver = RedirectResolver::new(Arc::new(probe), settings);

    println!("{}", "🔗 Redirect chain".bright_blue().bold());
    println!();

    let chain = resolver.resolve(url).await?;

    for (i, hop) in chain.hops().iter().enumerate() {
        if hop.is_terminal() {
            println!(
                "  {:>2}. {} {}",
                i + 1,
                hop.from.green(),
                "(final)".bright_black()
            );
        } else {
            println!("  {:>2}. {} → {}", i + 1, hop.from.cyan(), hop.to.cyan());
        }
    }

    println!();
    println!(
        "  Redirects: {}",
        chain.redirect_count().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database operations.
async fn handle_db_action(action: DbAction) -> Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match action {
        DbAction::Check => check_database(&pool).await?,
        DbAction::Init => init_database(pool).await?,
    }

    Ok(())
}

/// Runs a trivial query and reports the number of stored links if the
/// table exists.
async fn check_database(pool: &PgPool) -> Result<()> {
    println!("{}", "🔌 Checking database connection...".bright_blue());

    sqlx::query("SELECT 1").execute(pool).await?;
    println!("{}", "✅ Database connection OK".green().bold());

    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
    {
        Ok(count) => println!("  Links: {}", count.to_string().bright_white().bold()),
        Err(_) => println!(
            "  {}",
            "Table 'urls' not found, run: admin db init".yellow()
        ),
    }

    Ok(())
}

async fn init_database(pool: PgPool) -> Result<()> {
    PgLinkRepository::new(Arc::new(pool))
        .ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create table: {}", e))?;

    println!("{}", "✅ Table 'urls' is ready".green().bold());
    Ok(())
}
