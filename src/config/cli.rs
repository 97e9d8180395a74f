use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "deal-pass")]
#[command(about = "Marketplace access passes, entitlement checks and listing masking")]
pub struct Cli {
    /// Path to TOML configuration file (built-in catalog and ./data ledger if omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the ledger path from config
    #[arg(long)]
    pub ledger: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List purchasable pass tiers
    Tiers,

    /// Record a confirmed purchase and activate the pass
    Activate {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        tier: String,
        /// RFC 3339 activation time, defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },

    /// Record a purchase from a confirmation JSON file
    Purchase {
        /// Path to a `{ownerId, tierId, activationTime}` JSON document
        event: String,
    },

    /// Show whether a viewer is entitled
    Status {
        #[arg(long)]
        owner: String,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },

    /// List every pass a viewer has bought
    History {
        #[arg(long)]
        owner: String,
    },

    /// Print the listing as the viewer is allowed to see it
    Project {
        #[arg(long)]
        viewer: String,
        /// Listing JSON file
        #[arg(long)]
        listing: String,
        /// Dealer JSON file
        #[arg(long)]
        dealer: String,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },

    /// Classify a deal heat score
    Classify {
        #[arg(allow_hyphen_values = true)]
        score: i32,
    },
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}
