use chrono::Utc;
use clap::Parser;
use deal_pass::config::Command;
use deal_pass::utils::error::{ErrorSeverity, PassError, Result};
use deal_pass::utils::{logger, validation::Validate};
use deal_pass::{
    classify, Cli, Dealer, EntitlementStore, JsonlLedger, Listing, PurchaseConfirmation,
    TomlConfig, UnlockResolver,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    // 命令列參數優先於配置檔
    if let Some(ledger) = &cli.ledger {
        config.ledger.path = ledger.clone();
    }

    // 初始化日誌
    if cli.log_json || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2, // retryable
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    let catalog = config.build_catalog()?;
    let ledger = JsonlLedger::from_config(config);
    tracing::debug!("Using ledger at {}", ledger.path().display());
    let store = Arc::new(EntitlementStore::new(catalog, ledger));

    match command {
        Command::Tiers => {
            for tier in store.catalog().tiers() {
                println!(
                    "{:<10} {:<16} {:>3} days  ${}.{:02}{}",
                    tier.id,
                    tier.name,
                    tier.duration_days,
                    tier.price_cents / 100,
                    tier.price_cents % 100,
                    if tier.featured { "  (popular)" } else { "" }
                );
            }
        }
        Command::Activate { owner, tier, at } => {
            let pass = store
                .activate(&owner, &tier, at.unwrap_or_else(Utc::now))
                .await?;
            println!("{}", serde_json::to_string_pretty(&pass)?);
        }
        Command::Purchase { event } => {
            let purchase: PurchaseConfirmation = read_json(&event)?;
            let pass = store.record_purchase(&purchase).await?;
            println!("{}", serde_json::to_string_pretty(&pass)?);
        }
        Command::Status { owner, at } => {
            let status = store.status(&owner, at.unwrap_or_else(Utc::now)).await;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::History { owner } => {
            let passes = store.history(&owner).await?;
            println!("{}", serde_json::to_string_pretty(&passes)?);
        }
        Command::Project {
            viewer,
            listing,
            dealer,
            at,
        } => {
            let listing: Listing = read_json(&listing)?;
            let dealer: Dealer = read_json(&dealer)?;
            let resolver = UnlockResolver::new(Arc::clone(&store));
            let view = resolver
                .view_listing(&viewer, &listing, &dealer, at.unwrap_or_else(Utc::now))
                .await?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Command::Classify { score } => {
            let tier = classify(score);
            println!("{} ({})", tier, tier.accent());
        }
    }

    Ok(())
}

/// 讀取呼叫端提供的 JSON 檔案，失敗一律視為輸入錯誤
fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let invalid = |message: String| PassError::InvalidInput {
        path: path.to_string(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
}
