use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 優先順序: `RUST_LOG`、`--verbose`、配置檔的 log_level
fn default_filter(verbose: bool, log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("deal_pass=debug,info")
        } else if let Some(level) = log_level {
            EnvFilter::new(format!("deal_pass={}", level))
        } else {
            EnvFilter::new("deal_pass=info")
        }
    })
}

/// 初始化 CLI 日誌系統 (compact 格式)
pub fn init_cli_logger(verbose: bool, log_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 初始化 JSON 格式日誌
pub fn init_json_logger(verbose: bool, log_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // one object per line for log shippers
        )
        .init();
}
