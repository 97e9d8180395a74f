use crate::core::catalog::PassCatalog;
use crate::core::LedgerConfig;
use crate::domain::model::PassTier;
use crate::utils::error::{PassError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LEDGER_PATH: &str = "./data/passes.jsonl";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ledger: LedgerSection,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub tiers: Vec<PassTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tiers: PassCatalog::standard().tiers().to_vec(),
        }
    }
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_LEDGER_PATH.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PassError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，先替換環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PassError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VAR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PassError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("ledger.path", &self.ledger.path)?;

        if self.catalog.tiers.is_empty() {
            return Err(PassError::ConfigValidationError {
                field: "catalog.tiers".to_string(),
                message: "At least one pass tier is required".to_string(),
            });
        }
        // 方案規則由 catalog 負責驗證
        self.build_catalog()?;

        if let Some(level) = self.log_level() {
            validate_one_of("monitoring.log_level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    pub fn build_catalog(&self) -> Result<PassCatalog> {
        PassCatalog::new(self.catalog.tiers.clone())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl LedgerConfig for TomlConfig {
    fn ledger_path(&self) -> &str {
        &self.ledger.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
