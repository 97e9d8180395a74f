use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassError {
    #[error("Unknown pass tier: {tier_id}")]
    InvalidTier { tier_id: String },

    #[error("VIN too short to mask: {length} characters, need at least {minimum}")]
    MalformedVin { length: usize, minimum: usize },

    #[error("Activation time {activation_time} overflows pass expiry")]
    InvalidActivationTime { activation_time: String },

    #[error("Ledger IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid input '{path}': {message}")]
    InvalidInput { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Purchase,
    Masking,
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PassError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PassError::InvalidTier { .. } | PassError::InvalidActivationTime { .. } => {
                ErrorCategory::Purchase
            }
            PassError::MalformedVin { .. } => ErrorCategory::Masking,
            PassError::InvalidInput { .. } | PassError::SerializationError(_) => {
                ErrorCategory::Input
            }
            PassError::IoError(_) => ErrorCategory::Storage,
            PassError::ConfigError { .. }
            | PassError::ConfigValidationError { .. }
            | PassError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Purchase | ErrorCategory::Masking | ErrorCategory::Input => {
                ErrorSeverity::High
            }
            // 帳本寫入失敗不會授予存取權，由呼叫端重試
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 重試相同的呼叫是否可能成功
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PassError::InvalidTier { .. } => {
                "Use one of the tier ids listed by the catalog (see `deal-pass tiers`)"
            }
            PassError::MalformedVin { .. } => {
                "Fix the VIN on the listing record; it must have at least 10 characters"
            }
            PassError::InvalidActivationTime { .. } => {
                "Send the activation time reported by the payment provider"
            }
            PassError::IoError(_) => "Check that the ledger path is writable and retry the activation",
            PassError::SerializationError(_) | PassError::InvalidInput { .. } => {
                "Fix the JSON input file; retrying the same input will fail again"
            }
            PassError::ConfigError { .. }
            | PassError::ConfigValidationError { .. }
            | PassError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file and fix the reported field"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PassError::InvalidTier { tier_id } => {
                format!("The access pass '{}' is not available", tier_id)
            }
            PassError::MalformedVin { .. } => {
                "This listing has an invalid VIN and cannot be displayed".to_string()
            }
            PassError::InvalidActivationTime { .. } => {
                "The purchase could not be activated".to_string()
            }
            PassError::IoError(_) => {
                "Your pass could not be saved right now, please try again".to_string()
            }
            PassError::InvalidInput { path, .. } => {
                format!("The input file '{}' could not be read", path)
            }
            PassError::SerializationError(_) => "The request could not be understood".to_string(),
            _ => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PassError>;
