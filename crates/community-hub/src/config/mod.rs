use std::env;
use std::fmt;

const DEFAULT_COMMUNITY_NAME: &str = "Sunrise Heights";
const DEFAULT_CODE_PREFIX: &str = "RC-";
const DEFAULT_CODE_LENGTH: usize = 6;
const MIN_CODE_LENGTH: usize = 4;
const MAX_CODE_LENGTH: usize = 16;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub community: CommunityConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let name = env::var("COMMUNITY_NAME")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_COMMUNITY_NAME.to_string());

        let resident_code_prefix = env::var("RESIDENT_CODE_PREFIX")
            .map(|value| value.trim().to_ascii_uppercase())
            .unwrap_or_else(|_| DEFAULT_CODE_PREFIX.to_string());

        let resident_code_length = match env::var("RESIDENT_CODE_LENGTH") {
            Ok(raw) => parse_code_length(&raw)?,
            Err(_) => DEFAULT_CODE_LENGTH,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            community: CommunityConfig {
                name,
                resident_code_prefix,
                resident_code_length,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_code_length(raw: &str) -> Result<usize, ConfigError> {
    let length = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidCodeLength)?;
    if (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        Ok(length)
    } else {
        Err(ConfigError::InvalidCodeLength)
    }
}

/// Community identity and resident-code issuance settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityConfig {
    pub name: String,
    pub resident_code_prefix: String,
    pub resident_code_length: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMMUNITY_NAME.to_string(),
            resident_code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            resident_code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCodeLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCodeLength => write!(
                f,
                "RESIDENT_CODE_LENGTH must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
