use crate::services::providers::GenerationParams;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the key file expected next to the executable.
pub const API_KEY_FILE_NAME: &str = "apikey";

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub common: core_config::Config,
    pub model: ModelConfig,
    pub google: GoogleConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Gemini model used for both summaries and chat replies.
    pub name: String,
    /// Upper bound for a single generateContent round trip.
    pub request_timeout_secs: u64,
    /// Unset leaves the model's own default.
    pub max_output_tokens: Option<i32>,
    pub temperature: Option<f32>,
}

impl ModelConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_base: String,
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl AssistantConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let key_path = match env::var("ASSISTANT_API_KEY_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_api_key_path()?,
        };
        let api_key = load_api_key(&key_path)?;

        let request_timeout_secs = get_env(
            "ASSISTANT_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "ASSISTANT_REQUEST_TIMEOUT_SECS must be a number of seconds: {}",
                e
            ))
        })?;

        Ok(AssistantConfig {
            common,
            model: ModelConfig {
                name: get_env("ASSISTANT_MODEL", DEFAULT_MODEL),
                request_timeout_secs,
                max_output_tokens: parse_optional(
                    "ASSISTANT_MAX_OUTPUT_TOKENS",
                    env::var("ASSISTANT_MAX_OUTPUT_TOKENS").ok(),
                )?,
                temperature: parse_optional(
                    "ASSISTANT_TEMPERATURE",
                    env::var("ASSISTANT_TEMPERATURE").ok(),
                )?,
            },
            google: GoogleConfig {
                api_base: get_env("ASSISTANT_API_BASE", DEFAULT_API_BASE),
                api_key,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env("ASSISTANT_ALLOWED_ORIGINS", "")),
            },
        })
    }

    /// Configuration for tests and embedding: defaults everywhere, explicit key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        AssistantConfig {
            common: core_config::Config::default(),
            model: ModelConfig {
                name: DEFAULT_MODEL.to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                max_output_tokens: None,
                temperature: None,
            },
            google: GoogleConfig {
                api_base: DEFAULT_API_BASE.to_string(),
                api_key: Secret::new(api_key.into()),
            },
            cors: CorsConfig::default(),
        }
    }
}

/// `apikey` in the directory holding the running executable.
pub fn default_api_key_path() -> Result<PathBuf, AppError> {
    let exe = env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!(
            "Cannot determine the directory of {}",
            exe.display()
        ))
    })?;
    Ok(dir.join(API_KEY_FILE_NAME))
}

/// Read the key once; surrounding whitespace is stripped.
pub fn load_api_key(path: &Path) -> Result<Secret<String>, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read API key file");
        AppError::ConfigError(anyhow::anyhow!(
            "API key file not found. Make sure '{}' file is present.",
            API_KEY_FILE_NAME
        ))
    })?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "API key file {} is empty",
            path.display()
        )));
    }

    Ok(Secret::new(key.to_string()))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Empty or unset means `None`; anything else must parse.
fn parse_optional<T>(key: &str, raw: Option<String>) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, value, e))
        }),
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
