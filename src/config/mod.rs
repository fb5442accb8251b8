// src/config/mod.rs
// All values load from the environment (.env supported), with defaults below.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct GuestdeskConfig {
    // ── Model Configuration
    pub mistral_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub llm_timeout: u64,

    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub request_timeout: u64,

    // ── Logging Configuration
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            // Tolerate values with trailing comments and whitespace.
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl GuestdeskConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            mistral_base_url: env_var_or("MISTRAL_BASE_URL", "https://api.mistral.ai/v1".to_string()),
            model: env_var_or("MODEL_NAME", "mistral-large-latest".to_string()),
            temperature: env_var_or("MODEL_TEMPERATURE", 0.1),
            max_tokens: env_var_or("MODEL_MAX_TOKENS", 1000),
            llm_timeout: env_var_or("LLM_TIMEOUT_SECONDS", 30),
            host: env_var_or("HOST", "0.0.0.0".to_string()),
            port: env_var_or("PORT", 8000),
            cors_origin: env_var_or("CORS_ORIGIN", "*".to_string()),
            request_timeout: env_var_or("REQUEST_TIMEOUT_SECONDS", 90),
            log_level: env_var_or("LOG_LEVEL", "info".to_string()),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<GuestdeskConfig> = Lazy::new(GuestdeskConfig::from_env);
