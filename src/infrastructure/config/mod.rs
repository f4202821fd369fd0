use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Deployment configuration for the bulk-upload client. The pipeline
/// itself is pure computation; only the HTTP client reads this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Quiz backend base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1337".to_string(),
            timeout_secs: 30,
        }
    }
}

impl UploadConfig {
    /// Layer defaults under `quiz-import.toml` and `QUIZ_IMPORT_*`
    /// environment variables (a `.env` file is honored if present).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        Figment::from(Serialized::defaults(UploadConfig::default()))
            .merge(Toml::file("quiz-import.toml"))
            .merge(Env::prefixed("QUIZ_IMPORT_"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.base_url, "http://localhost:1337");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("QUIZ_IMPORT_BASE_URL", "https://cms.example.com");
            let config: UploadConfig =
                Figment::from(Serialized::defaults(UploadConfig::default()))
                    .merge(Env::prefixed("QUIZ_IMPORT_"))
                    .extract()?;
            assert_eq!(config.base_url, "https://cms.example.com");
            assert_eq!(config.timeout_secs, 30);
            Ok(())
        });
    }
}
