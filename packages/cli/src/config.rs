use pagecraft_compiler_html::CompileOptions;
use pagecraft_editor::DEFAULT_MAX_ENTRIES;
use pagecraft_gateway::{CredentialProvider, GatewayConfig, NoCredentials, StaticToken};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the content service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_stable_path")]
    pub stable_path: String,

    #[serde(default = "default_legacy_path")]
    pub legacy_path: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum history entries kept per editing session (0 = unlimited, 1 and 2 act as 3)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Indent generated markup
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_api_base_url() -> String {
    GatewayConfig::default().base_url
}

fn default_stable_path() -> String {
    GatewayConfig::default().stable_path
}

fn default_legacy_path() -> String {
    GatewayConfig::default().legacy_path
}

fn default_token_env() -> String {
    "PAGECRAFT_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.api_base_url.clone(),
            stable_path: self.stable_path.clone(),
            legacy_path: self.legacy_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Bearer token from the configured environment variable, if set
    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Arc::new(StaticToken(token.trim().to_string())),
            _ => Arc::new(NoCredentials),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        if self.pretty {
            CompileOptions::default()
        } else {
            CompileOptions::compact()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            stable_path: default_stable_path(),
            legacy_path: default_legacy_path(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
            pretty: default_pretty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "apiBaseUrl": "https://content.example.com",
            "legacyPath": "v0/pages",
            "timeoutSecs": 5,
            "historyLimit": 20,
            "pretty": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url, "https://content.example.com");
        assert_eq!(config.stable_path, "api/landing-pages");
        assert_eq!(config.legacy_path, "v0/pages");
        assert_eq!(config.history_limit, 20);
        assert!(!config.pretty);

        let gateway = config.gateway_config();
        assert_eq!(gateway.timeout, Duration::from_secs(5));
        assert_eq!(gateway.base_url, "https://content.example.com");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.token_env, "PAGECRAFT_TOKEN");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.history_limit, DEFAULT_MAX_ENTRIES);
        assert_eq!(config.compile_options(), CompileOptions::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "apiBaseUrl": "http://127.0.0.1:9000", "tokenEnv": "SHOP_TOKEN" }"#,
        )
        .unwrap();

        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.token_env, "SHOP_TOKEN");
        assert!(config.pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();

        assert!(Config::load(dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unset_token_env_sends_no_credentials() {
        let config = Config {
            token_env: "PAGECRAFT_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..Config::default()
        };
        assert_eq!(config.credentials().bearer_token(), None);
    }
}
