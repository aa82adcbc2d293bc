//! Relay settings and Reddit client credentials.
//!
//! Credentials live in the JSON secrets file written by the Reddit app setup
//! (`client_secrets.json`). Everything else is optional and read from a TOML
//! file; a missing TOML file means "use the defaults".

use crate::error::{ConfigError, CoreError};
use oauth2::{AccessToken, ClientId, ClientSecret};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";
pub const DEFAULT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SECRETS_PATH: &str = "client_secrets.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub username: String,
    #[serde(default)]
    pub auth_token: Option<AccessToken>,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = read_file(path)?;
        let credentials = Self::from_json_str(&raw)?;
        info!(
            "Loaded credentials for u/{} from {}",
            credentials.username,
            path.display()
        );
        Ok(credentials)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| {
            let message = e.to_string();
            match missing_field_name(&message) {
                Some(field) => ConfigError::MissingField { field },
                None => ConfigError::InvalidFormat { details: message },
            }
            .into()
        })
    }

    /// Stored bearer token, ignoring an empty string.
    pub fn stored_token(&self) -> Option<&str> {
        self.auth_token
            .as_ref()
            .map(|token| token.secret().as_str())
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub api_base_url: String,
    pub token_url: String,
    pub user_agent: Option<String>,
    pub bind_address: String,
    pub secrets_path: PathBuf,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            user_agent: None,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
        }
    }
}

impl RelayConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = read_file(path)?;
        let config = Self::from_toml_str(&raw)?;
        debug!("Loaded relay config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn user_agent_for(&self, username: &str) -> String {
        match &self.user_agent {
            Some(agent) if !agent.trim().is_empty() => agent.clone(),
            _ => format!("saved-links app by {}", username),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("token_url", &self.token_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bind_address".to_string(),
                value: self.bind_address.clone(),
            });
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.display().to_string(),
        }
        .into(),
        _ => CoreError::Io(e),
    })
}

// serde_json reports absent fields as "missing field `name` at line 1 column 2".
fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SECRETS: &str = r#"{
        "client_id": "abc123",
        "client_secret": "shh",
        "username": "test_user",
        "auth_token": "stored-token"
    }"#;

    #[test]
    fn test_credentials_from_json() {
        let credentials = Credentials::from_json_str(SECRETS).unwrap();
        assert_eq!(credentials.client_id.as_str(), "abc123");
        assert_eq!(credentials.client_secret.secret(), "shh");
        assert_eq!(credentials.username, "test_user");
        assert_eq!(credentials.stored_token(), Some("stored-token"));
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let credentials = Credentials::from_json_str(SECRETS).unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("shh"));
        assert!(!debug.contains("stored-token"));
    }

    #[test]
    fn test_credentials_without_token() {
        let raw = r#"{"client_id": "a", "client_secret": "b", "username": "c"}"#;
        let credentials = Credentials::from_json_str(raw).unwrap();
        assert!(credentials.stored_token().is_none());

        let raw = r#"{"client_id": "a", "client_secret": "b", "username": "c", "auth_token": ""}"#;
        let credentials = Credentials::from_json_str(raw).unwrap();
        assert!(credentials.stored_token().is_none());
    }

    #[test]
    fn test_credentials_missing_field() {
        let raw = r#"{"client_id": "a", "username": "c"}"#;
        let err = Credentials::from_json_str(raw).unwrap_err();
        match err {
            CoreError::Config(ConfigError::MissingField { field }) => {
                assert_eq!(field, "client_secret")
            }
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_credentials_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_secrets.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SECRETS.as_bytes()).unwrap();

        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.username, "test_user");
    }

    #[test]
    fn test_relay_config_defaults() {
        let config = RelayConfig::load_or_default(None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.secrets_path, PathBuf::from(DEFAULT_SECRETS_PATH));
        assert_eq!(
            config.user_agent_for("test_user"),
            "saved-links app by test_user"
        );
    }

    #[test]
    fn test_relay_config_partial_toml() {
        let config = RelayConfig::from_toml_str(
            r#"
            bind_address = "0.0.0.0:8080"
            user_agent = "custom agent"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.user_agent_for("ignored"), "custom agent");
    }

    #[test]
    fn test_relay_config_rejects_bad_url() {
        let err = RelayConfig::from_toml_str(r#"api_base_url = "oauth.reddit.com""#).unwrap_err();
        match err {
            CoreError::Config(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "api_base_url")
            }
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_relay_config_parse_error() {
        let err = RelayConfig::from_toml_str("bind_address = ").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::Parse(_))));
    }
}
