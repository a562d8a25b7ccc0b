use serde::Deserialize;

use engine::{EngineError, ResultEngine};

const DEFAULT_CONFIG_PATH: &str = "config/ledger.toml";

/// Transport configuration for the ledger client.
///
/// The bearer token is issued by the console's auth layer; acquiring it
/// is out of scope here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub bearer_token: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            bearer_token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Loads the configuration from the default TOML file (optional) plus
/// `ITARA_LEDGER_*` environment variables.
pub fn load() -> ResultEngine<ClientConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

pub fn load_from(config_path: &str) -> ResultEngine<ClientConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("ITARA_LEDGER"));
    let settings: ClientConfig = builder
        .build()
        .map_err(|err| EngineError::Validation(format!("invalid configuration: {err}")))?
        .try_deserialize()
        .map_err(|err| EngineError::Validation(format!("invalid configuration: {err}")))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_from("config/does_not_exist.toml").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.bearer_token.is_empty());
    }
}
