use anyhow::{Context, Result};
use docket_store::{CauselistClient, StoreClient};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Hosted backend the pages read from and write to
    pub store: StoreConfig,

    /// External causelist endpoint
    pub causelist: CauselistConfig,

    /// The acting user (stamped onto saved snapshots when set)
    #[serde(default)]
    pub user: UserConfig,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct CauselistConfig {
    pub endpoint: String,

    /// Default advocate code for `causelist save`
    #[serde(default)]
    pub advocate_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub id: Option<String>,
}

impl Config {
    pub fn store_client(&self) -> StoreClient {
        StoreClient::new(&self.store.url, &self.store.api_key)
    }

    pub fn causelist_client(&self) -> CauselistClient {
        CauselistClient::new(&self.causelist.endpoint)
    }
}

/// Get the config directory path (~/.config/docket)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("docket");
    Ok(config_dir)
}

/// Get the config file path (~/.config/docket/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from ~/.config/docket/config.toml
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        anyhow::bail!(
            "Config file not found at {}\n\n\
            Create it with your backend credentials:\n\n\
            [store]\n\
            url = \"https://your-project.example.co\"\n\
            api_key = \"your-api-key\"\n\n\
            [causelist]\n\
            endpoint = \"https://your-proxy.example.co/getDailyCauselist\"\n\
            advocate_code = \"19272\"\n\n\
            [user]\n\
            id = \"your-user-id\"",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [store]
            url = "https://example.supabase.co"
            api_key = "secret"

            [causelist]
            endpoint = "https://proxy.example.co/getDailyCauselist"
            advocate_code = "19272"

            [user]
            id = "user-1"
            "#,
        )
        .expect("Should parse");

        assert_eq!(config.store.url, "https://example.supabase.co");
        assert_eq!(config.causelist.advocate_code.as_deref(), Some("19272"));
        assert_eq!(config.user.id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_user_and_advocate_code_are_optional() {
        let config = parse_config(
            r#"
            [store]
            url = "https://example.supabase.co"
            api_key = "secret"

            [causelist]
            endpoint = "https://proxy.example.co/getDailyCauselist"
            "#,
        )
        .expect("Should parse");

        assert_eq!(config.causelist.advocate_code, None);
        assert_eq!(config.user.id, None);
    }

    #[test]
    fn test_missing_store_section_is_an_error() {
        assert!(parse_config("[causelist]\nendpoint = \"x\"").is_err());
    }
}
