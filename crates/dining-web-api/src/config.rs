use std::net::IpAddr;

use tokio::fs;

const CONFIG_PATH: &str = "dining_api.toml";

/// Overrides `[menu] base_url` when set.
pub const MENU_BASE_URL_ENV: &str = "MENU_BASE_URL";
/// Credential for the completion api. Required at startup.
pub const ADVISOR_API_KEY_ENV: &str = "ADVISOR_API_KEY";

pub async fn read() -> anyhow::Result<Config> {
    let mut config = if fs::try_exists(CONFIG_PATH).await? {
        let raw = fs::read_to_string(CONFIG_PATH).await?;
        let config = toml::from_str(&raw)?;
        tracing::info!("read config from {CONFIG_PATH}");
        config
    } else {
        tracing::info!("{CONFIG_PATH} does not exist, using default config");
        Config::default()
    };

    if let Ok(url) = std::env::var(MENU_BASE_URL_ENV) {
        tracing::info!("menu base url overridden by {MENU_BASE_URL_ENV}");
        config.menu.base_url = url;
    }

    tracing::info!("using config: {config:#?}");
    Ok(config)
}

pub fn advisor_api_key() -> anyhow::Result<String> {
    std::env::var(ADVISOR_API_KEY_ENV).map_err(|_| anyhow::anyhow!(
        "missing {ADVISOR_API_KEY_ENV} environment variable, \
         the completion api credential is required"
    ))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub menu: MenuConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub base_url: String,
    pub school: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://amherst.api.nutrislice.com"),
            school: format!("valentine-hall"),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://api.deepseek.com"),
            model: format!("deepseek-chat"),
            max_tokens: 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.menu.school, "valentine-hall");
        assert_eq!(config.advisor.model, "deepseek-chat");
        assert_eq!(config.advisor.max_tokens, 400);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: Config = toml::from_str(
            "[advisor]\nmodel = \"deepseek-reasoner\"\n\n[server]\nport = 8080\n",
        ).unwrap();
        assert_eq!(config.advisor.model, "deepseek-reasoner");
        assert_eq!(config.advisor.base_url, "https://api.deepseek.com");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.menu.base_url, "https://amherst.api.nutrislice.com");
    }

    #[test]
    fn advisor_key_is_required() {
        std::env::remove_var(ADVISOR_API_KEY_ENV);
        assert!(advisor_api_key().is_err());

        std::env::set_var(ADVISOR_API_KEY_ENV, "sk-test");
        assert_eq!(advisor_api_key().unwrap(), "sk-test");
        std::env::remove_var(ADVISOR_API_KEY_ENV);
    }
}
