use std::time::Duration;

use super::api::DICTIONARY_URL;

/* Configuration of the bot, read from the environment at startup.
 * Only the access token is required, everything else has a default.
 */

const TOKEN_KEY: &str = "BOT_API_TOKEN";
const DICTIONARY_URL_KEY: &str = "O3O_DICTIONARY_URL";

pub const QUEUE_CAPACITY: usize = 1000;
pub const RESULT_LIMIT: usize = 19;
pub const POLLING_INTERVAL: Duration = Duration::from_secs(1);

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Please set 'BOT_API_TOKEN' from environment variable")]
    MissingToken,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchSettings {
    pub queue_capacity: usize,
    pub result_limit: usize,
    pub polling_interval: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        DispatchSettings {
            queue_capacity: QUEUE_CAPACITY,
            result_limit: RESULT_LIMIT,
            polling_interval: POLLING_INTERVAL,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub dictionary_url: String,
    pub settings: DispatchSettings,
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("dictionary_url", &self.dictionary_url)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_KEY)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let dictionary_url = lookup(DICTIONARY_URL_KEY)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DICTIONARY_URL.to_string());

        Ok(Config {
            token,
            dictionary_url,
            settings: DispatchSettings::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("BOT_API_TOKEN", "123:abc")])).unwrap();

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.dictionary_url, DICTIONARY_URL);
        assert_eq!(config.settings.queue_capacity, 1000);
        assert_eq!(config.settings.result_limit, 19);
        assert_eq!(config.settings.polling_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_config_dictionary_override() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_API_TOKEN", "123:abc"),
            ("O3O_DICTIONARY_URL", "http://localhost:8080/yan.json"),
        ]))
        .unwrap();

        assert_eq!(config.dictionary_url, "http://localhost:8080/yan.json");
    }

    #[test]
    fn test_config_missing_token() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[])).unwrap_err(),
            ConfigError::MissingToken
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("BOT_API_TOKEN", "  ")])).unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn test_config_debug_hides_token() {
        let config = Config::from_lookup(lookup_from(&[("BOT_API_TOKEN", "123:abc")])).unwrap();
        assert!(!format!("{:?}", config).contains("123:abc"));
    }
}
