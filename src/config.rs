use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_PROMOTIONS_URL: &str =
    "https://store-site-backend-static.ak.epicgames.com/freeGamesPromotions";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Runtime settings, read once from the process environment.
///
/// Only `TG_BOT_TOKEN` and `TG_CHAT_ID` matter for a normal run; the rest
/// default to the public endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tg_bot_token: Option<String>,
    #[serde(default)]
    pub tg_chat_id: Option<String>,
    pub epic_promotions_url: String,
    pub tg_api_base: String,
    pub log_level: String,
}

/// Bot token and target chat, both guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub chat_id: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    /// Variable names map to fields case-insensitively, e.g. `TG_BOT_TOKEN`
    /// to `tg_bot_token`.
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("epic_promotions_url", DEFAULT_PROMOTIONS_URL)?
            .set_default("tg_api_base", DEFAULT_TELEGRAM_API)?
            .set_default("log_level", "info")?
            .add_source(env.try_parsing(false))
            .build()?;

        s.try_deserialize()
    }

    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.tg_bot_token.as_deref().filter(|t| !t.is_empty())?;
        let chat_id = self.tg_chat_id.as_deref().filter(|c| !c.is_empty())?;

        Some(Credentials {
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tg_bot_token: None,
            tg_chat_id: None,
            epic_promotions_url: DEFAULT_PROMOTIONS_URL.to_string(),
            tg_api_base: DEFAULT_TELEGRAM_API.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;

    fn from_vars(vars: &[(&str, &str)]) -> Settings {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Settings::from_env(Environment::default().source(Some(vars))).unwrap()
    }

    #[test]
    fn test_env_credentials() {
        let settings = from_vars(&[("TG_BOT_TOKEN", "123:abc"), ("TG_CHAT_ID", "-10042")]);

        assert_eq!(
            settings.credentials(),
            Some(Credentials {
                token: "123:abc".into(),
                chat_id: "-10042".into(),
            })
        );
    }

    #[test]
    fn test_env_defaults() {
        let settings = from_vars(&[]);

        assert!(settings.credentials().is_none());
        assert_eq!(settings.epic_promotions_url, DEFAULT_PROMOTIONS_URL);
        assert_eq!(settings.tg_api_base, DEFAULT_TELEGRAM_API);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let settings = from_vars(&[
            ("EPIC_PROMOTIONS_URL", "http://127.0.0.1:8080/promos"),
            ("TG_API_BASE", "http://127.0.0.1:8081"),
            ("LOG_LEVEL", "debug"),
            ("TG_CHAT_ID", ""),
        ]);

        assert_eq!(settings.epic_promotions_url, "http://127.0.0.1:8080/promos");
        assert_eq!(settings.tg_api_base, "http://127.0.0.1:8081");
        assert_eq!(settings.log_level, "debug");
        assert!(settings.credentials().is_none());
    }

    fn with_creds(token: Option<&str>, chat_id: Option<&str>) -> Settings {
        Settings {
            tg_bot_token: token.map(str::to_string),
            tg_chat_id: chat_id.map(str::to_string),
            ..Settings::default()
        }
    }

    #[test]
    fn test_credentials_require_both_values() {
        assert_eq!(
            with_creds(Some("123:abc"), Some("-10042")).credentials(),
            Some(Credentials {
                token: "123:abc".into(),
                chat_id: "-10042".into(),
            })
        );
        assert!(with_creds(None, Some("-10042")).credentials().is_none());
        assert!(with_creds(Some("123:abc"), None).credentials().is_none());
        assert!(with_creds(None, None).credentials().is_none());
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        assert!(with_creds(Some(""), Some("-10042")).credentials().is_none());
        assert!(with_creds(Some("123:abc"), Some("")).credentials().is_none());
    }
}
