use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Symbol prefixed to every formatted amount
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// File that receives tracing output while the terminal UI is running
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Start with the demo roster loaded
    #[serde(default = "default_seed_roster")]
    pub seed_roster: bool,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_log_file() -> String {
    "cost_estimator.log".to_string()
}

fn default_seed_roster() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            log_file: default_log_file(),
            seed_roster: default_seed_roster(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are picked up first when one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_variables_are_missing() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.currency_symbol(), "€");
        assert_eq!(config.log_file, "cost_estimator.log");
        assert!(config.seed_roster);
    }

    #[test]
    fn variables_override_defaults() {
        let vars = vec![
            ("CURRENCY_SYMBOL".to_string(), "$".to_string()),
            ("SEED_ROSTER".to_string(), "false".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.currency_symbol(), "$");
        assert!(!config.seed_roster);
    }
}
