use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::entity::money::Currency;
use crate::xdg::Xdg;
use crate::{CliResult, Mode};

const CONFIGURATION_FILENAME: &str = "config";
const EXCHANGE_URL: &str = "https://api.exchangerate-api.com/v4";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    files: Files,
    exchange: Exchange,
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Files {
    expenses: String,
    budgets: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    url: String,
    timeout: u64,
    ttl: u64,
    cache_file: String,
}

impl Config {
    pub fn new() -> CliResult<Config> {
        let config_path = Config::path()?;

        let data: Config = if Path::new(&config_path).exists() {
            let file = File::open(&config_path)?;
            serde_yaml::from_reader(file)?
        } else {
            Config::default(&config_path)?
        };

        Ok(data)
    }

    pub fn default(config_path: &str) -> CliResult<Config> {
        let default = Config::build(
            Xdg::Data("expenses.csv".to_string()).filepath()?,
            Xdg::Data("budgets.csv".to_string()).filepath()?,
            Xdg::Cache("exchange.yml".to_string()).filepath()?,
        );

        let mut file = File::create(config_path)?;
        let yaml = serde_yaml::to_string(&default)?;
        file.write_all(yaml.as_bytes())?;
        Ok(default)
    }

    pub fn build(expenses: String, budgets: String, cache_file: String) -> Config {
        Config {
            files: Files { expenses, budgets },
            exchange: Exchange {
                url: EXCHANGE_URL.to_string(),
                timeout: 5,
                ttl: 3600, // 1 hour
                cache_file,
            },
            currency: Currency::default(),
        }
    }

    pub fn path() -> CliResult<String> {
        Xdg::Config(CONFIGURATION_FILENAME.to_string()).filepath()
    }

    pub fn exchange(&self) -> Exchange {
        self.exchange.clone()
    }

    pub fn filepath(&self, mode: Mode) -> String {
        let val = match mode {
            Mode::Expenses => &self.files.expenses,
            Mode::Budgets => &self.files.budgets,
        };

        shellexpand::tilde(val).to_string()
    }
}

impl Exchange {
    pub fn url(&self) -> String {
        self.url.to_owned()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn cache_file(&self) -> String {
        shellexpand::tilde(&self.cache_file).to_string()
    }
}
