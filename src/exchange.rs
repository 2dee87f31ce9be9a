use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::config::Config;
use crate::entity::money::CANONICAL;
use crate::service::exchangerate;
use crate::CliResult;

/// Units of each currency per one unit of the canonical currency.
pub type Rates = BTreeMap<String, f64>;

/// Converts `amount` from one currency code to another through the canonical currency.
///
/// A missing rate counts as 1.0, so an unknown code behaves as if it were at par with the
/// canonical currency. Without rates, or when both codes match, the amount is returned as is,
/// and so it is whenever the computation does not produce a finite number (e.g. a zero rate).
/// The result is rounded to two decimal places, half away from zero.
pub fn convert(amount: f64, from: &str, to: &str, rates: Option<&Rates>) -> f64 {
    let rates = match rates {
        Some(rates) if !rates.is_empty() && from != to => rates,
        _ => return amount,
    };

    let canonical = if from != CANONICAL.code() {
        amount / rate(rates, from)
    } else {
        amount
    };

    let converted = if to != CANONICAL.code() {
        canonical * rate(rates, to)
    } else {
        canonical
    };

    let rounded = (converted * 100.0).round() / 100.0;

    if rounded.is_finite() {
        rounded
    } else {
        log::warn!(
            "Conversion of {} from {} to {} failed, keeping original amount",
            amount,
            from,
            to
        );
        amount
    }
}

fn rate(rates: &Rates, code: &str) -> f64 {
    match rates.get(code) {
        Some(value) => *value,
        None => {
            log::debug!("No exchange rate for {}, assuming 1.0", code);
            1.0
        }
    }
}

/// Rate table as stored in the cache file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Exchange {
    timestamp: i64,
    base: String,
    rates: Rates,
}

impl Exchange {
    /// Current rates, reusing the cached table while it is younger than the configured ttl.
    ///
    /// `None` means the rate service could not be reached, in which case amounts can only be
    /// shown in the canonical currency.
    pub fn new(config: &Config) -> Option<Rates> {
        if Exchange::valid_cache(config) {
            match Exchange::load(config) {
                Ok(exchange) => {
                    log::debug!("Using cached exchange rates from {}", exchange.timestamp);
                    return Some(exchange.rates);
                }
                Err(err) => log::warn!("Ignoring unreadable exchange cache: {}", err),
            }
        }

        Exchange::refresh(config)
    }

    /// Fetches rates from the service, bypassing the cache.
    pub fn refresh(config: &Config) -> Option<Rates> {
        let settings = config.exchange();

        let client = exchangerate::Client::new(settings.url(), settings.timeout());

        let rates = client.latest(CANONICAL.code())?;

        let exchange = Exchange {
            timestamp: chrono::Utc::now().timestamp(),
            base: CANONICAL.code().to_string(),
            rates,
        };

        if let Err(err) = exchange.store(&settings.cache_file()) {
            log::warn!("Could not store exchange rates cache: {}", err);
        }

        Some(exchange.rates)
    }

    fn valid_cache(config: &Config) -> bool {
        let settings = config.exchange();
        let cache_file = settings.cache_file();
        let path = Path::new(&cache_file);

        let mtime = path
            .metadata()
            .and_then(|v| v.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let default = Duration::new(settings.ttl(), 0);

        path.exists()
            && SystemTime::now()
                .duration_since(mtime)
                .unwrap_or(default)
                .as_secs()
                < settings.ttl()
    }

    fn load(config: &Config) -> CliResult<Exchange> {
        let file = File::open(config.exchange().cache_file())?;
        let exchange: Exchange = serde_yaml::from_reader(file)?;
        Ok(exchange)
    }

    fn store(&self, location: &str) -> CliResult<()> {
        let mut file = File::create(location)?;
        let yaml = serde_yaml::to_string(self)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
