//! A client for exchange rate APIs exposing `GET <url>/latest/<base>`.

use serde::Deserialize;
use thiserror::Error;

use std::time::Duration;

use crate::exchange::Rates;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Rate service answered with status {0}")]
    Status(u16),
}

#[derive(Deserialize, Debug)]
pub struct LatestRates {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub rates: Rates,
}

pub struct Client {
    url: String,
    timeout: Duration,
}

impl Client {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    /// Get the latest rates quoted against `base`.
    ///
    /// Every failure is logged and reported as `None`, the caller decides how to degrade.
    pub fn latest(&self, base: &str) -> Option<Rates> {
        match self.fetch(base) {
            Ok(latest) => {
                log::debug!(
                    "Fetched {} exchange rates for {}",
                    latest.rates.len(),
                    latest.base.as_deref().unwrap_or(base)
                );
                Some(latest.rates)
            }
            Err(err) => {
                log::warn!("Exchange rates unavailable: {}", err);
                None
            }
        }
    }

    fn fetch(&self, base: &str) -> Result<LatestRates, Error> {
        let url = format!("{}/latest/{}", self.url.trim_end_matches('/'), base);

        log::debug!("Requesting {}", url);

        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = http.get(&url).send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        Client::parse(status, &body)
    }

    fn parse(status: u16, body: &str) -> Result<LatestRates, Error> {
        if status != 200 {
            return Err(Error::Status(status));
        }

        let deserialized: LatestRates = serde_json::from_str(body)?;

        Ok(deserialized)
    }
}
