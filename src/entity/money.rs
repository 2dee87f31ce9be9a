use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::CliError;
use crate::exchange::{self, Rates};
use crate::CliResult;

/// Currency in which every expense is persisted and against which rates are quoted.
pub const CANONICAL: Currency = Currency::USD;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    NGN,
    JPY,
    CAD,
    AUD,
}

/// Supported currencies in display order, the first one being the default selection.
pub const SUPPORTED: [Currency; 7] = [
    Currency::USD,
    Currency::EUR,
    Currency::GBP,
    Currency::NGN,
    Currency::JPY,
    Currency::CAD,
    Currency::AUD,
];

impl Currency {
    pub fn parse(code: &str) -> CliResult<Currency> {
        let code = code.trim().to_uppercase();

        SUPPORTED
            .iter()
            .copied()
            .find(|currency| currency.code() == code)
            .ok_or(CliError::IncorrectCurrencyCode { code })
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::NGN => "NGN",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::NGN => "₦",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }

    pub fn canonical(self) -> bool {
        self == CANONICAL
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::parse(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Currency::parse(&s)
            .map_err(|_| serde::de::Error::custom(format!("No matching currency for code: {}", s)))
    }
}

/// Display symbol for any currency code, falling back to the code itself.
pub fn symbol_for(code: &str) -> &str {
    match SUPPORTED.iter().find(|currency| currency.code() == code) {
        Some(currency) => currency.symbol(),
        None => code,
    }
}

/// Fixed point amount with two decimal places, kept as cents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    pub fn new(cents: i64) -> Amount {
        Amount { cents }
    }

    /// Rounds half away from zero to the nearest cent, rejecting values outside of the
    /// representable range.
    pub fn from_units(value: f64) -> CliResult<Amount> {
        let cents = (value * 100.0).round();

        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(CliError::IncorrectAmount {
                value: value.to_string(),
            });
        }

        Ok(Amount {
            cents: cents as i64,
        })
    }

    pub fn parse(value: &str) -> CliResult<Amount> {
        let trimmed = value.trim().replace(',', "");

        let units: f64 = trimmed.parse()?;

        Amount::from_units(units).map_err(|_| CliError::IncorrectAmount {
            value: value.to_string(),
        })
    }

    pub fn checked_add(self, other: Amount) -> CliResult<Amount> {
        self.cents
            .checked_add(other.cents)
            .map(Amount::new)
            .ok_or_else(|| CliError::IncorrectAmount {
                value: format!("{} + {}", self, other),
            })
    }

    pub fn checked_sub(self, other: Amount) -> CliResult<Amount> {
        self.cents
            .checked_sub(other.cents)
            .map(Amount::new)
            .ok_or_else(|| CliError::IncorrectAmount {
                value: format!("{} - {}", self, other),
            })
    }

    /// Sum of `amounts`, failing instead of overflowing.
    pub fn total<I>(amounts: I) -> CliResult<Amount>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::default(), Amount::checked_add)
    }

    pub fn units(self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn zero(self) -> bool {
        self.cents == 0
    }

    pub fn positive(self) -> bool {
        self.cents > 0
    }

    pub fn negative(self) -> bool {
        self.cents < 0
    }

    pub fn abs(self) -> Amount {
        Amount {
            cents: self.cents.saturating_abs(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative() { "-" } else { "" };
        let cents = self.cents.unsigned_abs();

        write!(f, "{}{}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl std::str::FromStr for Amount {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        Amount::parse(&s).map_err(|_| serde::de::Error::custom(format!("Invalid amount: {}", s)))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Money {
    pub amount: Amount,
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount.negative() { "-" } else { "" };

        write!(f, "{}{}{}", sign, self.currency.symbol(), self.amount.abs())
    }
}

impl Money {
    pub fn new(amount: Amount, currency: Currency) -> Money {
        Money { amount, currency }
    }

    pub fn canonical(amount: Amount) -> Money {
        Money::new(amount, CANONICAL)
    }

    pub fn exchange(&self, to: Currency, rates: Option<&Rates>) -> CliResult<Money> {
        let value = exchange::convert(self.amount.units(), self.currency.code(), to.code(), rates);

        Ok(Money::new(Amount::from_units(value)?, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_currencies_start_with_usd() {
        assert_eq!(SUPPORTED[0], Currency::USD);
        assert_eq!(SUPPORTED.len(), 7);
        assert_eq!(Currency::default(), Currency::USD);
    }

    #[test]
    fn symbols_of_supported_currencies() {
        let symbols: Vec<&str> = SUPPORTED.iter().map(|c| symbol_for(c.code())).collect();

        assert_eq!(symbols, vec!["$", "€", "£", "₦", "¥", "C$", "A$"]);
    }

    #[test]
    fn symbol_for_unknown_code_is_the_code() {
        assert_eq!(symbol_for("XYZ"), "XYZ");
        assert_eq!(symbol_for("eur"), "eur");
        assert_eq!(symbol_for(""), "");
    }

    #[test]
    fn currency_parse_is_case_insensitive() {
        assert_eq!(Currency::parse("eur").unwrap(), Currency::EUR);
        assert_eq!(Currency::parse(" ngn ").unwrap(), Currency::NGN);
        assert!(Currency::parse("CHF").is_err());
    }

    #[test]
    fn amount_parse_and_display() {
        assert_eq!(Amount::parse("12.5").unwrap(), Amount::new(1250));
        assert_eq!(Amount::parse("1,200").unwrap(), Amount::new(120000));
        assert_eq!(Amount::parse("0.005").unwrap(), Amount::new(1));
        assert_eq!(Amount::new(-705).to_string(), "-7.05");
        assert_eq!(Amount::new(9).to_string(), "0.09");
        assert!(Amount::parse("ten").is_err());
        assert!(Amount::parse("inf").is_err());
    }

    #[test]
    fn amount_arithmetic() {
        let total = Amount::total(vec![Amount::new(100), Amount::new(250)]).unwrap();

        assert_eq!(total, Amount::new(350));
        assert_eq!(Amount::total(Vec::new()).unwrap(), Amount::new(0));
        assert_eq!(
            Amount::new(100).checked_sub(Amount::new(250)).unwrap(),
            Amount::new(-150)
        );
        assert_eq!(Amount::new(-150).abs(), Amount::new(150));
    }

    #[test]
    fn amounts_out_of_range_are_rejected() {
        assert!(matches!(
            Amount::parse("1e17"),
            Err(CliError::IncorrectAmount { .. })
        ));
        assert!(Amount::parse("-1e17").is_err());
        assert!(Amount::from_units(f64::NAN).is_err());
        assert_eq!(
            Amount::parse("90000000000000000").unwrap(),
            Amount::new(9_000_000_000_000_000_000)
        );
    }

    #[test]
    fn overflowing_sums_are_errors() {
        let large = Amount::parse("90000000000000000").unwrap();

        assert!(matches!(
            large.checked_add(large),
            Err(CliError::IncorrectAmount { .. })
        ));
        assert!(Amount::total(vec![large, large]).is_err());
        assert!(Amount::new(i64::MIN).checked_sub(Amount::new(1)).is_err());
        assert_eq!(Amount::new(i64::MIN).to_string(), "-92233720368547758.08");
    }

    #[test]
    fn money_display_uses_symbol() {
        assert_eq!(Money::new(Amount::new(9000), Currency::EUR).to_string(), "€90.00");
        assert_eq!(Money::new(Amount::new(-5000), Currency::CAD).to_string(), "-C$50.00");
    }

    #[test]
    fn money_exchange_without_rates_keeps_amount() {
        let money = Money::new(Amount::new(10000), Currency::USD);
        let exchanged = money.exchange(Currency::EUR, None).unwrap();

        assert_eq!(exchanged.amount, Amount::new(10000));
        assert_eq!(exchanged.currency, Currency::EUR);
    }
}
