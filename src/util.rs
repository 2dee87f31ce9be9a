use prettytable::format::Alignment;
use prettytable::{color, Attr, Cell};

use crate::config::Config;
use crate::entity::money::{Currency, Money, CANONICAL};
use crate::exchange::{Exchange, Rates};

static UNAVAILABLE: &str =
    "Warning: exchange rates are unavailable, amounts are shown in the canonical currency";

/// Current rates, warning the user when they could not be fetched.
pub fn rates(config: &Config) -> Option<Rates> {
    let rates = Exchange::new(config);

    if rates.is_none() {
        crate::werr!("{}", UNAVAILABLE);
    }

    rates
}

/// Currency amounts are shown in: the requested one, else the configured one, and the
/// canonical one whenever there are no rates to convert with.
pub fn display_currency(
    requested: Option<Currency>,
    config: &Config,
    rates: Option<&Rates>,
) -> Currency {
    match rates {
        Some(_) => requested.unwrap_or(config.currency),
        None => CANONICAL,
    }
}

pub fn money_cell(value: &Money, alignment: Alignment, colored: Option<bool>) -> Cell {
    let cell = Cell::new_align(&value.to_string(), alignment).with_style(Attr::Bold);

    match colored {
        Some(good) => cell.with_style(color(good)),
        None => cell,
    }
}

pub fn percentage_cell(value: f64, alignment: Alignment) -> Cell {
    Cell::new_align(&format!("{:.2}%", value), alignment).with_style(Attr::Bold)
}

/// Textual bar of `progress` (within [0, 1]) spanning `width` characters.
pub fn bar(progress: f64, width: usize) -> String {
    let filled = (progress.max(0.0).min(1.0) * width as f64).round() as usize;

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn color(good: bool) -> Attr {
    if good {
        Attr::ForegroundColor(color::BRIGHT_GREEN)
    } else {
        Attr::ForegroundColor(color::BRIGHT_RED)
    }
}
