//! Currency and percentage rendering for the presentation layer.
//!
//! The numeric core never rounds; everything here is display-only.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, Percent};

impl Currency {
    /// Display symbol. Unknown codes fall back to the code itself.
    pub fn symbol(&self) -> &str {
        match self {
            Currency::USD | Currency::CAD | Currency::AUD | Currency::MXN => "$",
            Currency::PEN => "S/",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CHF => "CHF",
            Currency::JPY => "¥",
            Currency::Other(code) => code.as_str(),
        }
    }
}

/// Number layout conventions for a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberLocale {
    /// `$1,234.56`
    #[default]
    EnUs,
    /// `S/ 1,234.56`
    EsPe,
    /// `1.234,56 €`
    EsEs,
}

impl NumberLocale {
    fn group_separator(self) -> char {
        match self {
            NumberLocale::EnUs | NumberLocale::EsPe => ',',
            NumberLocale::EsEs => '.',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            NumberLocale::EnUs | NumberLocale::EsPe => '.',
            NumberLocale::EsEs => ',',
        }
    }
}

/// Currency plus locale: everything needed to render an amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub locale: NumberLocale,
}

impl MoneyFormat {
    pub fn new(currency: Currency, locale: NumberLocale) -> Self {
        MoneyFormat { currency, locale }
    }

    pub fn format(&self, amount: Money) -> String {
        format_currency(amount, self)
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Render an amount with two decimals and thousands grouping.
pub fn format_currency(amount: Money, fmt: &MoneyFormat) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let text = rounded.abs().to_string();
    let (int_part, dec_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let number = format!(
        "{}{}{}",
        group_thousands(int_part, fmt.locale.group_separator()),
        fmt.locale.decimal_separator(),
        dec_part
    );
    let sign = if negative { "-" } else { "" };
    let symbol = fmt.currency.symbol();

    match fmt.locale {
        NumberLocale::EnUs => format!("{sign}{symbol}{number}"),
        NumberLocale::EsPe => format!("{sign}{symbol} {number}"),
        NumberLocale::EsEs => format!("{sign}{number} {symbol}"),
    }
}

/// Render a percentage with one decimal: `12.5%`.
pub fn format_percentage(value: Percent) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    if rounded.is_zero() {
        // avoid "-0.0%"
        rounded = Decimal::new(0, 1);
    }
    format!("{rounded}%")
}
