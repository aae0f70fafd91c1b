//! Currency conversion over a USD-based rate table.

use platform_host::CurrencyRates;
use thiserror::Error;

/// Currencies offered in the pickers, in display order.
pub const CURATED_CURRENCIES: [(&str, &str); 12] = [
    ("USD", "Dólar estadounidense"),
    ("EUR", "Euro"),
    ("GBP", "Libra esterlina"),
    ("JPY", "Yen japonés"),
    ("MXN", "Peso mexicano"),
    ("ARS", "Peso argentino"),
    ("COP", "Peso colombiano"),
    ("CLP", "Peso chileno"),
    ("BRL", "Real brasileño"),
    ("CAD", "Dólar canadiense"),
    ("CHF", "Franco suizo"),
    ("CNY", "Yuan chino"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("introduce una cantidad válida")]
    InvalidAmount,
    #[error("no hay tasa para {0}")]
    UnknownCurrency(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RatesView {
    Loading,
    Ready(CurrencyRates),
    Failed(String),
}

/// Parses a user-entered amount; a comma is accepted as the decimal separator.
pub fn parse_amount(raw: &str) -> Result<f64, ConversionError> {
    let amount: f64 = raw
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| ConversionError::InvalidAmount)?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ConversionError::InvalidAmount)
    }
}

/// Converts `amount` of `from` into `to`: `amount / rate[from] * rate[to]`.
///
/// # Errors
///
/// Fails on non-finite amounts and codes missing from `rates`.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    rates: &CurrencyRates,
) -> Result<f64, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount);
    }
    let rate = |code: &str| {
        rates
            .rate(code)
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    };
    Ok(amount / rate(from)? * rate(to)?)
}

/// Curated currencies that `rates` can price.
pub fn available_currencies(rates: &CurrencyRates) -> Vec<(&'static str, &'static str)> {
    CURATED_CURRENCIES
        .into_iter()
        .filter(|(code, _)| rates.rate(code).is_some())
        .collect()
}

/// Two decimals, or four for magnitudes below one.
pub fn format_amount(value: f64) -> String {
    if value != 0.0 && value.abs() < 1.0 {
        format!("{value:.4}")
    } else {
        format!("{value:.2}")
    }
}
