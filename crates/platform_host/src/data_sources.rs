//! External data-source contracts for the weather and currency widgets.
//!
//! The desktop does not depend on the shape of the upstream APIs. Adapters reduce each response to
//! a plain numeric snapshot before it crosses this boundary.

use std::{collections::BTreeMap, future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by data-source async methods.
pub type DataSourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Currency code every [`CurrencyRates`] table is relative to.
pub const CURRENCY_BASE_CODE: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Current conditions at the configured location.
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Exchange rates keyed by 3-letter currency code.
pub struct CurrencyRates {
    /// Base currency code (rate `1.0`).
    pub base: String,
    /// Units of each currency per one unit of [`CurrencyRates::base`].
    pub rates: BTreeMap<String, f64>,
}

impl CurrencyRates {
    /// Returns the rate for `code`, treating the base currency as `1.0`.
    pub fn rate(&self, code: &str) -> Option<f64> {
        if code == self.base {
            return Some(self.rates.get(code).copied().unwrap_or(1.0));
        }
        self.rates.get(code).copied()
    }
}

/// Host service providing the current weather snapshot.
pub trait WeatherSource {
    /// Fetches the current conditions.
    fn current_weather<'a>(&'a self) -> DataSourceFuture<'a, Result<WeatherSnapshot, String>>;
}

/// Host service providing currency exchange rates.
pub trait RatesSource {
    /// Fetches the latest rate table.
    fn latest_rates<'a>(&'a self) -> DataSourceFuture<'a, Result<CurrencyRates, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Data source for hosts without network access. Every request fails.
pub struct UnavailableDataSource;

impl WeatherSource for UnavailableDataSource {
    fn current_weather<'a>(&'a self) -> DataSourceFuture<'a, Result<WeatherSnapshot, String>> {
        Box::pin(async { Err("weather source unavailable on this host".to_string()) })
    }
}

impl RatesSource for UnavailableDataSource {
    fn latest_rates<'a>(&'a self) -> DataSourceFuture<'a, Result<CurrencyRates, String>> {
        Box::pin(async { Err("currency source unavailable on this host".to_string()) })
    }
}

#[derive(Debug, Clone, Copy)]
/// Weather source that always answers with the same snapshot.
pub struct FixedWeatherSource(pub WeatherSnapshot);

impl WeatherSource for FixedWeatherSource {
    fn current_weather<'a>(&'a self) -> DataSourceFuture<'a, Result<WeatherSnapshot, String>> {
        let snapshot = self.0;
        Box::pin(async move { Ok(snapshot) })
    }
}

#[derive(Debug, Clone)]
/// Rates source that always answers with the same table.
pub struct FixedRatesSource(pub CurrencyRates);

impl RatesSource for FixedRatesSource {
    fn latest_rates<'a>(&'a self) -> DataSourceFuture<'a, Result<CurrencyRates, String>> {
        Box::pin(async move { Ok(self.0.clone()) })
    }
}
