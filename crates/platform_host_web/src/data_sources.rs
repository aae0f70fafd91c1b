//! `fetch`-backed weather and currency sources.
//!
//! These adapters only translate an HTTP JSON body into the numeric snapshots defined in
//! [`platform_host::data_sources`]. They carry no retry or caching policy; widgets surface
//! failures inline.

use std::collections::BTreeMap;

use platform_host::{
    CurrencyRates, DataSourceFuture, RatesSource, WeatherSnapshot, WeatherSource,
    CURRENCY_BASE_CODE,
};
use serde::Deserialize;

/// Default latitude for the weather widget (Madrid).
pub const DEFAULT_WEATHER_LATITUDE: f64 = 40.4168;
/// Default longitude for the weather widget (Madrid).
pub const DEFAULT_WEATHER_LONGITUDE: f64 = -3.7038;

const OPEN_METEO_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
const RATES_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current_weather: OpenMeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    base: Option<String>,
    rates: BTreeMap<String, f64>,
}

/// Parses an Open-Meteo `current_weather` JSON body.
///
/// # Errors
///
/// Returns an error when the body does not carry a numeric temperature and weather code.
pub fn parse_open_meteo_response(raw: &str) -> Result<WeatherSnapshot, String> {
    let parsed: OpenMeteoResponse =
        serde_json::from_str(raw).map_err(|e| format!("malformed weather response: {e}"))?;
    if !parsed.current_weather.temperature.is_finite() {
        return Err("weather response temperature is not finite".to_string());
    }
    Ok(WeatherSnapshot {
        temperature_c: parsed.current_weather.temperature,
        weather_code: parsed.current_weather.weathercode,
    })
}

/// Parses an exchange-rate JSON body into a [`CurrencyRates`] table.
///
/// # Errors
///
/// Returns an error when the body is malformed or carries no usable rate.
pub fn parse_rates_response(raw: &str) -> Result<CurrencyRates, String> {
    let parsed: RatesResponse =
        serde_json::from_str(raw).map_err(|e| format!("malformed rates response: {e}"))?;
    let rates: BTreeMap<String, f64> = parsed
        .rates
        .into_iter()
        .filter(|(code, rate)| code.len() == 3 && rate.is_finite() && *rate > 0.0)
        .collect();
    if rates.is_empty() {
        return Err("rates response contained no usable rates".to_string());
    }
    Ok(CurrencyRates {
        base: parsed
            .base
            .unwrap_or_else(|| CURRENCY_BASE_CODE.to_string()),
        rates,
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {e:?}"))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "fetch resolved to a non-response value".to_string())?;
    if !response.ok() {
        return Err(format!("fetch returned status {}", response.status()));
    }
    let body = response
        .text()
        .map_err(|e| format!("response body unreadable: {e:?}"))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| format!("response body unreadable: {e:?}"))?;
    text.as_string()
        .ok_or_else(|| "response body was not text".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(url: &str) -> Result<String, String> {
    Err(format!("network fetch requires a browser host: {url}"))
}

#[derive(Debug, Clone, Copy)]
/// Weather source backed by the Open-Meteo forecast API.
pub struct FetchWeatherSource {
    latitude: f64,
    longitude: f64,
}

impl FetchWeatherSource {
    /// Creates a source for the given coordinates.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn url(&self) -> String {
        format!(
            "{OPEN_METEO_ENDPOINT}?latitude={}&longitude={}&current_weather=true",
            self.latitude, self.longitude
        )
    }
}

impl Default for FetchWeatherSource {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_LATITUDE, DEFAULT_WEATHER_LONGITUDE)
    }
}

impl WeatherSource for FetchWeatherSource {
    fn current_weather<'a>(&'a self) -> DataSourceFuture<'a, Result<WeatherSnapshot, String>> {
        let url = self.url();
        Box::pin(async move {
            let raw = fetch_text(&url).await?;
            parse_open_meteo_response(&raw)
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Rates source backed by the exchangerate-api `latest` endpoint, based on USD.
pub struct FetchRatesSource;

impl RatesSource for FetchRatesSource {
    fn latest_rates<'a>(&'a self) -> DataSourceFuture<'a, Result<CurrencyRates, String>> {
        Box::pin(async move {
            let raw = fetch_text(&format!("{RATES_ENDPOINT}/{CURRENCY_BASE_CODE}")).await?;
            parse_rates_response(&raw)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn open_meteo_body_reduces_to_snapshot() {
        let raw = r#"{
            "latitude": 40.4,
            "current_weather": {"temperature": 18.3, "windspeed": 7.2, "weathercode": 3}
        }"#;
        assert_eq!(
            parse_open_meteo_response(raw).expect("parse"),
            WeatherSnapshot {
                temperature_c: 18.3,
                weather_code: 3
            }
        );
    }

    #[test]
    fn open_meteo_body_without_current_weather_is_rejected() {
        assert!(parse_open_meteo_response(r#"{"hourly": {}}"#).is_err());
        assert!(parse_open_meteo_response("not json").is_err());
    }

    #[test]
    fn rates_body_drops_unusable_entries() {
        let raw = r#"{"base": "USD", "rates": {"USD": 1, "EUR": 0.92, "BAD": -1, "XAUX": 3}}"#;
        let rates = parse_rates_response(raw).expect("parse");
        assert_eq!(rates.base, "USD");
        assert_eq!(
            rates.rates.keys().cloned().collect::<Vec<_>>(),
            vec!["EUR".to_string(), "USD".to_string()]
        );
    }

    #[test]
    fn rates_body_without_rates_is_rejected() {
        assert!(parse_rates_response(r#"{"base": "USD", "rates": {}}"#).is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_fetch_sources_fail_without_browser() {
        use futures::executor::block_on;

        assert!(block_on(FetchWeatherSource::default().current_weather()).is_err());
        assert!(block_on(FetchRatesSource.latest_rates()).is_err());
    }
}
