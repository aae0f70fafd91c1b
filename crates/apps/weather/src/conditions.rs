//! WMO weather-code interpretation and display state.

use platform_host::WeatherSnapshot;

/// Seconds between automatic refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    Loading,
    Ready(WeatherSnapshot),
    Failed(String),
}

impl WeatherView {
    pub fn from_result(result: Result<WeatherSnapshot, String>) -> Self {
        match result {
            Ok(snapshot) => Self::Ready(snapshot),
            Err(message) => Self::Failed(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub glyph: &'static str,
}

const fn condition(label: &'static str, glyph: &'static str) -> Condition {
    Condition { label, glyph }
}

/// Maps a WMO interpretation code to a Spanish label and glyph.
pub fn describe_weather_code(code: i32) -> Condition {
    match code {
        0 => condition("Despejado", "☀️"),
        1 => condition("Mayormente despejado", "🌤️"),
        2 => condition("Parcialmente nublado", "⛅"),
        3 => condition("Nublado", "☁️"),
        45 | 48 => condition("Niebla", "🌫️"),
        51 | 53 | 55 => condition("Llovizna", "🌦️"),
        56 | 57 => condition("Llovizna helada", "🌧️"),
        61 | 63 | 65 => condition("Lluvia", "🌧️"),
        66 | 67 => condition("Lluvia helada", "🌧️"),
        71 | 73 | 75 => condition("Nieve", "❄️"),
        77 => condition("Granos de nieve", "🌨️"),
        80..=82 => condition("Chubascos", "🌦️"),
        85 | 86 => condition("Chubascos de nieve", "🌨️"),
        95 => condition("Tormenta", "⛈️"),
        96 | 99 => condition("Tormenta con granizo", "⛈️"),
        _ => condition("Desconocido", "❓"),
    }
}

/// Temperature rounded to one decimal, e.g. `18.3°C`.
pub fn temperature_label(celsius: f64) -> String {
    let rounded = (celsius * 10.0).round() / 10.0;
    // Avoid rendering `-0.0`.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.1}°C")
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{FixedWeatherSource, UnavailableDataSource, WeatherSource};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_codes_have_spanish_labels() {
        assert_eq!(describe_weather_code(0).label, "Despejado");
        assert_eq!(describe_weather_code(63).label, "Lluvia");
        assert_eq!(describe_weather_code(81).label, "Chubascos");
        assert_eq!(describe_weather_code(99).label, "Tormenta con granizo");
        assert_eq!(describe_weather_code(-4).label, "Desconocido");
    }

    #[test]
    fn temperatures_round_to_one_decimal() {
        assert_eq!(temperature_label(18.34), "18.3°C");
        assert_eq!(temperature_label(-2.06), "-2.1°C");
        assert_eq!(temperature_label(-0.04), "0.0°C");
    }

    #[test]
    fn source_results_map_to_views() {
        let snapshot = WeatherSnapshot {
            temperature_c: 21.0,
            weather_code: 2,
        };
        let ready = block_on(FixedWeatherSource(snapshot).current_weather());
        assert_eq!(WeatherView::from_result(ready), WeatherView::Ready(snapshot));

        let failed = block_on(UnavailableDataSource.current_weather());
        assert!(matches!(WeatherView::from_result(failed), WeatherView::Failed(_)));
    }
}
