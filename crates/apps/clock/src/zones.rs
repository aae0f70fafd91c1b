//! World clock readings for fixed UTC offsets.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    /// Standard-time offset east of UTC, in minutes. Daylight saving is not applied.
    pub utc_offset_minutes: i32,
}

const fn city(name: &'static str, utc_offset_minutes: i32) -> City {
    City {
        name,
        utc_offset_minutes,
    }
}

pub const WORLD_CITIES: [City; 8] = [
    city("Madrid", 60),
    city("Londres", 0),
    city("Nueva York", -300),
    city("Ciudad de México", -360),
    city("Buenos Aires", -180),
    city("Dubái", 240),
    city("Tokio", 540),
    city("Sídney", 600),
];

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// `HH:MM:SS`
    pub time: String,
    /// e.g. `martes, 5 de marzo de 2024`
    pub date: String,
}

pub fn read_clock(now_ms: u64, offset_minutes: i32) -> ClockReading {
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    let Some(local) = i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&offset))
    else {
        return ClockReading {
            time: "--:--:--".to_string(),
            date: String::new(),
        };
    };
    ClockReading {
        time: local.format("%H:%M:%S").to_string(),
        date: format!(
            "{}, {} de {} de {}",
            WEEKDAYS[local.weekday().num_days_from_monday() as usize],
            local.day(),
            MONTHS[local.month0() as usize],
            local.year()
        ),
    }
}

/// Signed offset label such as `UTC+5:30` or `UTC−3`.
pub fn offset_label(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '−' } else { '+' };
    let hours = offset_minutes.abs() / 60;
    let minutes = offset_minutes.abs() % 60;
    if minutes == 0 {
        format!("UTC{sign}{hours}")
    } else {
        format!("UTC{sign}{hours}:{minutes:02}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // 2024-03-05T23:30:15Z, a Tuesday.
    const SAMPLE_MS: u64 = 1_709_681_415_000;

    #[test]
    fn reading_formats_time_and_spanish_date() {
        assert_eq!(
            read_clock(SAMPLE_MS, 0),
            ClockReading {
                time: "23:30:15".to_string(),
                date: "martes, 5 de marzo de 2024".to_string(),
            }
        );
    }

    #[test]
    fn offsets_can_cross_midnight() {
        let tokyo = read_clock(SAMPLE_MS, 540);
        assert_eq!(tokyo.time, "08:30:15");
        assert_eq!(tokyo.date, "miércoles, 6 de marzo de 2024");

        let new_york = read_clock(SAMPLE_MS, -300);
        assert_eq!(new_york.time, "18:30:15");
    }

    #[test]
    fn offset_labels() {
        assert_eq!(offset_label(0), "UTC+0");
        assert_eq!(offset_label(-180), "UTC−3");
        assert_eq!(offset_label(330), "UTC+5:30");
    }

    #[test]
    fn city_names_are_unique() {
        let mut names: Vec<&str> = WORLD_CITIES.iter().map(|city| city.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), WORLD_CITIES.len());
    }
}
