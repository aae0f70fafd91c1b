//! Reminder list, time validation, and due detection.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Decimal creation-time id, stored as a JSON string.
    pub id: String,
    pub text: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("el texto del recordatorio está vacío")]
    EmptyText,
    #[error("hora no válida `{0}` (usa HH:MM)")]
    InvalidTime(String),
}

/// Validates a `HH:MM` time in `00:00..=23:59`, returning it normalized.
pub fn parse_time(raw: &str) -> Result<String, ReminderError> {
    let raw = raw.trim();
    let invalid = || ReminderError::InvalidTime(raw.to_string());
    let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(format!("{hours:02}:{minutes:02}"))
}

/// Reminders ordered by time of day; ties keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderList {
    reminders: Vec<Reminder>,
}

impl ReminderList {
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.reminders
            .iter()
            .filter(|reminder| !reminder.completed)
            .count()
    }

    /// Returns an id not used by any stored reminder: `now_ms`, or one past the largest numeric id.
    pub fn next_id(&self, now_ms: u64) -> String {
        let floor = self
            .reminders
            .iter()
            .filter_map(|reminder| reminder.id.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let mut candidate = now_ms.max(floor);
        while self
            .reminders
            .iter()
            .any(|reminder| reminder.id == candidate.to_string())
        {
            candidate = candidate.saturating_add(1);
        }
        candidate.to_string()
    }

    /// Adds an incomplete reminder.
    ///
    /// # Errors
    ///
    /// Rejects blank text and times outside `HH:MM`.
    pub fn add(&mut self, id: String, text: &str, time: &str) -> Result<(), ReminderError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ReminderError::EmptyText);
        }
        let time = parse_time(time)?;
        let at = self
            .reminders
            .partition_point(|existing| existing.time <= time);
        self.reminders.insert(
            at,
            Reminder {
                id,
                text: text.to_string(),
                time,
                completed: false,
            },
        );
        Ok(())
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.reminders.iter_mut().find(|reminder| reminder.id == id) {
            Some(reminder) => {
                reminder.completed = !reminder.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|reminder| reminder.id != id);
        self.reminders.len() != before
    }
}

/// Local `HH:MM` for a unix millisecond timestamp at `offset_minutes` east of UTC.
pub fn local_hhmm(now_ms: u64, offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&offset).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Remembers which minute each reminder last fired in.
#[derive(Debug, Clone, Default)]
pub struct DueTracker {
    last_fired_minute: HashMap<String, u64>,
}

impl DueTracker {
    /// Returns incomplete reminders due at `now_hhmm` that have not fired during `minute`.
    ///
    /// `minute` is any value that changes once per minute, typically `unix_ms / 60_000`.
    pub fn take_due(&mut self, list: &ReminderList, now_hhmm: &str, minute: u64) -> Vec<Reminder> {
        self.last_fired_minute
            .retain(|id, _| list.reminders().iter().any(|reminder| &reminder.id == id));
        list.reminders()
            .iter()
            .filter(|reminder| !reminder.completed && reminder.time == now_hhmm)
            .filter(|reminder| {
                self.last_fired_minute.insert(reminder.id.clone(), minute) != Some(minute)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{load_slice_or_default, REMINDERS_STATE_KEY};
    use platform_host::{KeyValueStore, MemoryKeyValueStore};
    use pretty_assertions::assert_eq;

    use super::*;

    fn list_with(entries: &[(&str, &str, &str)]) -> ReminderList {
        let mut list = ReminderList::default();
        for (id, text, time) in entries {
            list.add(id.to_string(), text, time).expect("valid reminder");
        }
        list
    }

    #[test]
    fn time_validation_accepts_only_hh_mm() {
        assert_eq!(parse_time("07:05"), Ok("07:05".to_string()));
        assert_eq!(parse_time(" 23:59 "), Ok("23:59".to_string()));
        for bad in ["24:00", "12:60", "7:05", "0705", "ab:cd", "", "12:5"] {
            assert!(parse_time(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn add_rejects_blank_text_and_sorts_by_time() {
        let mut list = list_with(&[
            ("1", "comer", "13:00"),
            ("2", "café", "08:30"),
            ("3", "cena", "13:00"),
        ]);
        assert_eq!(list.add("4".to_string(), "   ", "10:00"), Err(ReminderError::EmptyText));
        assert_eq!(
            list.add("4".to_string(), "siesta", "25:00"),
            Err(ReminderError::InvalidTime("25:00".to_string()))
        );

        let ids: Vec<&str> = list
            .reminders()
            .iter()
            .map(|reminder| reminder.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn toggle_delete_and_pending_count() {
        let mut list = list_with(&[("1", "a", "09:00"), ("2", "b", "10:00")]);
        assert_eq!(list.pending_count(), 2);
        assert!(list.toggle("1"));
        assert_eq!(list.pending_count(), 1);
        assert!(!list.toggle("9"));
        assert!(list.delete("2"));
        assert!(!list.delete("2"));
        assert_eq!(list.pending_count(), 0);
    }

    #[test]
    fn due_reminders_fire_once_per_minute() {
        let mut list = list_with(&[("1", "llamar", "09:15"), ("2", "hecho", "09:15")]);
        list.toggle("2");
        let mut tracker = DueTracker::default();

        let due = tracker.take_due(&list, "09:15", 100);
        assert_eq!(due.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["1"]);
        assert!(tracker.take_due(&list, "09:15", 100).is_empty());
        assert!(tracker.take_due(&list, "09:16", 101).is_empty());
        // Same wall-clock time on a later day fires again.
        assert_eq!(tracker.take_due(&list, "09:15", 1_540).len(), 1);
    }

    #[test]
    fn stored_slice_with_string_ids_loads() {
        let store = MemoryKeyValueStore::default();
        store
            .save_raw(
                REMINDERS_STATE_KEY,
                r#"[{"id":"1700000000000","text":"regar","time":"18:00","completed":false}]"#,
            )
            .expect("seed");

        let mut list = load_slice_or_default::<ReminderList>(&store, REMINDERS_STATE_KEY);
        assert_eq!(list.pending_count(), 1);
        assert!(list.toggle("1700000000000"));
    }

    #[test]
    fn next_id_never_repeats_a_stored_id() {
        let list = list_with(&[("5000", "futuro", "10:00"), ("legacy", "otro", "11:00")]);
        assert_eq!(list.next_id(1_000), "5001");
        assert_eq!(list.next_id(9_000), "9000");
    }

    #[test]
    fn local_clock_applies_offset() {
        // 2024-03-05T23:30:00Z
        let ms = 1_709_681_400_000;
        assert_eq!(local_hhmm(ms, 0), "23:30");
        assert_eq!(local_hhmm(ms, 90), "01:00");
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let list = list_with(&[("5", "agua", "11:00")]);
        assert_eq!(
            serde_json::to_string(&list).expect("serialize"),
            r#"[{"id":"5","text":"agua","time":"11:00","completed":false}]"#
        );
    }
}
