//! Notes list: newest first, persisted as a whole under one key.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Decimal creation-time id, stored as a JSON string.
    pub id: String,
    pub content: String,
    /// Creation time, unix milliseconds.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns an id not used by any stored note: `now_ms`, or one past the largest numeric id.
    pub fn next_id(&self, now_ms: u64) -> String {
        let floor = self
            .notes
            .iter()
            .filter_map(|note| note.id.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let mut candidate = now_ms.max(floor);
        while self.notes.iter().any(|note| note.id == candidate.to_string()) {
            candidate = candidate.saturating_add(1);
        }
        candidate.to_string()
    }

    /// Prepends a note with trimmed `content`. Blank content is rejected.
    pub fn add(&mut self, id: String, content: &str, timestamp: u64) -> bool {
        let content = content.trim();
        if content.is_empty() {
            return false;
        }
        self.notes.insert(
            0,
            Note {
                id,
                content: content.to_string(),
                timestamp,
            },
        );
        true
    }

    /// Replaces the content of `id`, keeping its position and timestamp.
    ///
    /// Returns `false` for unknown ids and blank content.
    pub fn update(&mut self, id: &str, content: &str) -> bool {
        let content = content.trim();
        if content.is_empty() {
            return false;
        }
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) if note.content != content => {
                note.content = content.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        self.notes.len() != before
    }
}

/// Formats a unix millisecond timestamp as `dd/mm/yyyy HH:MM` at `offset_minutes` east of UTC.
pub fn format_timestamp(timestamp_ms: u64, offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .unwrap_or_else(|| Utc.fix());
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&offset).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}
