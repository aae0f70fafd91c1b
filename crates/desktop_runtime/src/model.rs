use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Height (px) kept free below the lowest allowed window origin.
pub const VIEWPORT_BOTTOM_RESERVE_PX: i32 = 100;
/// Size used when a widget kind has no registry entry.
pub const FALLBACK_WINDOW_SIZE: WindowSize = WindowSize {
    width: 400,
    height: 500,
};
/// Viewport assumed before the host reports one.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 800,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Widget content hosted by a window. Serialized as its storage tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "pomodoro")]
    Pomodoro,
    #[serde(rename = "clima")]
    Weather,
    #[serde(rename = "notas")]
    Notes,
    #[serde(rename = "recordatorios")]
    Reminders,
    #[serde(rename = "calculadora")]
    Calculator,
    #[serde(rename = "divisas")]
    Currency,
    #[serde(rename = "reloj")]
    Clock,
}

impl WidgetKind {
    pub const ALL: [Self; 7] = [
        Self::Pomodoro,
        Self::Weather,
        Self::Notes,
        Self::Reminders,
        Self::Calculator,
        Self::Currency,
        Self::Clock,
    ];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::Weather => "clima",
            Self::Notes => "notas",
            Self::Reminders => "recordatorios",
            Self::Calculator => "calculadora",
            Self::Currency => "divisas",
            Self::Clock => "reloj",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown widget type `{0}`")]
pub struct UnknownWidgetKind(pub String);

impl FromStr for WidgetKind {
    type Err = UnknownWidgetKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == raw)
            .ok_or_else(|| UnknownWidgetKind(raw.to_string()))
    }
}

/// Top-left window origin in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Vector from a window's origin to the pointer at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabOffset {
    pub dx: i32,
    pub dy: i32,
}

impl GrabOffset {
    pub fn between(origin: WindowPosition, pointer: PointerPosition) -> Self {
        Self {
            dx: pointer.x - origin.x,
            dy: pointer.y - origin.y,
        }
    }

    /// Window origin that keeps the grab point under `pointer`.
    pub fn origin_for(self, pointer: PointerPosition) -> WindowPosition {
        WindowPosition {
            x: pointer.x - self.dx,
            y: pointer.y - self.dy,
        }
    }
}

/// One open-or-minimized widget window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: WindowId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    pub is_open: bool,
    pub position: WindowPosition,
    pub size: WindowSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesktopTheme {
    #[default]
    Light,
    Dark,
}

impl DesktopTheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn css_id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn widget_kind_tags_round_trip_through_from_str_and_serde() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.tag().parse::<WidgetKind>(), Ok(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.tag()));
        }
        assert_eq!(
            "paint".parse::<WidgetKind>(),
            Err(UnknownWidgetKind("paint".to_string()))
        );
    }

    #[test]
    fn window_record_serializes_with_storage_field_names() {
        let record = WindowRecord {
            id: WindowId(1_700_000_000_000),
            kind: WidgetKind::Notes,
            title: "Notas".to_string(),
            is_open: false,
            position: WindowPosition { x: 120, y: 90 },
            size: WindowSize {
                width: 450,
                height: 600,
            },
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": 1_700_000_000_000u64,
                "type": "notas",
                "title": "Notas",
                "isOpen": false,
                "position": {"x": 120, "y": 90},
                "size": {"width": 450, "height": 600}
            })
        );
    }

    #[test]
    fn grab_offset_preserves_grab_point() {
        let offset = GrabOffset::between(
            WindowPosition { x: 250, y: 260 },
            PointerPosition { x: 300, y: 300 },
        );
        assert_eq!(offset, GrabOffset { dx: 50, dy: 40 });
        assert_eq!(
            offset.origin_for(PointerPosition { x: 320, y: 310 }),
            WindowPosition { x: 270, y: 270 }
        );
    }

    #[test]
    fn theme_serializes_lowercase_and_toggles() {
        assert_eq!(serde_json::to_value(DesktopTheme::Dark).unwrap(), json!("dark"));
        assert_eq!(DesktopTheme::Light.toggled(), DesktopTheme::Dark);
        assert_eq!(DesktopTheme::Dark.toggled().css_id(), "light");
    }
}
