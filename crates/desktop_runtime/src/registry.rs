//! Static widget registry: default geometry and launcher metadata per widget kind.

use crate::model::{WidgetKind, WindowSize, FALLBACK_WINDOW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub kind: WidgetKind,
    pub default_size: WindowSize,
    /// Launcher button glyph.
    pub glyph: &'static str,
}

const WIDGET_REGISTRY: [WidgetDescriptor; 7] = [
    WidgetDescriptor {
        kind: WidgetKind::Pomodoro,
        default_size: WindowSize {
            width: 350,
            height: 450,
        },
        glyph: "🍅",
    },
    WidgetDescriptor {
        kind: WidgetKind::Weather,
        default_size: WindowSize {
            width: 350,
            height: 400,
        },
        glyph: "☀",
    },
    WidgetDescriptor {
        kind: WidgetKind::Notes,
        default_size: WindowSize {
            width: 450,
            height: 600,
        },
        glyph: "📝",
    },
    WidgetDescriptor {
        kind: WidgetKind::Reminders,
        default_size: WindowSize {
            width: 400,
            height: 500,
        },
        glyph: "⏰",
    },
    WidgetDescriptor {
        kind: WidgetKind::Calculator,
        default_size: WindowSize {
            width: 320,
            height: 480,
        },
        glyph: "🧮",
    },
    WidgetDescriptor {
        kind: WidgetKind::Currency,
        default_size: WindowSize {
            width: 380,
            height: 420,
        },
        glyph: "💱",
    },
    WidgetDescriptor {
        kind: WidgetKind::Clock,
        default_size: WindowSize {
            width: 400,
            height: 450,
        },
        glyph: "🕐",
    },
];

/// Returns every registered widget in launcher order.
pub fn widget_registry() -> &'static [WidgetDescriptor] {
    &WIDGET_REGISTRY
}

pub fn widget_descriptor(kind: WidgetKind) -> Option<&'static WidgetDescriptor> {
    widget_registry().iter().find(|entry| entry.kind == kind)
}

/// Default window size for `kind`, or [`FALLBACK_WINDOW_SIZE`] when unregistered.
pub fn default_size(kind: WidgetKind) -> WindowSize {
    widget_descriptor(kind)
        .map(|entry| entry.default_size)
        .unwrap_or(FALLBACK_WINDOW_SIZE)
}

/// Display title: the kind tag with its first letter capitalized.
pub fn widget_title(kind: WidgetKind) -> String {
    capitalize_first(kind.tag())
}

fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_widget_kind_is_registered_once() {
        for kind in WidgetKind::ALL {
            let count = widget_registry()
                .iter()
                .filter(|entry| entry.kind == kind)
                .count();
            assert_eq!(count, 1, "{kind} registered {count} times");
        }
    }

    #[test]
    fn notes_default_geometry_and_title() {
        assert_eq!(
            default_size(WidgetKind::Notes),
            WindowSize {
                width: 450,
                height: 600
            }
        );
        assert_eq!(widget_title(WidgetKind::Notes), "Notas");
        assert_eq!(widget_title(WidgetKind::Reminders), "Recordatorios");
    }

    #[test]
    fn capitalize_handles_empty_and_multibyte_input() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("ñandú"), "Ñandú");
    }
}
