//! Widget desktop runtime: window manager, widget registry, drag interaction, persistence, and the
//! Leptos shell components that render them.

pub mod apps;
pub mod components;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod registry;
pub mod runtime_context;
pub mod window_manager;

pub use components::{current_viewport, DesktopShell};
pub use interaction::{apply_pointer_move, DragState};
pub use model::*;
pub use persistence::{load_theme, load_windows, save_theme, save_windows, PersistenceError};
pub use registry::{default_size, widget_descriptor, widget_registry, widget_title, WidgetDescriptor};
pub use runtime_context::DesktopRuntime;
pub use window_manager::{clamp_position, WindowManager};
