//! Single-pointer drag state machine for window headers.
//!
//! The machine only tracks which window is being dragged and where it was grabbed. It produces
//! unclamped origins; [`WindowManager::move_window`] owns clamping and persistence.

use crate::{
    model::{GrabOffset, PointerPosition, WindowId, WindowPosition},
    window_manager::WindowManager,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        window_id: WindowId,
        grab_offset: GrabOffset,
    },
}

impl DragState {
    /// Starts dragging `window_id` grabbed at `pointer`.
    ///
    /// Returns `false` and leaves the state untouched when a drag is already in progress.
    pub fn begin(
        &mut self,
        window_id: WindowId,
        window_position: WindowPosition,
        pointer: PointerPosition,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = Self::Dragging {
            window_id,
            grab_offset: GrabOffset::between(window_position, pointer),
        };
        true
    }

    /// Origin the dragged window should move to for `pointer`, or `None` when idle.
    pub fn pointer_moved(&self, pointer: PointerPosition) -> Option<(WindowId, WindowPosition)> {
        match *self {
            Self::Idle => None,
            Self::Dragging {
                window_id,
                grab_offset,
            } => Some((window_id, grab_offset.origin_for(pointer))),
        }
    }

    /// Returns to idle, yielding the window that was being dragged.
    pub fn end(&mut self) -> Option<WindowId> {
        let released = self.dragging_window();
        *self = Self::Idle;
        released
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn dragging_window(&self) -> Option<WindowId> {
        match *self {
            Self::Idle => None,
            Self::Dragging { window_id, .. } => Some(window_id),
        }
    }
}

/// Feeds a pointer move through `drag` into `manager`.
///
/// Returns `true` when a window was moved.
pub fn apply_pointer_move(
    manager: &mut WindowManager,
    drag: &DragState,
    pointer: PointerPosition,
) -> bool {
    drag.pointer_moved(pointer)
        .is_some_and(|(window_id, origin)| manager.move_window(window_id, origin))
}
