use crate::deck::DismissAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Maps `PointerEvent.pointerType`. Unknown kinds are treated like a mouse.
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeThresholds {
    pub horizontal: f64,
    /// Distance above the origin, stored as a positive number.
    pub upward: f64,
    pub tap_tolerance: f64,
    pub double_tap_ms: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            horizontal: 110.0,
            upward: 120.0,
            tap_tolerance: 12.0,
            double_tap_ms: 320.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub pointer_id: i32,
    pub kind: PointerKind,
    pub start_x: f64,
    pub start_y: f64,
    pub dx: f64,
    pub dy: f64,
    /// Id of the profile that was the front card at pointer-down.
    pub card_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Dismiss(DismissAction),
    /// Second qualifying tap inside the double-tap window.
    DoubleTap,
    /// First qualifying tap; its timestamp opens the window.
    Tap,
    SnapBack,
}

/// Classifies the end of a drag. `since_last_tap` is the time in milliseconds since the
/// previous qualifying tap, if one is remembered.
pub fn classify_release(
    dx: f64,
    dy: f64,
    kind: PointerKind,
    since_last_tap: Option<f64>,
    thresholds: &SwipeThresholds,
) -> Release {
    if dy < -thresholds.upward && dx.abs() < thresholds.horizontal {
        return Release::Dismiss(DismissAction::SuperLike);
    }
    if dx > thresholds.horizontal {
        return Release::Dismiss(DismissAction::Like);
    }
    if dx < -thresholds.horizontal {
        return Release::Dismiss(DismissAction::Nope);
    }

    let is_tap = dx.abs() < thresholds.tap_tolerance && dy.abs() < thresholds.tap_tolerance;
    if is_tap && kind == PointerKind::Touch {
        return match since_last_tap {
            Some(elapsed) if elapsed < thresholds.double_tap_ms => Release::DoubleTap,
            _ => Release::Tap,
        };
    }

    Release::SnapBack
}

/// Tracks at most one active pointer plus the last qualifying tap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureTracker {
    drag: Option<DragState>,
    last_tap_at: Option<f64>,
    thresholds: SwipeThresholds,
}

impl GestureTracker {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            drag: None,
            last_tap_at: None,
            thresholds,
        }
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn last_tap_at(&self) -> Option<f64> {
        self.last_tap_at
    }

    pub fn thresholds(&self) -> &SwipeThresholds {
        &self.thresholds
    }

    /// Starts tracking `sample`. Rejected while another pointer is active.
    pub fn begin(&mut self, sample: PointerSample, card_id: &str) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragState {
            pointer_id: sample.pointer_id,
            kind: sample.kind,
            start_x: sample.x,
            start_y: sample.y,
            dx: 0.0,
            dy: 0.0,
            card_id: card_id.to_string(),
        });
        true
    }

    /// Returns the updated delta, or `None` for an untracked pointer.
    pub fn update(&mut self, pointer_id: i32, x: f64, y: f64) -> Option<(f64, f64)> {
        let drag = self.drag.as_mut()?;
        if drag.pointer_id != pointer_id {
            return None;
        }
        drag.dx = x - drag.start_x;
        drag.dy = y - drag.start_y;
        Some((drag.dx, drag.dy))
    }

    /// Ends the gesture for `pointer_id` and classifies it, updating the tap memory.
    pub fn release(&mut self, pointer_id: i32, timestamp: f64) -> Option<(DragState, Release)> {
        let drag = self.take(pointer_id)?;
        let since_last_tap = self.last_tap_at.map(|at| timestamp - at);
        let release = classify_release(
            drag.dx,
            drag.dy,
            drag.kind,
            since_last_tap,
            &self.thresholds,
        );

        match release {
            Release::DoubleTap => self.last_tap_at = None,
            Release::Tap => self.last_tap_at = Some(timestamp),
            Release::Dismiss(_) | Release::SnapBack => {}
        }

        Some((drag, release))
    }

    pub fn cancel(&mut self, pointer_id: i32) -> Option<DragState> {
        self.take(pointer_id)
    }

    /// Drops the active drag but keeps the tap memory.
    pub fn abandon(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    pub fn clear(&mut self) {
        self.drag = None;
        self.last_tap_at = None;
    }

    fn take(&mut self, pointer_id: i32) -> Option<DragState> {
        if self.drag.as_ref().map(|drag| drag.pointer_id) == Some(pointer_id) {
            self.drag.take()
        } else {
            None
        }
    }
}
