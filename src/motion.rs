use crate::deck::DismissAction;
use crate::gesture::SwipeThresholds;
use serde::{Deserialize, Serialize};

const DRAG_ROTATION_FACTOR: f64 = 0.08;
const EXIT_LIFT: f64 = -40.0;
const EXIT_ROTATION: f64 = 18.0;
const MIN_EXIT_X: f64 = 420.0;
const MIN_EXIT_Y: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTiming {
    pub exit_ms: u32,
    pub snap_back_ms: u32,
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self {
            exit_ms: 260,
            snap_back_ms: 180,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
}

impl Transform {
    fn css(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) rotate({:.2}deg)",
            self.x, self.y, self.rotate
        )
    }
}

/// Where the front card flies to. Distances grow with the viewport so the card always
/// leaves the screen.
pub fn exit_transform(action: DismissAction, viewport: Viewport) -> Transform {
    let x_distance = (viewport.width * 0.85).max(MIN_EXIT_X);
    let y_distance = (viewport.height * 0.8).max(MIN_EXIT_Y);

    match action {
        DismissAction::Like => Transform {
            x: x_distance,
            y: EXIT_LIFT,
            rotate: EXIT_ROTATION,
        },
        DismissAction::Nope => Transform {
            x: -x_distance,
            y: EXIT_LIFT,
            rotate: -EXIT_ROTATION,
        },
        DismissAction::SuperLike => Transform {
            x: 0.0,
            y: -y_distance,
            rotate: 0.0,
        },
    }
}

pub fn drag_transform(dx: f64, dy: f64) -> Transform {
    Transform {
        x: dx,
        y: dy,
        rotate: dx * DRAG_ROTATION_FACTOR,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum CardMotion {
    #[default]
    Rest,
    Dragging(Transform),
    Exiting(Transform),
}

impl CardMotion {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Inline style for the front card.
    pub fn style(&self, timing: &MotionTiming) -> String {
        match self {
            Self::Rest => format!(
                "transform: translateY(0) scale(1); transition: transform {}ms ease; touch-action: none;",
                timing.snap_back_ms
            ),
            Self::Dragging(transform) => format!(
                "transform: {}; transition: none; touch-action: none;",
                transform.css()
            ),
            Self::Exiting(transform) => format!(
                "transform: {}; transition: transform {ms}ms ease, opacity {ms}ms ease; opacity: 0; touch-action: none;",
                transform.css(),
                ms = timing.exit_ms
            ),
        }
    }
}

/// Which stamp to show while dragging and how strongly, in `[0, 1]`.
pub fn swipe_hint(dx: f64, dy: f64, thresholds: &SwipeThresholds) -> Option<(DismissAction, f64)> {
    let horizontal = (dx / thresholds.horizontal).clamp(-1.0, 1.0);
    let upward = (-dy / thresholds.upward).clamp(0.0, 1.0);

    let (action, strength) = if upward > horizontal.abs() {
        (DismissAction::SuperLike, upward)
    } else if horizontal < 0.0 {
        (DismissAction::Nope, -horizontal)
    } else {
        (DismissAction::Like, horizontal)
    };

    if strength < 0.01 {
        None
    } else {
        Some((action, strength))
    }
}
