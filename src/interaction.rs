//! Pointer gesture state machine: idle, dragging the window, or resizing from
//! one of eight edges. Pointer positions fed in here are *screen* coordinates
//! so that moving the window under the pointer does not disturb the deltas.

use crate::geometry::{Bounds, Geometry};
use crate::types::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Edge {
    pub fn touches_left(self) -> bool {
        matches!(self, Edge::W | Edge::NW | Edge::SW)
    }

    pub fn touches_right(self) -> bool {
        matches!(self, Edge::E | Edge::NE | Edge::SE)
    }

    pub fn touches_top(self) -> bool {
        matches!(self, Edge::N | Edge::NE | Edge::NW)
    }

    pub fn touches_bottom(self) -> bool {
        matches!(self, Edge::S | Edge::SE | Edge::SW)
    }

    /// Which edge (if any) a window-local point is near. Corners win over edges.
    pub fn hit(x: f64, y: f64, rect: &Rect, threshold: f64) -> Option<Edge> {
        // Ignore points well outside the box (in the padding beyond the threshold).
        if x < rect.x - threshold
            || x > rect.right() + threshold
            || y < rect.y - threshold
            || y > rect.bottom() + threshold
        {
            return None;
        }
        let left = (x - rect.x).abs() <= threshold;
        let right = (x - rect.right()).abs() <= threshold;
        let top = (y - rect.y).abs() <= threshold;
        let bottom = (y - rect.bottom()).abs() <= threshold;

        match (top, bottom, left, right) {
            (true, _, true, _) => Some(Edge::NW),
            (true, _, _, true) => Some(Edge::NE),
            (_, true, true, _) => Some(Edge::SW),
            (_, true, _, true) => Some(Edge::SE),
            (true, _, _, _) => Some(Edge::N),
            (_, true, _, _) => Some(Edge::S),
            (_, _, true, _) => Some(Edge::W),
            (_, _, _, true) => Some(Edge::E),
            _ => None,
        }
    }
}

/// What a pointer move asks the outside world to do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Step {
    /// New bubble geometry (only while resizing).
    pub geometry: Option<Geometry>,
    /// Incremental window move in whole pixels.
    pub move_by: Option<(i32, i32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        last: (f64, f64),
    },
    Resizing {
        edge: Edge,
        origin: (f64, f64),
        start: Geometry,
        /// Window offset already sent since the gesture began.
        applied: (i32, i32),
    },
}

impl Interaction {
    /// Start a gesture. `local` picks the edge, `screen` anchors the deltas.
    pub fn begin(
        local: (f64, f64),
        screen: (f64, f64),
        bubble: &Rect,
        geometry: Geometry,
        threshold: f64,
        allow_resize: bool,
    ) -> Self {
        let edge = if allow_resize { Edge::hit(local.0, local.1, bubble, threshold) } else { None };
        match edge {
            Some(edge) => Interaction::Resizing { edge, origin: screen, start: geometry, applied: (0, 0) },
            None => Interaction::Dragging { last: screen },
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn pointer_move(&mut self, screen: (f64, f64), bounds: &Bounds) -> Step {
        match self {
            Interaction::Idle => Step::default(),
            Interaction::Dragging { last } => {
                let dx = (screen.0 - last.0).round() as i32;
                let dy = (screen.1 - last.1).round() as i32;
                if dx == 0 && dy == 0 {
                    return Step::default();
                }
                // Advance by what was actually sent so rounding never accumulates.
                last.0 += dx as f64;
                last.1 += dy as f64;
                Step { geometry: None, move_by: Some((dx, dy)) }
            }
            Interaction::Resizing { edge, origin, start, applied } => {
                let dx = screen.0 - origin.0;
                let dy = screen.1 - origin.1;

                let mut width = start.width as f64;
                let mut height = start.height as f64;
                if edge.touches_right() {
                    width += dx;
                } else if edge.touches_left() {
                    width -= dx;
                }
                if edge.touches_bottom() {
                    height += dy;
                } else if edge.touches_top() {
                    height -= dy;
                }
                let next = start.set(width, height, bounds);

                // Shift the window by however much the anchored side actually moved.
                let target_x = if edge.touches_left() { start.width as i32 - next.width as i32 } else { 0 };
                let target_y = if edge.touches_top() { start.height as i32 - next.height as i32 } else { 0 };
                let delta = (target_x - applied.0, target_y - applied.1);
                *applied = (target_x, target_y);

                Step {
                    geometry: Some(next),
                    move_by: (delta != (0, 0)).then_some(delta),
                }
            }
        }
    }

    pub fn pointer_up(&mut self) {
        *self = Interaction::Idle;
    }
}
