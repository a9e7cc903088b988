// Turns per-frame input snapshots into pointer events and keyboard shortcuts.

use minifb::Key;

use crate::surface::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
}

/// Pointer events in window-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: Button, at: (f64, f64) },
    Move { at: (f64, f64) },
    Up { button: Button },
}

/// Remembers last frame's button state so level-triggered snapshots become edges.
#[derive(Debug, Default)]
pub struct PointerTracker {
    left: bool,
    right: bool,
    last: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn update(&mut self, input: &InputSnapshot) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let at = input.pointer.or(self.last);

        if let Some(at) = at {
            if input.left_down && !self.left {
                events.push(PointerEvent::Down { button: Button::Left, at });
            }
            if input.right_down && !self.right {
                events.push(PointerEvent::Down { button: Button::Right, at });
            }
            // Emit a move every frame while pressed: the window may have moved under a still pointer.
            if (input.left_down || input.right_down || Some(at) != self.last) && input.pointer.is_some() {
                events.push(PointerEvent::Move { at });
            }
        }
        if !input.left_down && self.left {
            events.push(PointerEvent::Up { button: Button::Left });
        }
        if !input.right_down && self.right {
            events.push(PointerEvent::Up { button: Button::Right });
        }

        self.left = input.left_down;
        self.right = input.right_down;
        if input.pointer.is_some() {
            self.last = input.pointer;
        }
        events
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Circle,
    Rounded,
    Rectangle,
    Custom,
    CycleSize,
    Grow,
    Shrink,
    Mirror,
    CycleBorder,
    ClickThrough,
    NextCamera,
    RetryCamera,
    ResetSize,
    Escape,
}

pub fn shortcut_for(key: Key) -> Option<Shortcut> {
    let shortcut = match key {
        Key::Key1 | Key::NumPad1 => Shortcut::Circle,
        Key::Key2 | Key::NumPad2 => Shortcut::Rounded,
        Key::Key3 | Key::NumPad3 => Shortcut::Rectangle,
        Key::Key4 | Key::NumPad4 => Shortcut::Custom,
        Key::S => Shortcut::CycleSize,
        Key::Equal | Key::NumPadPlus => Shortcut::Grow,
        Key::Minus | Key::NumPadMinus => Shortcut::Shrink,
        Key::M => Shortcut::Mirror,
        Key::B => Shortcut::CycleBorder,
        Key::T => Shortcut::ClickThrough,
        Key::N => Shortcut::NextCamera,
        Key::Enter | Key::NumPadEnter => Shortcut::RetryCamera,
        Key::R => Shortcut::ResetSize,
        Key::Escape => Shortcut::Escape,
        _ => return None,
    };
    Some(shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pointer: (f64, f64), left: bool) -> InputSnapshot {
        InputSnapshot { pointer: Some(pointer), left_down: left, ..InputSnapshot::default() }
    }

    #[test]
    fn press_move_release() {
        let mut t = PointerTracker::default();
        assert_eq!(t.update(&snap((5.0, 5.0), false)), vec![PointerEvent::Move { at: (5.0, 5.0) }]);
        assert_eq!(
            t.update(&snap((5.0, 5.0), true)),
            vec![
                PointerEvent::Down { button: Button::Left, at: (5.0, 5.0) },
                PointerEvent::Move { at: (5.0, 5.0) },
            ]
        );
        assert_eq!(t.update(&snap((5.0, 5.0), true)), vec![PointerEvent::Move { at: (5.0, 5.0) }]);
        assert_eq!(t.update(&snap((6.0, 5.0), false)), vec![
            PointerEvent::Move { at: (6.0, 5.0) },
            PointerEvent::Up { button: Button::Left },
        ]);
    }

    #[test]
    fn digits_pick_shapes() {
        assert_eq!(shortcut_for(Key::Key1), Some(Shortcut::Circle));
        assert_eq!(shortcut_for(Key::Key4), Some(Shortcut::Custom));
        assert_eq!(shortcut_for(Key::F12), None);
    }
}
