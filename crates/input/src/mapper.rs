use glam::Vec3;
use lifegrid_common::CellCoord;

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Paints cells alive.
    Left,
    /// Paints cells dead.
    Right,
}

/// A device event observed during one input-poll frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(Key),
    ButtonPressed(Button),
    ButtonReleased(Button),
}

/// Map a hit position on the cell plane to a cell.
///
/// The cell plane lies on x/z; both are rounded to the nearest integer with
/// ties to even. A hit near a boundary may land on the neighbouring cell.
/// Returns `None` for a non-finite hit.
pub fn cell_at(hit: Vec3) -> Option<CellCoord> {
    if !hit.x.is_finite() || !hit.z.is_finite() {
        return None;
    }
    Some(CellCoord::new(
        hit.x.round_ties_even() as i32,
        hit.z.round_ties_even() as i32,
    ))
}

/// Per-frame translation of device events into actions, with drag state.
///
/// Space toggles the simulation. Pressing a button selects the brush (left
/// alive, right dead) and starts a drag; every frame while dragging paints
/// the hovered cell. Releasing either button ends the drag.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    dragging: bool,
    paint_alive: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process one frame. `hover` is the point under the pointer on the cell
    /// plane, if the pointer hits it.
    pub fn frame(&mut self, events: &[InputEvent], hover: Option<Vec3>) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut pressed = false;

        for event in events {
            match *event {
                InputEvent::KeyPressed(Key::Space) => actions.push(Action::ToggleRunning),
                InputEvent::KeyPressed(Key::Other) => {}
                InputEvent::ButtonPressed(button) => {
                    self.dragging = true;
                    self.paint_alive = button == Button::Left;
                    pressed = true;
                }
                InputEvent::ButtonReleased(_) => self.dragging = false,
            }
        }

        if self.dragging || pressed {
            if let Some(cell) = hover.and_then(cell_at) {
                actions.push(Action::Paint {
                    cell,
                    alive: self.paint_alive,
                });
            }
        }
        actions
    }
}
