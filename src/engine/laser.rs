//! Laser-pointer indicator state.

use crate::util::Point;

/// Position and visibility of the laser dot.
///
/// The dot is only shown while the pointer tool's button is held; it never
/// touches the surface or the history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaserPointer {
    position: Point,
    active: bool,
}

impl LaserPointer {
    /// Shows the dot at `position`.
    pub fn show(&mut self, position: Point) {
        self.position = position;
        self.active = true;
    }

    /// Moves the dot; visibility is unchanged.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Hides the dot. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Position if the dot is currently visible.
    pub fn visible_at(&self) -> Option<Point> {
        self.active.then_some(self.position)
    }
}
