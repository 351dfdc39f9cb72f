use crate::foundation::core::{Point, Rect, Vec2};

/// Input device that produced a pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen.
    Mouse,
    /// Touch contact.
    Touch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
/// Perspective rotation applied to the card viewport, in degrees.
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub rotate_x: f64,
    /// Rotation about the vertical axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// No rotation.
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// True when both rotations are zero.
    pub fn is_neutral(self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0
    }

    /// CSS transform value for the viewport element.
    pub fn css(self) -> String {
        if self.is_neutral() {
            return "none".to_string();
        }
        format!(
            "perspective(1000px) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Signed offset of `pointer` from the center of `viewport`, as a fraction of the half extents.
///
/// `±1` at the edges; not clamped, so a pointer outside the viewport exceeds that range.
pub fn pointer_offset(viewport: Rect, pointer: Point) -> Option<Vec2> {
    let hw = viewport.width() * 0.5;
    let hh = viewport.height() * 0.5;
    if !(hw > 0.0 && hh > 0.0) {
        return None;
    }
    let c = viewport.center();
    Some(Vec2::new((pointer.x - c.x) / hw, (pointer.y - c.y) / hh))
}

/// Tilt that leans the card toward the pointer, scaled by `max_deg`.
pub fn tilt_for_offset(offset: Vec2, max_deg: f64) -> Tilt {
    Tilt {
        rotate_x: -offset.y * max_deg,
        rotate_y: offset.x * max_deg,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/tilt.rs"]
mod tests;
