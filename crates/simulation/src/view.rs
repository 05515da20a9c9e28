use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Current city view orientation. The discriminant is the compass value
/// used by sprite rotation arithmetic (0, 2, 4, 6).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewOrientation {
    #[default]
    TopRight = 0,
    BottomRight = 2,
    BottomLeft = 4,
    TopLeft = 6,
}

impl ViewOrientation {
    pub fn value(self) -> i32 {
        self as i32
    }

    /// Cell of an N×N footprint (dx, dy) that carries the draw marker.
    pub fn draw_corner(self, size: i32) -> (i32, i32) {
        let last = size - 1;
        match self {
            ViewOrientation::TopRight => (0, last),
            ViewOrientation::BottomRight => (0, 0),
            ViewOrientation::BottomLeft => (last, 0),
            ViewOrientation::TopLeft => (last, last),
        }
    }

    /// Rotates the view a quarter turn clockwise.
    pub fn rotated_clockwise(self) -> Self {
        match self {
            ViewOrientation::TopRight => ViewOrientation::BottomRight,
            ViewOrientation::BottomRight => ViewOrientation::BottomLeft,
            ViewOrientation::BottomLeft => ViewOrientation::TopLeft,
            ViewOrientation::TopLeft => ViewOrientation::TopRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_compass() {
        assert_eq!(ViewOrientation::TopRight.value(), 0);
        assert_eq!(ViewOrientation::BottomRight.value(), 2);
        assert_eq!(ViewOrientation::BottomLeft.value(), 4);
        assert_eq!(ViewOrientation::TopLeft.value(), 6);
    }

    #[test]
    fn test_full_rotation_returns_home() {
        let mut view = ViewOrientation::TopLeft;
        for _ in 0..4 {
            view = view.rotated_clockwise();
        }
        assert_eq!(view, ViewOrientation::TopLeft);
    }

    #[test]
    fn test_draw_corner_of_single_tile_is_origin() {
        for view in [
            ViewOrientation::TopRight,
            ViewOrientation::BottomRight,
            ViewOrientation::BottomLeft,
            ViewOrientation::TopLeft,
        ] {
            assert_eq!(view.draw_corner(1), (0, 0));
        }
        assert_eq!(ViewOrientation::TopRight.draw_corner(3), (0, 2));
    }
}
