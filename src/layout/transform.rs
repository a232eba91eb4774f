//! Axis-aligned frame changes shared by players and pitch graphics.

use crate::model::FieldCoordinate;

use super::PlacedPlayer;

/// Reflects across the vertical centre line of a `width`-wide canvas.
pub fn mirror_horizontal(coord: FieldCoordinate, width: f64) -> FieldCoordinate {
    FieldCoordinate::new(width - coord.x, coord.y)
}

/// Rotates a point of a `original_width` x `original_height` frame by 90°
/// counter-clockwise. The rotated frame is `original_height` wide and
/// `original_width` tall.
pub fn rotate_90_ccw(coord: FieldCoordinate, original_width: f64, _original_height: f64) -> FieldCoordinate {
    FieldCoordinate::new(coord.y, original_width - coord.x)
}

/// Exact inverse of [`rotate_90_ccw`].
pub fn unrotate_90_ccw(coord: FieldCoordinate, original_width: f64, _original_height: f64) -> FieldCoordinate {
    FieldCoordinate::new(original_width - coord.y, coord.x)
}

pub fn mirror_players(players: &mut [PlacedPlayer], width: f64) {
    for placed in players {
        placed.coordinate = mirror_horizontal(placed.coordinate, width);
    }
}

pub fn rotate_players(players: &mut [PlacedPlayer], original_width: f64, original_height: f64) {
    for placed in players {
        placed.coordinate = rotate_90_ccw(placed.coordinate, original_width, original_height);
    }
}

pub fn translate_players(players: &mut [PlacedPlayer], dx: f64, dy: f64) {
    for placed in players {
        placed.coordinate = placed.coordinate.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rotation_maps_frame_corners() {
        // top-left of an 800x600 frame lands bottom-left of the 600x800 one
        let p = rotate_90_ccw(FieldCoordinate::new(0.0, 0.0), 800.0, 600.0);
        assert_eq!(p, FieldCoordinate::new(0.0, 800.0));
        let q = rotate_90_ccw(FieldCoordinate::new(800.0, 600.0), 800.0, 600.0);
        assert_eq!(q, FieldCoordinate::new(600.0, 0.0));
    }

    #[test]
    fn test_mirror_centre_is_fixed() {
        let c = FieldCoordinate::new(400.0, 123.0);
        assert_eq!(mirror_horizontal(c, 800.0), c);
    }

    proptest! {
        #[test]
        fn prop_unrotate_inverts_rotate(
            x in -2000.0f64..2000.0,
            y in -2000.0f64..2000.0,
            w in 1.0f64..4000.0,
            h in 1.0f64..4000.0,
        ) {
            let c = FieldCoordinate::new(x, y);
            let back = unrotate_90_ccw(rotate_90_ccw(c, w, h), w, h);
            prop_assert!((back.x - c.x).abs() < 1e-9);
            prop_assert!((back.y - c.y).abs() < 1e-9);
        }

        #[test]
        fn prop_mirror_is_involution(
            x in -2000.0f64..2000.0,
            y in -2000.0f64..2000.0,
            w in 1.0f64..4000.0,
        ) {
            let c = FieldCoordinate::new(x, y);
            let back = mirror_horizontal(mirror_horizontal(c, w), w);
            prop_assert!((back.x - c.x).abs() < 1e-9);
            prop_assert_eq!(back.y, c.y);
        }
    }
}
