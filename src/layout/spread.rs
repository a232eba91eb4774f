//! Spreads several players that share one position category around the
//! category's base point.

use crate::model::{FieldCoordinate, PositionCategory};

use super::LayoutMode;

/// Base separation between clustered markers.
pub const BASE_OFFSET_DISTANCE: f64 = 35.0;

/// Extra room for name labels once a slot holds more than one player.
pub const CLUSTER_LABEL_MULTIPLIER: f64 = 1.5;

/// Effective separation. Pair, triangle and grid spacing are all derived from
/// it, so they stay clear of each other when it changes.
pub const OFFSET_DISTANCE: f64 = BASE_OFFSET_DISTANCE * CLUSTER_LABEL_MULTIPLIER;

const PAIR_DIVISOR: f64 = 1.5;
const GRID_DIVISOR: f64 = 1.2;

/// Offset of the `index`-th of `total` players from the shared base point.
pub fn spread_offset(
    index: usize,
    total: usize,
    category: PositionCategory,
    mode: LayoutMode,
) -> (f64, f64) {
    debug_assert!(index < total, "spread index {index} out of range for {total}");

    match total {
        0 | 1 => (0.0, 0.0),
        2 => {
            let offset = if index == 0 {
                -OFFSET_DISTANCE / PAIR_DIVISOR
            } else {
                OFFSET_DISTANCE / PAIR_DIVISOR
            };
            // Split pitch panels are rotated, so a vertical spread here would
            // push the marker toward the panel edge.
            if mode != LayoutMode::SplitPitch && category.is_central() {
                (0.0, offset)
            } else {
                (offset, 0.0)
            }
        }
        3 => match index {
            0 => (0.0, 0.0),
            1 => (OFFSET_DISTANCE / 3.0, -OFFSET_DISTANCE * 2.0),
            _ => (OFFSET_DISTANCE / 3.0, OFFSET_DISTANCE * 2.0),
        },
        _ => {
            let cols = (total as f64).sqrt().ceil() as usize;
            let rows = total.div_ceil(cols);
            let col = index % cols;
            let row = index / cols;
            let spacing = OFFSET_DISTANCE / GRID_DIVISOR;
            let x = (col as f64 - (cols as f64 - 1.0) / 2.0) * spacing;
            let y = (row as f64 - (rows as f64 - 1.0) / 2.0) * spacing;
            (x, y)
        }
    }
}

pub fn spread(
    base: FieldCoordinate,
    index: usize,
    total: usize,
    category: PositionCategory,
    mode: LayoutMode,
) -> FieldCoordinate {
    let (dx, dy) = spread_offset(index, total, category, mode);
    base.translate(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: FieldCoordinate = FieldCoordinate::new(400.0, 300.0);

    #[test]
    fn test_single_player_not_moved() {
        let p = spread(BASE, 0, 1, PositionCategory::LeftBack, LayoutMode::FullPitch);
        assert_eq!(p, BASE);
    }

    #[test]
    fn test_central_pair_spreads_vertically() {
        let a = spread(BASE, 0, 2, PositionCategory::CenterBack, LayoutMode::FullPitch);
        let b = spread(BASE, 1, 2, PositionCategory::CenterBack, LayoutMode::FullPitch);
        assert_eq!(a, FieldCoordinate::new(400.0, 265.0));
        assert_eq!(b, FieldCoordinate::new(400.0, 335.0));
    }

    #[test]
    fn test_wide_pair_spreads_horizontally() {
        let a = spread(BASE, 0, 2, PositionCategory::LeftWinger, LayoutMode::HalfPitch);
        let b = spread(BASE, 1, 2, PositionCategory::LeftWinger, LayoutMode::HalfPitch);
        assert_eq!(a, FieldCoordinate::new(365.0, 300.0));
        assert_eq!(b, FieldCoordinate::new(435.0, 300.0));
    }

    #[test]
    fn test_split_pitch_pair_always_horizontal() {
        let a = spread(BASE, 0, 2, PositionCategory::CenterMidfielder, LayoutMode::SplitPitch);
        assert_eq!(a, FieldCoordinate::new(365.0, 300.0));
    }

    #[test]
    fn test_triangle_keeps_anchor_and_skews_right() {
        let points: Vec<_> = (0..3)
            .map(|i| spread(BASE, i, 3, PositionCategory::CenterMidfielder, LayoutMode::FullPitch))
            .collect();
        assert_eq!(points[0], BASE);
        assert_eq!(points[1], FieldCoordinate::new(417.5, 195.0));
        assert_eq!(points[2], FieldCoordinate::new(417.5, 405.0));
    }

    #[test]
    fn test_four_players_form_centred_square() {
        let offsets: Vec<_> = (0..4)
            .map(|i| spread_offset(i, 4, PositionCategory::CenterBack, LayoutMode::FullPitch))
            .collect();
        let half = OFFSET_DISTANCE / GRID_DIVISOR / 2.0;
        assert_eq!(offsets, vec![(-half, -half), (half, -half), (-half, half), (half, half)]);

        let mean_x: f64 = offsets.iter().map(|o| o.0).sum::<f64>() / 4.0;
        let mean_y: f64 = offsets.iter().map(|o| o.1).sum::<f64>() / 4.0;
        assert!(mean_x.abs() < 1e-9 && mean_y.abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_grid_offsets_are_distinct(total in 4usize..30) {
            let offsets: Vec<_> = (0..total)
                .map(|i| spread_offset(i, total, PositionCategory::LeftBack, LayoutMode::FullPitch))
                .collect();
            for (i, a) in offsets.iter().enumerate() {
                for b in &offsets[i + 1..] {
                    let gap = (a.0 - b.0).hypot(a.1 - b.1);
                    prop_assert!(gap >= OFFSET_DISTANCE / GRID_DIVISOR - 1e-9);
                }
            }
        }

        #[test]
        fn prop_full_grids_are_centred(side in 2usize..6) {
            let total = side * side;
            let (sx, sy) = (0..total)
                .map(|i| spread_offset(i, total, PositionCategory::LeftBack, LayoutMode::FullPitch))
                .fold((0.0, 0.0), |acc, o| (acc.0 + o.0, acc.1 + o.1));
            prop_assert!(sx.abs() < 1e-6);
            prop_assert!(sy.abs() < 1e-6);
        }
    }
}
