//! Pitch line geometry, kept in the same coordinate space as the players so
//! both go through identical transforms.

use crate::model::FieldCoordinate;

use super::position_table::FIELD_MARGIN;

const CENTRE_CIRCLE_RADIUS: f64 = 50.0;
const PENALTY_AREA: (f64, f64) = (80.0, 120.0);
const GOAL_AREA: (f64, f64) = (30.0, 60.0);
const GOAL: (f64, f64) = (8.0, 24.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marking {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        from: FieldCoordinate,
        to: FieldCoordinate,
    },
    Circle {
        center: FieldCoordinate,
        radius: f64,
    },
}

impl Marking {
    fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Marking::Rect { x, y, width, height }
    }

    /// Maps the shape through a point transform. Only valid for transforms
    /// that keep axes axis-aligned (mirror, quarter turns, translation).
    pub fn map(self, f: impl Fn(FieldCoordinate) -> FieldCoordinate) -> Self {
        match self {
            Marking::Rect { x, y, width, height } => {
                let a = f(FieldCoordinate::new(x, y));
                let b = f(FieldCoordinate::new(x + width, y + height));
                Marking::rect(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
            }
            Marking::Line { from, to } => Marking::Line {
                from: f(from),
                to: f(to),
            },
            Marking::Circle { center, radius } => Marking::Circle {
                center: f(center),
                radius,
            },
        }
    }
}

/// Boundary, halfway line, centre circle, both penalty and goal areas and
/// both goals for a `width` x `height` canvas.
pub fn pitch_markings(width: f64, height: f64) -> Vec<Marking> {
    let mid_x = width / 2.0;
    let mid_y = height / 2.0;
    let right = width - FIELD_MARGIN;

    let mut markings = vec![
        Marking::rect(FIELD_MARGIN, FIELD_MARGIN, width - 2.0 * FIELD_MARGIN, height - 2.0 * FIELD_MARGIN),
        Marking::Line {
            from: FieldCoordinate::new(mid_x, FIELD_MARGIN),
            to: FieldCoordinate::new(mid_x, height - FIELD_MARGIN),
        },
        Marking::Circle {
            center: FieldCoordinate::new(mid_x, mid_y),
            radius: CENTRE_CIRCLE_RADIUS,
        },
    ];

    for (w, h) in [PENALTY_AREA, GOAL_AREA] {
        markings.push(Marking::rect(FIELD_MARGIN, mid_y - h / 2.0, w, h));
        markings.push(Marking::rect(right - w, mid_y - h / 2.0, w, h));
    }

    let (goal_w, goal_h) = GOAL;
    markings.push(Marking::rect(FIELD_MARGIN - goal_w, mid_y - goal_h / 2.0, goal_w, goal_h));
    markings.push(Marking::rect(right, mid_y - goal_h / 2.0, goal_w, goal_h));

    markings
}
