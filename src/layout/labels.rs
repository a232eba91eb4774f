//! Decides whether each player's name badge goes above or below the marker.

use crate::model::{FieldCoordinate, PlayerAssignment};

use super::PlacedPlayer;

/// Neighbours closer than this can collide with a label.
pub const PROXIMITY_THRESHOLD: f64 = 60.0;

/// Max vertical gap (and min horizontal gap) for two players to count as
/// side by side.
pub const ALIGNMENT_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelDecision {
    pub assignment: PlayerAssignment,
    pub coordinate: FieldCoordinate,
    pub place_above: bool,
}

/// Places a label for every target. Neighbours come from `neighbor_pool`,
/// or from `targets` when no pool is given; pass a pool spanning both teams
/// to account for opponents standing nearby.
pub fn place_labels(targets: &[PlacedPlayer], neighbor_pool: Option<&[PlacedPlayer]>) -> Vec<LabelDecision> {
    let pool = neighbor_pool.unwrap_or(targets);

    targets
        .iter()
        .map(|target| LabelDecision {
            assignment: target.assignment.clone(),
            coordinate: target.coordinate,
            place_above: should_place_above(target, pool),
        })
        .collect()
}

fn should_place_above(target: &PlacedPlayer, pool: &[PlacedPlayer]) -> bool {
    let me = target.coordinate;
    let key = target.key();

    let nearby: Vec<FieldCoordinate> = pool
        .iter()
        .filter(|other| other.key() != key)
        .map(|other| other.coordinate)
        .filter(|other| me.distance_to(*other) <= PROXIMITY_THRESHOLD)
        .collect();

    if nearby.is_empty() {
        return false;
    }

    let leftmost_aligned = nearby
        .iter()
        .filter(|other| {
            (me.y - other.y).abs() <= ALIGNMENT_THRESHOLD && (me.x - other.x).abs() > ALIGNMENT_THRESHOLD
        })
        .min_by(|a, b| a.x.total_cmp(&b.x));

    if let Some(aligned) = leftmost_aligned {
        // side by side: the left player's label goes up
        return me.x < aligned.x;
    }

    nearby.iter().any(|other| other.y > me.y)
}
