//! Coordinate layout and label placement for both rosters.
//!
//! Everything in here is a pure function of its inputs. A render pass
//! recomputes the whole layout from the roster; the only state carried
//! between passes is the override map, which callers own and pass in.

pub mod assign;
pub mod labels;
pub mod markings;
pub mod orchestrator;
pub mod position_table;
pub mod spread;
pub mod transform;

use std::{collections::HashMap, fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{FieldCoordinate, PlayerAssignment, PlayerKey};

pub use assign::{assign, AssignOptions};
pub use labels::{place_labels, LabelDecision};
pub use orchestrator::{canvas_size, compute_layout, CanvasSize, LineupLayout};
pub use position_table::{base_position, TableVariant};
pub use spread::spread;

/// Manual per-player positions, keyed by `(team, playerId)`.
pub type CoordinateOverrides = HashMap<PlayerKey, FieldCoordinate>;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Both teams across one pitch, away side mirrored.
    #[default]
    #[value(name = "full")]
    FullPitch,
    /// Each team confined to its own half.
    #[value(name = "half")]
    HalfPitch,
    /// Two rotated pitches side by side, one per team.
    #[value(name = "split")]
    SplitPitch,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::FullPitch => "full_pitch",
            LayoutMode::HalfPitch => "half_pitch",
            LayoutMode::SplitPitch => "split_pitch",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A roster entry together with where it lands on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPlayer {
    pub assignment: PlayerAssignment,
    pub coordinate: FieldCoordinate,
}

impl PlacedPlayer {
    pub fn new(assignment: PlayerAssignment, coordinate: FieldCoordinate) -> Self {
        Self {
            assignment,
            coordinate,
        }
    }

    pub fn key(&self) -> PlayerKey {
        self.assignment.key()
    }
}

/// Replaces computed coordinates with any matching override.
pub fn apply_overrides(players: &mut [PlacedPlayer], overrides: Option<&CoordinateOverrides>) {
    let Some(overrides) = overrides else {
        return;
    };
    for placed in players.iter_mut() {
        if let Some(coord) = overrides.get(&placed.key()) {
            placed.coordinate = *coord;
        }
    }
}
