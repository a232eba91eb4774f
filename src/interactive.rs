use log::info;

use crate::{
    config::LineupConfig,
    layout::{CoordinateOverrides, LineupLayout},
    model::{FieldCoordinate, PlayerKey, Team},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Player(PlayerKey),
    Ball,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    target: DragTarget,
    grab_dx: f64,
    grab_dy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEvent {
    Player { key: PlayerKey, to: FieldCoordinate },
    Ball { to: FieldCoordinate },
}

/// Owns everything the user changed by hand: dragged player positions and
/// the ball. Layout passes only ever see a borrowed snapshot of this.
#[derive(Debug, Default)]
pub struct InteractiveState {
    overrides: CoordinateOverrides,
    ball: Option<FieldCoordinate>,
    drag: Option<DragState>,
    player_radius: f64,
    ball_radius: f64,
}

impl InteractiveState {
    pub fn new(config: &LineupConfig) -> Self {
        Self {
            overrides: CoordinateOverrides::new(),
            ball: config.initial_ball_position(),
            drag: None,
            player_radius: config.player_circle_size,
            ball_radius: config.ball.size,
        }
    }

    pub fn overrides(&self) -> &CoordinateOverrides {
        &self.overrides
    }

    pub fn set_override(&mut self, team: Team, player_id: u32, coordinate: FieldCoordinate) {
        self.overrides.insert(PlayerKey::new(team, player_id), coordinate);
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    pub fn ball_position(&self) -> Option<FieldCoordinate> {
        self.ball
    }

    pub fn set_ball_position(&mut self, coordinate: FieldCoordinate) {
        self.ball = Some(coordinate);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// What sits under `at` in `layout`. The ball wins over players, and
    /// later-drawn players win over earlier ones. Substitutes are never
    /// draggable.
    pub fn hit_test(&self, at: FieldCoordinate, layout: &LineupLayout) -> Option<(DragTarget, FieldCoordinate)> {
        if let Some(ball) = layout.ball {
            if at.distance_to(ball) <= self.ball_radius {
                return Some((DragTarget::Ball, ball));
            }
        }

        layout
            .players
            .iter()
            .rev()
            .find(|entry| at.distance_to(entry.coordinate) <= self.player_radius)
            .map(|entry| (DragTarget::Player(entry.assignment.key()), entry.coordinate))
    }

    /// Starts a drag if something is under `at`.
    pub fn press(&mut self, at: FieldCoordinate, layout: &LineupLayout) -> bool {
        let Some((target, origin)) = self.hit_test(at, layout) else {
            return false;
        };
        self.drag = Some(DragState {
            target,
            grab_dx: at.x - origin.x,
            grab_dy: at.y - origin.y,
        });
        true
    }

    /// Moves the dragged item so it keeps its grab offset under `at`.
    /// Returns false when nothing is being dragged.
    pub fn drag(&mut self, at: FieldCoordinate) -> bool {
        let Some(state) = self.drag else {
            return false;
        };
        let to = at.translate(-state.grab_dx, -state.grab_dy);
        match state.target {
            DragTarget::Ball => self.ball = Some(to),
            DragTarget::Player(key) => {
                self.overrides.insert(key, to);
            }
        }
        true
    }

    pub fn release(&mut self, at: FieldCoordinate) -> Option<MoveEvent> {
        if !self.drag(at) {
            return None;
        }
        let state = self.drag.take()?;
        let event = match state.target {
            DragTarget::Ball => MoveEvent::Ball {
                to: self.ball.unwrap_or(at),
            },
            DragTarget::Player(key) => MoveEvent::Player {
                key,
                to: self.overrides.get(&key).copied().unwrap_or(at),
            },
        };
        match event {
            MoveEvent::Player { key, to } => info!("moved {key} to ({:.1}, {:.1})", to.x, to.y),
            MoveEvent::Ball { to } => info!("moved ball to ({:.1}, {:.1})", to.x, to.y),
        }
        Some(event)
    }
}
