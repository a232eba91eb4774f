use log::warn;

use crate::model::{PlayerAssignment, PlayerKey, PositionCategory};

use super::{
    position_table::{base_position, TableVariant},
    spread::spread,
    CoordinateOverrides, LayoutMode, PlacedPlayer,
};

/// Frame a single roster is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignOptions {
    pub field_width: f64,
    pub field_height: f64,
    pub mode: LayoutMode,
    pub field_offset_x: f64,
    pub half_pitch: bool,
    pub home_team: bool,
    pub team_offset_x: f64,
}

impl AssignOptions {
    pub fn new(field_width: f64, field_height: f64, mode: LayoutMode) -> Self {
        Self {
            field_width,
            field_height,
            mode,
            field_offset_x: 0.0,
            half_pitch: false,
            home_team: true,
            team_offset_x: 0.0,
        }
    }

    pub fn half_pitch(mut self, half_pitch: bool) -> Self {
        self.half_pitch = half_pitch;
        self
    }

    pub fn home_team(mut self, home_team: bool) -> Self {
        self.home_team = home_team;
        self
    }

    pub fn team_offset_x(mut self, offset: f64) -> Self {
        self.team_offset_x = offset;
        self
    }

    pub fn field_offset_x(mut self, offset: f64) -> Self {
        self.field_offset_x = offset;
        self
    }
}

/// Groups the roster by category in order of first appearance, keeping
/// roster order inside each group.
fn group_by_category(roster: &[PlayerAssignment]) -> Vec<(PositionCategory, Vec<&PlayerAssignment>)> {
    let mut groups: Vec<(PositionCategory, Vec<&PlayerAssignment>)> = Vec::new();
    for entry in roster {
        match groups.iter_mut().find(|(category, _)| *category == entry.position) {
            Some((_, members)) => members.push(entry),
            None => groups.push((entry.position, vec![entry])),
        }
    }
    groups
}

/// Computes a coordinate for every roster entry. Overrides win per player,
/// so one member of a crowded slot can be moved while the rest keep their
/// spread positions.
pub fn assign(
    roster: &[PlayerAssignment],
    options: &AssignOptions,
    overrides: Option<&CoordinateOverrides>,
) -> Vec<PlacedPlayer> {
    warn_on_duplicate_keys(roster);

    let variant = TableVariant::for_team(options.mode, options.half_pitch, options.home_team);
    let mut placed = Vec::with_capacity(roster.len());

    for (category, members) in group_by_category(roster) {
        let base = base_position(
            category,
            options.field_width,
            options.field_height,
            variant,
            options.field_offset_x,
        )
        .translate(options.team_offset_x, 0.0);

        let total = members.len();
        for (index, entry) in members.into_iter().enumerate() {
            let computed = if total == 1 {
                base
            } else {
                spread(base, index, total, category, options.mode)
            };
            let coordinate = overrides
                .and_then(|o| o.get(&entry.key()))
                .copied()
                .unwrap_or(computed);
            placed.push(PlacedPlayer::new(entry.clone(), coordinate));
        }
    }

    placed
}

fn warn_on_duplicate_keys(roster: &[PlayerAssignment]) {
    let mut seen: Vec<PlayerKey> = Vec::with_capacity(roster.len());
    for entry in roster {
        let key = entry.key();
        if seen.contains(&key) {
            warn!("duplicate roster key {key}; entries share one override slot");
        } else {
            seen.push(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::spread::spread_offset;
    use crate::model::{FieldCoordinate, Player, Team};

    fn entry(id: u32, position: PositionCategory) -> PlayerAssignment {
        PlayerAssignment::new(
            Player {
                id,
                name: format!("Player {id}"),
                jersey_number: Some(id),
            },
            Team::Home,
            position,
        )
    }

    #[test]
    fn test_empty_roster() {
        let options = AssignOptions::new(800.0, 600.0, LayoutMode::FullPitch);
        assert!(assign(&[], &options, None).is_empty());
    }

    #[test]
    fn test_single_player_uses_base_plus_team_offset() {
        let options = AssignOptions::new(1000.0, 700.0, LayoutMode::FullPitch).team_offset_x(-20.0);
        let placed = assign(&[entry(1, PositionCategory::Goalkeeper)], &options, None);
        let base = base_position(PositionCategory::Goalkeeper, 1000.0, 700.0, TableVariant::Full, 0.0);
        assert_eq!(placed[0].coordinate, base.translate(-20.0, 0.0));
    }

    #[test]
    fn test_override_applies_to_one_group_member_only() {
        let roster = vec![
            entry(1, PositionCategory::CenterMidfielder),
            entry(2, PositionCategory::CenterMidfielder),
            entry(3, PositionCategory::CenterMidfielder),
        ];
        let mut overrides = CoordinateOverrides::new();
        overrides.insert(PlayerKey::new(Team::Home, 2), FieldCoordinate::new(11.0, 22.0));

        let options = AssignOptions::new(800.0, 600.0, LayoutMode::FullPitch);
        let placed = assign(&roster, &options, Some(&overrides));
        let base = base_position(PositionCategory::CenterMidfielder, 800.0, 600.0, TableVariant::Full, 0.0);

        assert_eq!(placed[1].coordinate, FieldCoordinate::new(11.0, 22.0));
        for index in [0, 2] {
            let (dx, dy) = spread_offset(index, 3, PositionCategory::CenterMidfielder, LayoutMode::FullPitch);
            assert_eq!(placed[index].coordinate, base.translate(dx, dy));
        }
    }

    #[test]
    fn test_output_grouped_by_first_appearance() {
        let roster = vec![
            entry(1, PositionCategory::CenterBack),
            entry(2, PositionCategory::Goalkeeper),
            entry(3, PositionCategory::CenterBack),
        ];
        let options = AssignOptions::new(800.0, 600.0, LayoutMode::FullPitch);
        let ids: Vec<_> = assign(&roster, &options, None)
            .iter()
            .map(|p| p.assignment.player.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_half_pitch_away_uses_right_half() {
        let options = AssignOptions::new(1000.0, 700.0, LayoutMode::HalfPitch)
            .half_pitch(true)
            .home_team(false);
        let placed = assign(&[entry(1, PositionCategory::Goalkeeper)], &options, None);
        assert!(placed[0].coordinate.x > 500.0);
    }

    #[test]
    fn test_roster_not_mutated() {
        let roster = vec![entry(5, PositionCategory::LeftBack)];
        let before = roster.clone();
        let options = AssignOptions::new(800.0, 600.0, LayoutMode::FullPitch);
        let _ = assign(&roster, &options, None);
        assert_eq!(roster, before);
    }
}
