//! Base anchor for every position category, expressed as fractions of the
//! margin-reduced field rectangle.

use crate::model::{FieldCoordinate, PositionCategory};

use super::LayoutMode;

/// Pixels trimmed from each side of the canvas before fractions apply.
pub const FIELD_MARGIN: f64 = 50.0;

/// How far past the right edge substitutes are parked.
pub const SUBSTITUTE_CLEARANCE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVariant {
    /// Shared pitch: the team fills the half from its own goal line to the
    /// halfway line. The away side is mirrored afterwards.
    Full,
    /// Shared pitch, compact formation in the left half.
    HalfHome,
    /// Shared pitch, compact formation in the right half.
    HalfAway,
    /// A pitch of its own: the team spans the whole playable length.
    Panel,
}

impl TableVariant {
    pub fn for_team(mode: LayoutMode, half_pitch: bool, home_team: bool) -> Self {
        match (mode, half_pitch, home_team) {
            (_, true, true) => TableVariant::HalfHome,
            (_, true, false) => TableVariant::HalfAway,
            (LayoutMode::SplitPitch, false, _) => TableVariant::Panel,
            (_, false, _) => TableVariant::Full,
        }
    }

    fn is_half(self) -> bool {
        matches!(self, TableVariant::HalfHome | TableVariant::HalfAway)
    }
}

/// Fractional anchor: `fx` along the playable length, `fy` of the canvas height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub fx: f64,
    pub fy: f64,
}

const fn anchor(fx: f64, fy: f64) -> Anchor {
    Anchor { fx, fy }
}

const FULL_GOALKEEPER: Anchor = anchor(0.08, 0.5);
const FULL_LEFT_BACK: Anchor = anchor(0.27, 0.2);
const FULL_CENTER_BACK: Anchor = anchor(0.25, 0.5);
const FULL_RIGHT_BACK: Anchor = anchor(0.27, 0.8);
const FULL_DEFENSIVE_MIDFIELDER: Anchor = anchor(0.45, 0.5);
const FULL_LEFT_MIDFIELDER: Anchor = anchor(0.6, 0.2);
const FULL_CENTER_MIDFIELDER: Anchor = anchor(0.55, 0.5);
const FULL_RIGHT_MIDFIELDER: Anchor = anchor(0.6, 0.8);
const FULL_ATTACKING_MIDFIELDER: Anchor = anchor(0.67, 0.5);
const FULL_LEFT_WINGER: Anchor = anchor(0.75, 0.2);
const FULL_RIGHT_WINGER: Anchor = anchor(0.75, 0.8);
const FULL_LEFT_FORWARD: Anchor = anchor(0.88, 0.35);
const FULL_CENTER_FORWARD: Anchor = anchor(0.85, 0.5);
const FULL_RIGHT_FORWARD: Anchor = anchor(0.85, 0.65);

// Half-pitch fractions are of the half width, so each team gets its own zone.
const HALF_GOALKEEPER: Anchor = anchor(0.15, 0.5);
const HALF_LEFT_BACK: Anchor = anchor(0.4, 0.15);
const HALF_CENTER_BACK: Anchor = anchor(0.4, 0.5);
const HALF_RIGHT_BACK: Anchor = anchor(0.4, 0.85);
const HALF_DEFENSIVE_MIDFIELDER: Anchor = anchor(0.6, 0.35);
const HALF_LEFT_MIDFIELDER: Anchor = anchor(0.75, 0.2);
const HALF_CENTER_MIDFIELDER: Anchor = anchor(0.6, 0.65);
const HALF_RIGHT_MIDFIELDER: Anchor = anchor(0.75, 0.8);
const HALF_ATTACKING_MIDFIELDER: Anchor = anchor(0.85, 0.5);
const HALF_LEFT_WINGER: Anchor = anchor(0.9, 0.15);
const HALF_RIGHT_WINGER: Anchor = anchor(0.9, 0.85);
const HALF_LEFT_FORWARD: Anchor = anchor(0.95, 0.35);
const HALF_CENTER_FORWARD: Anchor = anchor(0.95, 0.5);
const HALF_RIGHT_FORWARD: Anchor = anchor(0.95, 0.65);

/// Anchor of a playable category. `None` for substitutes, which are parked
/// off the pitch rather than anchored on it.
pub fn anchor_for(category: PositionCategory, half_pitch: bool) -> Option<Anchor> {
    use PositionCategory::*;

    let anchor = match (category, half_pitch) {
        (Substitute, _) => return None,
        (Goalkeeper, false) => FULL_GOALKEEPER,
        (LeftBack, false) => FULL_LEFT_BACK,
        (CenterBack, false) => FULL_CENTER_BACK,
        (RightBack, false) => FULL_RIGHT_BACK,
        (DefensiveMidfielder, false) => FULL_DEFENSIVE_MIDFIELDER,
        (LeftMidfielder, false) => FULL_LEFT_MIDFIELDER,
        (CenterMidfielder, false) => FULL_CENTER_MIDFIELDER,
        (RightMidfielder, false) => FULL_RIGHT_MIDFIELDER,
        (AttackingMidfielder, false) => FULL_ATTACKING_MIDFIELDER,
        (LeftWinger, false) => FULL_LEFT_WINGER,
        (RightWinger, false) => FULL_RIGHT_WINGER,
        (LeftForward, false) => FULL_LEFT_FORWARD,
        (CenterForward, false) => FULL_CENTER_FORWARD,
        (RightForward, false) => FULL_RIGHT_FORWARD,
        (Goalkeeper, true) => HALF_GOALKEEPER,
        (LeftBack, true) => HALF_LEFT_BACK,
        (CenterBack, true) => HALF_CENTER_BACK,
        (RightBack, true) => HALF_RIGHT_BACK,
        (DefensiveMidfielder, true) => HALF_DEFENSIVE_MIDFIELDER,
        (LeftMidfielder, true) => HALF_LEFT_MIDFIELDER,
        (CenterMidfielder, true) => HALF_CENTER_MIDFIELDER,
        (RightMidfielder, true) => HALF_RIGHT_MIDFIELDER,
        (AttackingMidfielder, true) => HALF_ATTACKING_MIDFIELDER,
        (LeftWinger, true) => HALF_LEFT_WINGER,
        (RightWinger, true) => HALF_RIGHT_WINGER,
        (LeftForward, true) => HALF_LEFT_FORWARD,
        (CenterForward, true) => HALF_CENTER_FORWARD,
        (RightForward, true) => HALF_RIGHT_FORWARD,
    };
    Some(anchor)
}

/// Resolves a category to its base point on a `field_width` x `field_height`
/// canvas. `horizontal_offset` is added after the fractions are applied.
pub fn base_position(
    category: PositionCategory,
    field_width: f64,
    field_height: f64,
    variant: TableVariant,
    horizontal_offset: f64,
) -> FieldCoordinate {
    let playable_width = field_width - 2.0 * FIELD_MARGIN;
    let half_width = playable_width / 2.0;

    let (origin_x, span) = match variant {
        TableVariant::Full | TableVariant::HalfHome => (FIELD_MARGIN, half_width),
        TableVariant::HalfAway => (FIELD_MARGIN + half_width, half_width),
        TableVariant::Panel => (FIELD_MARGIN, playable_width),
    };

    let point = match anchor_for(category, variant.is_half()) {
        Some(a) => FieldCoordinate::new(origin_x + span * a.fx, field_height * a.fy),
        None => FieldCoordinate::new(field_width + SUBSTITUTE_CLEARANCE, field_height / 2.0),
    };
    point.translate(horizontal_offset, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pitch_goalkeeper() {
        let gk = base_position(PositionCategory::Goalkeeper, 1000.0, 700.0, TableVariant::Full, 0.0);
        assert!((gk.x - (50.0 + 450.0 * 0.08)).abs() < 1e-9);
        assert_eq!(gk.y, 350.0);

        let panel = base_position(PositionCategory::Goalkeeper, 1000.0, 700.0, TableVariant::Panel, 0.0);
        assert!((panel.x - (50.0 + 900.0 * 0.08)).abs() < 1e-9);
    }

    #[test]
    fn test_full_pitch_team_stays_in_own_half() {
        for category in PositionCategory::ALL.into_iter().filter(|c| !c.is_substitute()) {
            let p = base_position(category, 1000.0, 700.0, TableVariant::Full, 0.0);
            assert!(p.x > FIELD_MARGIN && p.x < 500.0, "{category} x = {}", p.x);
        }
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(TableVariant::for_team(LayoutMode::FullPitch, false, false), TableVariant::Full);
        assert_eq!(TableVariant::for_team(LayoutMode::HalfPitch, true, false), TableVariant::HalfAway);
        assert_eq!(TableVariant::for_team(LayoutMode::SplitPitch, false, true), TableVariant::Panel);
    }

    #[test]
    fn test_substitute_parked_off_pitch() {
        for variant in [TableVariant::Full, TableVariant::HalfHome, TableVariant::HalfAway, TableVariant::Panel] {
            let sub = base_position(PositionCategory::Substitute, 800.0, 600.0, variant, 0.0);
            assert_eq!(sub, FieldCoordinate::new(820.0, 300.0));
        }
    }

    #[test]
    fn test_half_pitch_zones_do_not_overlap() {
        for category in PositionCategory::ALL.into_iter().filter(|c| !c.is_substitute()) {
            let home = base_position(category, 1000.0, 700.0, TableVariant::HalfHome, 0.0);
            let away = base_position(category, 1000.0, 700.0, TableVariant::HalfAway, 0.0);
            assert!(home.x >= FIELD_MARGIN && home.x <= 500.0, "{category} home x = {}", home.x);
            assert!(away.x >= 500.0 && away.x <= 950.0, "{category} away x = {}", away.x);
            assert!((away.x - home.x - 450.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizontal_offset_applied_last() {
        let plain = base_position(PositionCategory::LeftWinger, 800.0, 600.0, TableVariant::Full, 0.0);
        let nudged = base_position(PositionCategory::LeftWinger, 800.0, 600.0, TableVariant::Full, -20.0);
        assert_eq!(nudged, plain.translate(-20.0, 0.0));
    }

    #[test]
    fn test_every_playable_category_inside_field() {
        for category in PositionCategory::ALL.into_iter().filter(|c| !c.is_substitute()) {
            let p = base_position(category, 800.0, 600.0, TableVariant::Panel, 0.0);
            assert!(p.x > FIELD_MARGIN && p.x < 800.0 - FIELD_MARGIN);
            assert!(p.y > 0.0 && p.y < 600.0);
        }
    }
}
