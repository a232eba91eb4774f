//! Assembles full, half and split pitch layouts from the pieces in this
//! module. The order of steps per mode is what keeps players aligned with
//! the pitch graphics, which go through the same transforms.

use log::debug;

use crate::{
    config::{LineupConfig, SubstitutesPosition},
    error::LineupError,
    model::{FieldCoordinate, LineupData, PlayerAssignment, Team, TeamSheet},
};

use super::{
    apply_overrides,
    assign::{assign, AssignOptions},
    labels::{place_labels, LabelDecision},
    markings::{pitch_markings, Marking},
    position_table::FIELD_MARGIN,
    transform::{mirror_players, rotate_90_ccw, rotate_players, translate_players},
    CoordinateOverrides, LayoutMode, PlacedPlayer,
};

/// Horizontal space between the two split pitch panels.
pub const SPLIT_PITCH_GAP: f64 = 60.0;

/// Full pitch nudge applied to each team before the away side is mirrored,
/// so the two central markers don't meet on the halfway line.
pub const FULL_PITCH_TEAM_OFFSET: f64 = -20.0;

pub const SUBSTITUTES_BOTTOM_EXTRA: f64 = 120.0;
pub const SUBSTITUTES_SIDE_EXTRA: f64 = 180.0;

const SUB_CIRCLE_RADIUS: f64 = 15.0;
const SUB_ROW_SPACING: f64 = 120.0;
const SUB_COLUMN_SPACING: f64 = 50.0;
const SPLIT_SUB_SPACING: f64 = 60.0;
const TEAM_LABEL_INSET: f64 = 70.0;
const TEAM_LABEL_Y: f64 = 30.0;

/// Drawing surface size. `origin_x` is how far field space is shifted right
/// on the surface, which is non-zero only with a left substitutes panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamLabel {
    pub name: String,
    pub is_home_team: bool,
    pub position: FieldCoordinate,
}

/// One on-pitch player as handed to the renderer and to hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    pub assignment: PlayerAssignment,
    pub coordinate: FieldCoordinate,
    pub is_home_team: bool,
    pub place_label_above: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubstituteSlot {
    pub assignment: PlayerAssignment,
    pub coordinate: FieldCoordinate,
    pub is_home_team: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineupLayout {
    pub mode: LayoutMode,
    pub canvas: CanvasSize,
    pub markings: Vec<Marking>,
    pub team_labels: Vec<TeamLabel>,
    pub players: Vec<LayoutEntry>,
    pub substitutes: Vec<SubstituteSlot>,
    pub ball: Option<FieldCoordinate>,
}

impl LineupLayout {
    pub fn entry(&self, team: Team, player_id: u32) -> Option<&LayoutEntry> {
        self.players
            .iter()
            .find(|e| e.assignment.team == team && e.assignment.player.id == player_id)
    }
}

/// Surface size for `config`. Split pitch swaps the axes because each
/// panel is a portrait pitch turned on its side.
pub fn canvas_size(config: &LineupConfig) -> CanvasSize {
    if config.layout == LayoutMode::SplitPitch {
        return CanvasSize {
            width: config.height * 2.0 + SPLIT_PITCH_GAP,
            height: config.width,
            origin_x: 0.0,
        };
    }

    let mut size = CanvasSize {
        width: config.width,
        height: config.height,
        origin_x: 0.0,
    };
    if config.substitutes.enabled {
        match config.substitutes.position {
            SubstitutesPosition::Bottom => size.height += SUBSTITUTES_BOTTOM_EXTRA,
            SubstitutesPosition::Left => {
                size.width += SUBSTITUTES_SIDE_EXTRA;
                size.origin_x = SUBSTITUTES_SIDE_EXTRA;
            }
            SubstitutesPosition::Right => size.width += SUBSTITUTES_SIDE_EXTRA,
        }
    }
    size
}

/// Runs one layout pass. `overrides` is a read-only snapshot of manual
/// positions; `ball` replaces the configured starting point when set.
pub fn compute_layout(
    lineup: &LineupData,
    config: &LineupConfig,
    overrides: Option<&CoordinateOverrides>,
    ball: Option<FieldCoordinate>,
) -> Result<LineupLayout, LineupError> {
    let (width, height) = (config.width, config.height);
    if !(width.is_finite() && height.is_finite() && width > 2.0 * FIELD_MARGIN && height > 2.0 * FIELD_MARGIN) {
        return Err(LineupError::InvalidDimensions { width, height });
    }

    let home_roster = lineup.home_team.field_players();
    let away_roster = lineup.away_team.field_players();

    let (markings, team_labels, players) = match config.layout {
        LayoutMode::FullPitch => full_pitch(lineup, &home_roster, &away_roster, config, overrides),
        LayoutMode::HalfPitch => half_pitch(lineup, &home_roster, &away_roster, config, overrides),
        LayoutMode::SplitPitch => split_pitch(lineup, &home_roster, &away_roster, config, overrides),
    };

    let substitutes = match (config.substitutes.enabled, config.layout) {
        (false, _) => Vec::new(),
        (true, LayoutMode::SplitPitch) => split_substitutes(lineup, config),
        (true, _) => panel_substitutes(lineup, config),
    };

    debug!(
        "{} layout: {} field players, {} substitutes",
        config.layout,
        players.len(),
        substitutes.len()
    );

    Ok(LineupLayout {
        mode: config.layout,
        canvas: canvas_size(config),
        markings,
        team_labels,
        players,
        substitutes,
        ball: ball.or_else(|| config.initial_ball_position()),
    })
}

type Assembled = (Vec<Marking>, Vec<TeamLabel>, Vec<LayoutEntry>);

fn full_pitch(
    lineup: &LineupData,
    home_roster: &[PlayerAssignment],
    away_roster: &[PlayerAssignment],
    config: &LineupConfig,
    overrides: Option<&CoordinateOverrides>,
) -> Assembled {
    let options = AssignOptions::new(config.width, config.height, LayoutMode::FullPitch)
        .team_offset_x(FULL_PITCH_TEAM_OFFSET);

    let mut home = assign(home_roster, &options.home_team(true), None);
    let mut away = assign(away_roster, &options.home_team(false), None);
    mirror_players(&mut away, config.width);

    apply_overrides(&mut home, overrides);
    apply_overrides(&mut away, overrides);

    let players = label_jointly(home, away);
    (
        pitch_markings(config.width, config.height),
        side_labels(lineup, config.width),
        players,
    )
}

fn half_pitch(
    lineup: &LineupData,
    home_roster: &[PlayerAssignment],
    away_roster: &[PlayerAssignment],
    config: &LineupConfig,
    overrides: Option<&CoordinateOverrides>,
) -> Assembled {
    let options = AssignOptions::new(config.width, config.height, LayoutMode::HalfPitch).half_pitch(true);

    let mut home = assign(home_roster, &options.home_team(true), None);
    let mut away = assign(away_roster, &options.home_team(false), None);

    apply_overrides(&mut home, overrides);
    apply_overrides(&mut away, overrides);

    let players = label_jointly(home, away);
    (
        pitch_markings(config.width, config.height),
        side_labels(lineup, config.width),
        players,
    )
}

fn split_pitch(
    lineup: &LineupData,
    home_roster: &[PlayerAssignment],
    away_roster: &[PlayerAssignment],
    config: &LineupConfig,
    overrides: Option<&CoordinateOverrides>,
) -> Assembled {
    let (width, height) = (config.width, config.height);
    let panel_offset = height + SPLIT_PITCH_GAP;

    // both teams are laid out as the home side of their own pitch
    let options = AssignOptions::new(width, height, LayoutMode::SplitPitch).home_team(true);
    let mut home = assign(home_roster, &options, None);
    let mut away = assign(away_roster, &options, None);

    rotate_players(&mut home, width, height);
    rotate_players(&mut away, width, height);
    translate_players(&mut away, panel_offset, 0.0);

    apply_overrides(&mut home, overrides);
    apply_overrides(&mut away, overrides);

    // the panels never touch, so each team is labelled on its own
    let mut players = to_entries(place_labels(&home, None), true);
    players.extend(to_entries(place_labels(&away, None), false));

    let base = pitch_markings(width, height);
    let mut markings: Vec<Marking> = base
        .iter()
        .map(|m| m.map(|c| rotate_90_ccw(c, width, height)))
        .collect();
    markings.extend(
        base.iter()
            .map(|m| m.map(|c| rotate_90_ccw(c, width, height).translate(panel_offset, 0.0))),
    );

    let team_labels = vec![
        team_label(&lineup.home_team, true, FieldCoordinate::new(height / 2.0, TEAM_LABEL_Y)),
        team_label(
            &lineup.away_team,
            false,
            FieldCoordinate::new(panel_offset + height / 2.0, TEAM_LABEL_Y),
        ),
    ];

    (markings, team_labels, players)
}

fn label_jointly(home: Vec<PlacedPlayer>, away: Vec<PlacedPlayer>) -> Vec<LayoutEntry> {
    let home_count = home.len();
    let mut all = home;
    all.extend(away);

    place_labels(&all, Some(&all))
        .into_iter()
        .enumerate()
        .map(|(index, decision)| to_entry(decision, index < home_count))
        .collect()
}

fn to_entries(decisions: Vec<LabelDecision>, is_home_team: bool) -> Vec<LayoutEntry> {
    decisions
        .into_iter()
        .map(|decision| to_entry(decision, is_home_team))
        .collect()
}

fn to_entry(decision: LabelDecision, is_home_team: bool) -> LayoutEntry {
    LayoutEntry {
        assignment: decision.assignment,
        coordinate: decision.coordinate,
        is_home_team,
        place_label_above: decision.place_above,
    }
}

fn team_label(sheet: &TeamSheet, is_home_team: bool, position: FieldCoordinate) -> TeamLabel {
    TeamLabel {
        name: sheet.name.clone(),
        is_home_team,
        position,
    }
}

fn side_labels(lineup: &LineupData, width: f64) -> Vec<TeamLabel> {
    vec![
        team_label(&lineup.home_team, true, FieldCoordinate::new(TEAM_LABEL_INSET, TEAM_LABEL_Y)),
        team_label(
            &lineup.away_team,
            false,
            FieldCoordinate::new(width - TEAM_LABEL_INSET, TEAM_LABEL_Y),
        ),
    ]
}

fn panel_substitutes(lineup: &LineupData, config: &LineupConfig) -> Vec<SubstituteSlot> {
    let home = lineup.home_team.substitutes();
    let away = lineup.away_team.substitutes();
    let mut slots = Vec::with_capacity(home.len() + away.len());

    match config.substitutes.position {
        SubstitutesPosition::Bottom => {
            let rows = [(home, config.height + 55.0, true), (away, config.height + 115.0, false)];
            for (subs, y, is_home_team) in rows {
                for (index, assignment) in subs.into_iter().enumerate() {
                    let x = 20.0 + SUB_CIRCLE_RADIUS + index as f64 * SUB_ROW_SPACING;
                    slots.push(SubstituteSlot {
                        assignment,
                        coordinate: FieldCoordinate::new(x, y),
                        is_home_team,
                    });
                }
            }
        }
        SubstitutesPosition::Left | SubstitutesPosition::Right => {
            let x = if config.substitutes.position == SubstitutesPosition::Left {
                -SUBSTITUTES_SIDE_EXTRA + 20.0 + SUB_CIRCLE_RADIUS
            } else {
                config.width + 20.0 + SUB_CIRCLE_RADIUS
            };
            let mut y = 100.0;
            for (subs, is_home_team) in [(home, true), (away, false)] {
                if subs.is_empty() {
                    continue;
                }
                y += 20.0;
                for assignment in subs {
                    slots.push(SubstituteSlot {
                        assignment,
                        coordinate: FieldCoordinate::new(x, y),
                        is_home_team,
                    });
                    y += SUB_COLUMN_SPACING;
                }
                y += 20.0;
            }
        }
    }
    slots
}

/// Split pitch keeps the canvas size fixed, so substitutes stack in the strip
/// between each panel's outer edge and its touchline.
fn split_substitutes(lineup: &LineupData, config: &LineupConfig) -> Vec<SubstituteSlot> {
    let canvas_width = config.height * 2.0 + SPLIT_PITCH_GAP;
    let columns = [
        (lineup.home_team.substitutes(), FIELD_MARGIN / 2.0, true),
        (lineup.away_team.substitutes(), canvas_width - FIELD_MARGIN / 2.0, false),
    ];

    columns
        .into_iter()
        .flat_map(|(subs, x, is_home_team)| {
            subs.into_iter().enumerate().map(move |(index, assignment)| SubstituteSlot {
                assignment,
                coordinate: FieldCoordinate::new(x, 100.0 + index as f64 * SPLIT_SUB_SPACING),
                is_home_team,
            })
        })
        .collect()
}
