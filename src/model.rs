use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::LineupError;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub jersey_number: Option<u32>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    #[serde(alias = "red")]
    Home,
    #[serde(alias = "yellow")]
    Away,
}

impl Team {
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }

    pub fn is_home(self) -> bool {
        self == Team::Home
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" | "red" => Ok(Team::Home),
            "away" | "yellow" => Ok(Team::Away),
            other => Err(LineupError::UnknownTeam(other.to_string())),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionCategory {
    #[default]
    Goalkeeper,
    LeftBack,
    CenterBack,
    RightBack,
    DefensiveMidfielder,
    CenterMidfielder,
    AttackingMidfielder,
    LeftMidfielder,
    RightMidfielder,
    LeftWinger,
    RightWinger,
    LeftForward,
    CenterForward,
    RightForward,
    Substitute,
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 15] = [
        PositionCategory::Goalkeeper,
        PositionCategory::LeftBack,
        PositionCategory::CenterBack,
        PositionCategory::RightBack,
        PositionCategory::DefensiveMidfielder,
        PositionCategory::CenterMidfielder,
        PositionCategory::AttackingMidfielder,
        PositionCategory::LeftMidfielder,
        PositionCategory::RightMidfielder,
        PositionCategory::LeftWinger,
        PositionCategory::RightWinger,
        PositionCategory::LeftForward,
        PositionCategory::CenterForward,
        PositionCategory::RightForward,
        PositionCategory::Substitute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PositionCategory::Goalkeeper => "goalkeeper",
            PositionCategory::LeftBack => "left_back",
            PositionCategory::CenterBack => "center_back",
            PositionCategory::RightBack => "right_back",
            PositionCategory::DefensiveMidfielder => "defensive_midfielder",
            PositionCategory::CenterMidfielder => "center_midfielder",
            PositionCategory::AttackingMidfielder => "attacking_midfielder",
            PositionCategory::LeftMidfielder => "left_midfielder",
            PositionCategory::RightMidfielder => "right_midfielder",
            PositionCategory::LeftWinger => "left_winger",
            PositionCategory::RightWinger => "right_winger",
            PositionCategory::LeftForward => "left_forward",
            PositionCategory::CenterForward => "center_forward",
            PositionCategory::RightForward => "right_forward",
            PositionCategory::Substitute => "substitute",
        }
    }

    /// Categories stacked on the pitch's centre line. Pairs in these slots are
    /// spread vertically instead of horizontally.
    pub fn is_central(self) -> bool {
        matches!(
            self,
            PositionCategory::CenterBack
                | PositionCategory::DefensiveMidfielder
                | PositionCategory::CenterMidfielder
                | PositionCategory::AttackingMidfielder
                | PositionCategory::CenterForward
        )
    }

    pub fn is_substitute(self) -> bool {
        self == PositionCategory::Substitute
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionCategory {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositionCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| LineupError::UnknownPosition(s.to_string()))
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAssignment {
    pub player: Player,
    pub team: Team,
    pub position: PositionCategory,
}

impl PlayerAssignment {
    pub fn new(player: Player, team: Team, position: PositionCategory) -> Self {
        Self {
            player,
            team,
            position,
        }
    }

    pub fn key(&self) -> PlayerKey {
        PlayerKey::new(self.team, self.player.id)
    }
}

/// Stable identity of a roster entry, rendered as `"{team}-{playerId}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerKey {
    pub team: Team,
    pub player_id: u32,
}

impl PlayerKey {
    pub fn new(team: Team, player_id: u32) -> Self {
        Self { team, player_id }
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team, self.player_id)
    }
}

impl FromStr for PlayerKey {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (team, id) = s
            .rsplit_once('-')
            .ok_or_else(|| LineupError::InvalidPlayerKey(s.to_string()))?;
        let player_id = id
            .parse()
            .map_err(|_| LineupError::InvalidPlayerKey(s.to_string()))?;
        Ok(Self::new(team.parse()?, player_id))
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldCoordinate {
    pub x: f64,
    pub y: f64,
}

impl FieldCoordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: FieldCoordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSheet {
    pub name: String,
    pub color: Option<String>,
    pub players: Vec<PlayerAssignment>,
}

impl TeamSheet {
    pub fn field_players(&self) -> Vec<PlayerAssignment> {
        self.players
            .iter()
            .filter(|p| !p.position.is_substitute())
            .cloned()
            .collect()
    }

    pub fn substitutes(&self) -> Vec<PlayerAssignment> {
        self.players
            .iter()
            .filter(|p| p.position.is_substitute())
            .cloned()
            .collect()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupData {
    pub match_id: Option<u64>,
    pub home_team: TeamSheet,
    pub away_team: TeamSheet,
}

impl LineupData {
    /// Builds a lineup from the flat backend record format, keeping feed order
    /// within each team.
    pub fn from_positioning(
        records: Vec<PositioningRecord>,
        home_name: &str,
        away_name: &str,
    ) -> Self {
        let match_id = records.first().map(|r| r.match_id);
        let mut home = Vec::new();
        let mut away = Vec::new();

        for record in records {
            let assignment = PlayerAssignment::new(
                Player {
                    id: record.player_id,
                    name: record.player_name,
                    jersey_number: record.jersey_number,
                },
                record.team,
                record.position,
            );
            match record.team {
                Team::Home => home.push(assignment),
                Team::Away => away.push(assignment),
            }
        }

        Self {
            match_id,
            home_team: TeamSheet {
                name: home_name.to_string(),
                color: None,
                players: home,
            },
            away_team: TeamSheet {
                name: away_name.to_string(),
                color: None,
                players: away,
            },
        }
    }

    pub fn player_count(&self) -> usize {
        self.home_team.players.len() + self.away_team.players.len()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositioningRecord {
    pub match_id: u64,
    pub player_id: u32,
    pub player_name: String,
    pub jersey_number: Option<u32>,
    pub team: Team,
    pub position: PositionCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_player_key_identifies_team_and_id() {
        let mut positions = HashMap::new();
        positions.insert(PlayerKey::new(Team::Home, 7), FieldCoordinate::new(1.0, 2.0));
        positions.insert(PlayerKey::new(Team::Away, 7), FieldCoordinate::new(3.0, 4.0));

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[&PlayerKey::new(Team::Home, 7)], FieldCoordinate::new(1.0, 2.0));
        assert_eq!("away-7".parse::<PlayerKey>().unwrap(), PlayerKey::new(Team::Away, 7));
    }

    #[test]
    fn test_position_round_trips_through_str() {
        for category in PositionCategory::ALL {
            assert_eq!(category.as_str().parse::<PositionCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let err = "sweeper".parse::<PositionCategory>().unwrap_err();
        assert!(matches!(err, LineupError::UnknownPosition(ref s) if s == "sweeper"));

        let json = r#"{"player":{"id":1,"name":"A"},"team":"home","position":"libero"}"#;
        assert!(serde_json::from_str::<PlayerAssignment>(json).is_err());
    }

    #[test]
    fn test_legacy_team_names() {
        let red: Team = serde_json::from_str("\"red\"").unwrap();
        let yellow: Team = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(red, Team::Home);
        assert_eq!(yellow, Team::Away);
        assert_eq!(serde_json::to_string(&Team::Away).unwrap(), "\"away\"");
    }

    #[test]
    fn test_player_key_format() {
        let key = PlayerKey::new(Team::Away, 17);
        assert_eq!(key.to_string(), "away-17");
        assert_eq!("away-17".parse::<PlayerKey>().unwrap(), key);
        assert_eq!("red-4".parse::<PlayerKey>().unwrap(), PlayerKey::new(Team::Home, 4));
        assert!("away".parse::<PlayerKey>().is_err());
        assert!("away-x".parse::<PlayerKey>().is_err());
    }

    #[test]
    fn test_from_positioning_splits_teams() {
        let records = vec![
            PositioningRecord {
                match_id: 9,
                player_id: 1,
                player_name: "Keeper".into(),
                jersey_number: Some(1),
                team: Team::Home,
                position: PositionCategory::Goalkeeper,
            },
            PositioningRecord {
                match_id: 9,
                player_id: 2,
                player_name: "Striker".into(),
                jersey_number: None,
                team: Team::Away,
                position: PositionCategory::CenterForward,
            },
            PositioningRecord {
                match_id: 9,
                player_id: 3,
                player_name: "Bench".into(),
                jersey_number: Some(12),
                team: Team::Home,
                position: PositionCategory::Substitute,
            },
        ];

        let lineup = LineupData::from_positioning(records, "Reds", "Blues");
        assert_eq!(lineup.match_id, Some(9));
        assert_eq!(lineup.home_team.name, "Reds");
        assert_eq!(lineup.home_team.players.len(), 2);
        assert_eq!(lineup.away_team.players.len(), 1);
        assert_eq!(lineup.home_team.field_players().len(), 1);
        assert_eq!(lineup.home_team.substitutes()[0].player.name, "Bench");
    }
}
