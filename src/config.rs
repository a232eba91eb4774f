use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{layout::LayoutMode, model::FieldCoordinate};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutesPosition {
    Left,
    #[default]
    Bottom,
    Right,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutesConfig {
    pub enabled: bool,
    pub position: SubstitutesPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallConfig {
    pub enabled: bool,
    pub size: f64,
    pub initial_x: Option<f64>,
    pub initial_y: Option<f64>,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 10.0,
            initial_x: None,
            initial_y: None,
        }
    }
}

/// Render settings. Colours are hex strings handed to the renderer untouched;
/// the layout only reads the geometry fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineupConfig {
    pub width: f64,
    pub height: f64,
    pub layout: LayoutMode,
    pub show_player_names: bool,
    pub show_jersey_numbers: bool,
    pub substitutes: SubstitutesConfig,
    pub field_color: String,
    pub line_color: String,
    pub home_team_color: String,
    pub away_team_color: String,
    pub player_circle_size: f64,
    pub ball: BallConfig,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            layout: LayoutMode::FullPitch,
            show_player_names: true,
            show_jersey_numbers: true,
            substitutes: SubstitutesConfig::default(),
            field_color: "4CAF50".to_string(),
            line_color: "FFFFFF".to_string(),
            home_team_color: "FF5722".to_string(),
            away_team_color: "2196F3".to_string(),
            player_circle_size: 16.0,
            ball: BallConfig::default(),
        }
    }
}

impl LineupConfig {
    /// Where the ball starts before anyone drags it.
    pub fn initial_ball_position(&self) -> Option<FieldCoordinate> {
        self.ball.enabled.then(|| {
            FieldCoordinate::new(
                self.ball.initial_x.unwrap_or(self.width / 2.0),
                self.ball.initial_y.unwrap_or(self.height / 2.0),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LineupConfig = serde_json::from_str(r#"{"width":1000,"layout":"split_pitch"}"#).unwrap();
        assert_eq!(config.width, 1000.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.layout, LayoutMode::SplitPitch);
        assert!(config.show_player_names);
        assert!(!config.substitutes.enabled);
    }

    #[test]
    fn test_ball_defaults_to_centre() {
        let mut config = LineupConfig::default();
        assert_eq!(config.initial_ball_position(), None);

        config.ball.enabled = true;
        let ball = config.initial_ball_position().unwrap();
        assert_eq!((ball.x, ball.y), (400.0, 300.0));

        config.ball.initial_x = Some(120.0);
        assert_eq!(config.initial_ball_position().unwrap().x, 120.0);
    }
}
