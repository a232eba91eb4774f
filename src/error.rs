use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineupError {
    #[error("unknown position category: {0}")]
    UnknownPosition(String),

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("malformed player key {0:?}, expected \"{{team}}-{{playerId}}\"")]
    InvalidPlayerKey(String),

    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}
