use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{LineupData, PositioningRecord};

/// Where lineups come from. Both are re-read on every refresh tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineupSource {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for LineupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineupSource::File(path) => write!(f, "{}", path.display()),
            LineupSource::Url(url) => f.write_str(url),
        }
    }
}

// The flat record array is tried first; a JSON array never describes a lineup.
#[derive(Deserialize)]
#[serde(untagged)]
enum LineupPayload {
    Positioning(Vec<PositioningRecord>),
    Lineup(LineupData),
}

pub struct DataClient {
    client: Client,
    home_name: String,
    away_name: String,
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            home_name: "Home".to_string(),
            away_name: "Away".to_string(),
        }
    }

    /// Team names used when the payload is a positioning record array,
    /// which carries none of its own.
    pub fn with_team_names(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_name = home.into();
        self.away_name = away.into();
        self
    }

    pub fn parse_lineup(&self, json: &str) -> Result<LineupData> {
        let payload: LineupPayload = serde_json::from_str(json).context("lineup payload is neither a lineup nor a positioning array")?;
        Ok(self.into_lineup(payload))
    }

    fn into_lineup(&self, payload: LineupPayload) -> LineupData {
        match payload {
            LineupPayload::Lineup(lineup) => lineup,
            LineupPayload::Positioning(records) => {
                LineupData::from_positioning(records, &self.home_name, &self.away_name)
            }
        }
    }

    pub async fn fetch_lineup(&self, url: &str) -> Result<LineupData> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        let payload = resp.json::<LineupPayload>().await.context("failed to decode lineup")?;
        let lineup = self.into_lineup(payload);
        info!("fetched {} players from {url}", lineup.player_count());
        Ok(lineup)
    }

    pub async fn load_lineup(&self, path: &Path) -> Result<LineupData> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let lineup = self
            .parse_lineup(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!("loaded {} players from {}", lineup.player_count(), path.display());
        Ok(lineup)
    }

    pub async fn load(&self, source: &LineupSource) -> Result<LineupData> {
        match source {
            LineupSource::File(path) => self.load_lineup(path).await,
            LineupSource::Url(url) => self.fetch_lineup(url).await,
        }
    }
}
