use common::{GameError, GameResult};
use data::Catalog;
use serde::Deserialize;
use tracing::{debug, warn};

/// World and starting-state settings, read from a JSON file.
///
/// Any field missing from the file keeps its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: u32,
    pub map_height: u32,
    pub land_probability: f64,
    /// Fixes world generation and every later roll when set.
    pub seed: Option<u64>,
    pub start_money: u32,
    pub start_rod: String,
    pub location_names: Vec<String>,
    /// Catalog file to use instead of the embedded one.
    pub catalog_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 40,
            map_height: 20,
            land_probability: 0.6,
            seed: None,
            start_money: 100,
            start_rod: "Basic Rod".to_string(),
            location_names: [
                "Vagle Harbor",
                "Old Pier",
                "Seabreeze Town",
                "Pärnu Dock",
                "Northwatch",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            catalog_path: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path, "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let cfg: Self = serde_json::from_str(&data)
            .map_err(|e| GameError::Parse(format!("{path}: {e}")))?;
        if cfg.location_names.is_empty() {
            warn!(path, "no location names configured; shops will be unreachable");
        }
        Ok(cfg)
    }

    /// Loads the configured catalog, falling back to the embedded one.
    pub fn catalog(&self) -> GameResult<Catalog> {
        match &self.catalog_path {
            Some(path) => data::load_catalog(path),
            None => data::load_catalog_embedded(),
        }
    }
}
