use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Locations of the two input tables.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// The pre-filtered, single-reporter transaction extract (`t,i,j,k,v,q`).
    pub transactions_path: PathBuf,
    /// The country-code reference table (`country_code`, `country_name`).
    pub reference_path: PathBuf,
}

/// Parameters for one analysis pass.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// The Harmonized System product code the extract is restricted to.
    pub product: u32,
    /// Lower bound (inclusive) of the synthetic year range.
    pub year_min: i32,
    /// Upper bound (inclusive) of the synthetic year range.
    pub year_max: i32,
    /// How many top importers the pivot matrix keeps.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// RNG seed for the synthetic-year draw. Set it for reproducible
    /// output (the dashboard's mode); omit it for a fresh draw per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Bind address for the dashboard server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}
