use std::path::Path;

use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisConfig, Config, DataConfig, ServerConfig};

/// Loads the application configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.analysis.year_min > config.analysis.year_max {
        return Err(ConfigError::ValidationError(format!(
            "analysis.year_min ({}) must not exceed analysis.year_max ({})",
            config.analysis.year_min, config.analysis.year_max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?;
        validate(&config)?;
        Ok(config)
    }

    const MINIMAL: &str = r#"
        [data]
        transactions_path = "file/trade_extract.csv"
        reference_path = "file/country_codes.csv"

        [analysis]
        product = 852352
        year_min = 2020
        year_max = 2023
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.seed, None);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn explicit_seed_is_preserved() {
        let toml = format!("{MINIMAL}\nseed = 42");
        let config = parse(&toml).unwrap();
        assert_eq!(config.analysis.seed, Some(42));
    }

    #[test]
    fn inverted_year_range_fails_validation() {
        let toml = MINIMAL.replace("year_min = 2020", "year_min = 2030");
        let err = parse(&toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
