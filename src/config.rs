//! Configuration management for coinburst

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;
use std::path::{Path, PathBuf};

use crate::animation::Easing;
use crate::batch::BatchConfig;
use crate::error::{CoinError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Coin distribution and trajectory settings
    pub batch: BatchConfig,

    /// Display preferences for the terminal demo
    pub ui: UiConfig,

    /// The counter coins are collected into
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frames per second
    pub fps: u32,

    /// Character drawn for each coin in flight
    pub coin_glyph: char,

    /// How many frames the wallet stays highlighted after a coin lands
    pub pulse_frames: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Balance shown before the first collection
    pub starting_balance: i64,

    /// Caption on the wallet box
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: BatchConfig {
                container: Some("wallet".to_string()),
                total_quantity: 1000,
                increment: 20,
                max_units: Some(300),
                delay_range: [0.0, 250.0],
                duration_range: [600.0, 1000.0],
                curve_intensity_range: [0.0, 0.5],
                curve_angle_range: [-FRAC_PI_4, FRAC_PI_4],
                symmetric_curve: true,
                easing: Easing::Linear,
                seed: None,
            },
            ui: UiConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            coin_glyph: '●',
            pulse_frames: 6,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: 0,
            label: "Wallet".to_string(),
        }
    }
}

impl Config {
    /// Load config from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path(),
        };

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config
        } else {
            let config = Config::default();
            config.save(&config_path)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coinburst")
            .join("config.toml")
    }

    /// Reject settings the demo cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.ui.fps == 0 {
            return Err(CoinError::Config("ui.fps must be at least 1".to_string()));
        }

        let ranges = [
            ("delay_range", self.batch.delay_range),
            ("duration_range", self.batch.duration_range),
            ("curve_intensity_range", self.batch.curve_intensity_range),
            ("curve_angle_range", self.batch.curve_angle_range),
        ];
        for (name, range) in ranges {
            if range.iter().any(|v| !v.is_finite()) {
                return Err(CoinError::Config(format!(
                    "batch.{} must contain finite numbers",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Milliseconds between frames
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / self.ui.fps.max(1)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("coinburst-test-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.batch.total_quantity, 1000);
        assert_eq!(config.batch.increment, 20);
        assert_eq!(config.batch.max_units, Some(300));
        assert!(config.batch.symmetric_curve);
        assert_eq!(config.ui.fps, 60);
        assert_eq!(config.wallet.starting_balance, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_frame_interval() {
        let mut config = Config::default();
        assert_eq!(config.frame_interval_ms(), 16);

        config.ui.fps = 10;
        assert_eq!(config.frame_interval_ms(), 100);
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let mut config = Config::default();
        config.ui.fps = 0;
        assert!(matches!(config.validate(), Err(CoinError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_range() {
        let mut config = Config::default();
        config.batch.duration_range = [f64::NAN, 10.0];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duration_range"));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();

        assert!(toml_str.contains("[batch]"));
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("[wallet]"));
        assert!(toml_str.contains("total_quantity = 1000"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [batch]
            total_quantity = 42

            [ui]
            fps = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.batch.total_quantity, 42);
        assert_eq!(config.batch.increment, BatchConfig::DEFAULT.increment);
        assert_eq!(config.ui.fps, 30);
        assert_eq!(config.ui.coin_glyph, '●');
        assert_eq!(config.wallet.label, "Wallet");
    }

    #[test]
    fn test_load_creates_default_then_reads_it_back() {
        let path = scratch_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let created = Config::load(path.to_str()).unwrap();
        assert!(path.exists());

        let loaded = Config::load(path.to_str()).unwrap();
        assert_eq!(loaded.batch.total_quantity, created.batch.total_quantity);
        assert_eq!(loaded.ui.coin_glyph, created.ui.coin_glyph);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = scratch_path("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[batch\ntotal_quantity = ").unwrap();

        assert!(matches!(
            Config::load(path.to_str()),
            Err(CoinError::TomlParse(_))
        ));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
