//! Batch configuration and its override merge

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;

/// Tunables for one batch of coins.
///
/// Ranges are `[low, high]` pairs sampled uniformly per unit; a descending
/// pair is accepted and sampled the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Opaque label handed through to every unit
    pub container: Option<String>,

    /// Quantity the whole batch represents
    pub total_quantity: i64,

    /// Quantity per unit before capping
    pub increment: i64,

    /// Upper bound on unit count; `None` means no limit
    pub max_units: Option<i64>,

    /// Start delay per unit, milliseconds
    pub delay_range: [f64; 2],

    /// Flight duration per unit, milliseconds
    pub duration_range: [f64; 2],

    /// Control point distance as a fraction of the flight distance
    pub curve_intensity_range: [f64; 2],

    /// Control point angle offset, radians
    pub curve_angle_range: [f64; 2],

    /// Mirror the end angle off the start angle instead of drawing both
    pub symmetric_curve: bool,

    pub easing: Easing,

    /// Seed for reproducible trajectories
    pub seed: Option<u64>,
}

impl BatchConfig {
    pub const DEFAULT: BatchConfig = BatchConfig {
        container: None,
        total_quantity: 500,
        increment: 10,
        max_units: None,
        delay_range: [100.0, 1000.0],
        duration_range: [400.0, 1200.0],
        curve_intensity_range: [0.0, 1.0],
        curve_angle_range: [-FRAC_PI_2, FRAC_PI_2],
        symmetric_curve: false,
        easing: Easing::CubicIn,
        seed: None,
    };
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Optional replacements for individual [`BatchConfig`] fields
#[derive(Debug, Clone, Default)]
pub struct BatchOverrides {
    pub container: Option<String>,
    pub total_quantity: Option<i64>,
    pub increment: Option<i64>,
    pub max_units: Option<i64>,
    pub delay_range: Option<[f64; 2]>,
    pub duration_range: Option<[f64; 2]>,
    pub curve_intensity_range: Option<[f64; 2]>,
    pub curve_angle_range: Option<[f64; 2]>,
    pub symmetric_curve: Option<bool>,
    pub easing: Option<Easing>,
    pub seed: Option<u64>,
}

impl BatchOverrides {
    /// Fresh config: `base` with every set override applied
    pub fn apply(&self, base: &BatchConfig) -> BatchConfig {
        BatchConfig {
            container: self.container.clone().or_else(|| base.container.clone()),
            total_quantity: self.total_quantity.unwrap_or(base.total_quantity),
            increment: self.increment.unwrap_or(base.increment),
            max_units: self.max_units.or(base.max_units),
            delay_range: self.delay_range.unwrap_or(base.delay_range),
            duration_range: self.duration_range.unwrap_or(base.duration_range),
            curve_intensity_range: self
                .curve_intensity_range
                .unwrap_or(base.curve_intensity_range),
            curve_angle_range: self.curve_angle_range.unwrap_or(base.curve_angle_range),
            symmetric_curve: self.symmetric_curve.unwrap_or(base.symmetric_curve),
            easing: self.easing.unwrap_or(base.easing),
            seed: self.seed.or(base.seed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_none()
            && self.total_quantity.is_none()
            && self.increment.is_none()
            && self.max_units.is_none()
            && self.delay_range.is_none()
            && self.duration_range.is_none()
            && self.curve_intensity_range.is_none()
            && self.curve_angle_range.is_none()
            && self.symmetric_curve.is_none()
            && self.easing.is_none()
            && self.seed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();

        assert_eq!(config.total_quantity, 500);
        assert_eq!(config.increment, 10);
        assert!(config.max_units.is_none());
        assert_eq!(config.duration_range, [400.0, 1200.0]);
        assert!(!config.symmetric_curve);
        assert!(matches!(config.easing, Easing::CubicIn));
    }

    #[test]
    fn test_overrides_produce_fresh_config() {
        let base = BatchConfig::default();
        let overrides = BatchOverrides {
            total_quantity: Some(1000),
            max_units: Some(300),
            symmetric_curve: Some(true),
            ..Default::default()
        };

        let merged = overrides.apply(&base);

        assert_eq!(merged.total_quantity, 1000);
        assert_eq!(merged.max_units, Some(300));
        assert!(merged.symmetric_curve);
        assert_eq!(merged.increment, base.increment);
        assert_eq!(base.total_quantity, 500);
        assert!(base.max_units.is_none());
    }

    #[test]
    fn test_empty_overrides() {
        let overrides = BatchOverrides::default();
        assert!(overrides.is_empty());

        let merged = overrides.apply(&BatchConfig::DEFAULT);
        assert_eq!(merged.total_quantity, BatchConfig::DEFAULT.total_quantity);
        assert_eq!(merged.delay_range, BatchConfig::DEFAULT.delay_range);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BatchConfig = toml::from_str(
            r#"
            total_quantity = 1005
            increment = 20
            max_units = 300
            easing = "linear"
            delay_range = [0.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.total_quantity, 1005);
        assert_eq!(config.max_units, Some(300));
        assert_eq!(config.delay_range, [0.0, 0.0]);
        assert_eq!(config.duration_range, BatchConfig::DEFAULT.duration_range);
        assert!(matches!(config.easing, Easing::Linear));
    }
}
