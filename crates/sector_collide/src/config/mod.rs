//! Configuration system
//!
//! [`Config`] gives any serde type TOML/RON file loading keyed on the file
//! extension. [`CollisionConfig`] holds the construction parameters of a
//! [`CollisionSystem`](crate::physics::CollisionSystem); they are chosen
//! once and never resized.

pub use serde::{Deserialize, Serialize};

use crate::foundation::collections::MAX_COLLIDERS;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Construction parameters for a collision system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Number of collider slots in the arena
    pub collider_capacity: usize,

    /// Number of spatial hash buckets
    pub bucket_count: usize,

    /// Maximum number of simultaneously active trigger contacts
    pub max_contacts: usize,

    /// Penetration (meters) tolerated before two boxes count as overlapping
    /// in movement and trigger tests
    pub slop: f32,

    /// Report a `Stay` event for every continuing trigger contact
    pub report_stay_events: bool,

    /// Initial uniform meters-to-display scale
    pub meters_to_display_scale: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            collider_capacity: MAX_COLLIDERS,
            bucket_count: 1024,
            max_contacts: 1024,
            slop: 1.0e-4,
            report_stay_events: false,
            meters_to_display_scale: 1.0,
        }
    }
}

impl CollisionConfig {
    /// Largest value accepted for each capacity
    pub const MAX_CAPACITY: usize = MAX_COLLIDERS;

    /// Create a configuration with explicit capacities and default tuning
    pub fn with_capacities(collider_capacity: usize, bucket_count: usize, max_contacts: usize) -> Self {
        Self {
            collider_capacity,
            bucket_count,
            max_contacts,
            ..Default::default()
        }
    }

    /// Set the overlap tolerance
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop;
        self
    }

    /// Enable or disable `Stay` events
    pub fn with_stay_events(mut self, enabled: bool) -> Self {
        self.report_stay_events = enabled;
        self
    }

    /// Set the initial meters-to-display scale
    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.meters_to_display_scale = scale;
        self
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity("collider_capacity", self.collider_capacity)?;
        check_capacity("bucket_count", self.bucket_count)?;
        check_capacity("max_contacts", self.max_contacts)?;

        if !(self.slop >= 0.0 && self.slop.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "slop",
                reason: format!("must be a finite value >= 0, got {}", self.slop),
            });
        }
        if !self.meters_to_display_scale.is_finite() {
            return Err(ConfigError::Invalid {
                field: "meters_to_display_scale",
                reason: format!("must be finite, got {}", self.meters_to_display_scale),
            });
        }
        Ok(())
    }
}

impl Config for CollisionConfig {}

fn check_capacity(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 || value > CollisionConfig::MAX_CAPACITY {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be in 1..={}, got {}", CollisionConfig::MAX_CAPACITY, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CollisionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_capacity_bounds() {
        let too_big = CollisionConfig::with_capacities(2048, 16, 16);
        assert!(matches!(
            too_big.validate(),
            Err(ConfigError::Invalid { field: "collider_capacity", .. })
        ));

        let empty = CollisionConfig::with_capacities(16, 0, 16);
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::Invalid { field: "bucket_count", .. })
        ));
    }

    #[test]
    fn test_negative_slop_rejected() {
        let config = CollisionConfig::default().with_slop(-0.5);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "slop", .. })));
    }

    #[test]
    fn test_parse_toml_and_ron() {
        let toml_text = "collider_capacity = 64\nbucket_count = 128\nreport_stay_events = true\n";
        let config = CollisionConfig::from_str_with_format(toml_text, "collision.toml").unwrap();
        assert_eq!(config.collider_capacity, 64);
        assert_eq!(config.bucket_count, 128);
        assert!(config.report_stay_events);
        // unspecified fields fall back to defaults
        assert_eq!(config.max_contacts, 1024);

        let ron_text = "(max_contacts: 32, slop: 0.0)";
        let config = CollisionConfig::from_str_with_format(ron_text, "collision.ron").unwrap();
        assert_eq!(config.max_contacts, 32);
        assert_eq!(config.slop, 0.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = CollisionConfig::from_str_with_format("{}", "collision.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
