//! Validation policy.

use serde::{Deserialize, Serialize};
use strokeguard_core::{ConfigError, ConfigResult};

/// Thresholds a log must meet before it may touch a trusted surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPolicy {
    /// Smallest accepted circle radius
    pub min_brush_size: u32,
    /// Whether literal `#hex` and `rgb(...)` colors are accepted
    pub allow_exact_color: bool,
    /// Minimum average number of circles between color changes, if checked
    pub min_average_set_color_distance: Option<f64>,
}

impl ValidationPolicy {
    /// Create a policy
    #[must_use]
    pub fn new(min_brush_size: u32, allow_exact_color: bool) -> Self {
        Self {
            min_brush_size,
            allow_exact_color,
            min_average_set_color_distance: None,
        }
    }

    /// Enable the humanization check
    #[must_use]
    pub fn with_min_average_set_color_distance(mut self, minimum: f64) -> Self {
        self.min_average_set_color_distance = Some(minimum);
        self
    }

    /// Parse a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(ConfigError::from)
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_brush_size: 1,
            allow_exact_color: false,
            min_average_set_color_distance: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.min_brush_size, 1);
        assert!(!policy.allow_exact_color);
        assert!(policy.min_average_set_color_distance.is_none());
    }

    #[test]
    fn test_policy_builder() {
        let policy = ValidationPolicy::new(5, true).with_min_average_set_color_distance(20.0);
        assert_eq!(policy.min_brush_size, 5);
        assert!(policy.allow_exact_color);
        assert_eq!(policy.min_average_set_color_distance, Some(20.0));
    }

    #[test]
    fn test_policy_from_json() {
        let policy = ValidationPolicy::from_json(
            r#"{"minBrushSize": 3, "allowExactColor": true, "minAverageSetColorDistance": 12}"#,
        )
        .unwrap();
        assert_eq!(policy, ValidationPolicy::new(3, true).with_min_average_set_color_distance(12.0));
    }

    #[test]
    fn test_policy_from_json_defaults_missing_fields() {
        let policy = ValidationPolicy::from_json(r#"{"minBrushSize": 2}"#).unwrap();
        assert_eq!(policy.min_brush_size, 2);
        assert!(!policy.allow_exact_color);
        assert!(policy.min_average_set_color_distance.is_none());
    }

    #[test]
    fn test_policy_from_json_invalid() {
        assert!(matches!(
            ValidationPolicy::from_json(r#"{"minBrushSize": "big"}"#),
            Err(ConfigError::Parse { .. })
        ));
    }
}
