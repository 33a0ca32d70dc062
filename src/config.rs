use std::path::Path;

use anyhow::{Context, Result};
use planar_electrical::Classification;
use planar_geometry::Point;
use planar_spiral::Allocation;
use serde::Deserialize;

/// Winding request as read from a YAML or JSON file. Every field is optional
/// so that command-line flags can fill in or override any of them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanarConfig {
    pub center: Option<Point>,
    pub inner_radius: Option<f64>,
    pub outer_radius: Option<f64>,
    pub turns: Option<usize>,
    pub spacing: Option<f64>,
    /// Working voltage; the creepage for it becomes a lower bound on `spacing`.
    pub voltage: Option<f64>,
    pub classification: Option<Classification>,
    pub corner_radius: Option<f64>,
    pub min_trace_width: Option<f64>,
    pub allocation: Option<Allocation>,
    /// Copper thickness in mm; takes precedence over `copper_weight`.
    pub thickness: Option<f64>,
    /// Copper weight in oz.
    pub copper_weight: Option<f64>,
    pub temperature: Option<f64>,
}

impl PlanarConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON configuration: {path:?}"))
        } else {
            serde_yaml::from_str(content)
                .with_context(|| format!("Failed to parse YAML configuration: {path:?}"))
        }
    }

    /// Fields set in `overrides` replace the ones in `self`.
    #[must_use]
    pub fn merge(self, overrides: PlanarConfig) -> Self {
        Self {
            center: overrides.center.or(self.center),
            inner_radius: overrides.inner_radius.or(self.inner_radius),
            outer_radius: overrides.outer_radius.or(self.outer_radius),
            turns: overrides.turns.or(self.turns),
            spacing: overrides.spacing.or(self.spacing),
            voltage: overrides.voltage.or(self.voltage),
            classification: overrides.classification.or(self.classification),
            corner_radius: overrides.corner_radius.or(self.corner_radius),
            min_trace_width: overrides.min_trace_width.or(self.min_trace_width),
            allocation: overrides.allocation.or(self.allocation),
            thickness: overrides.thickness.or(self.thickness),
            copper_weight: overrides.copper_weight.or(self.copper_weight),
            temperature: overrides.temperature.or(self.temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn parses_yaml_and_json() {
        let yaml = PlanarConfig::parse(
            "inner_radius: 6\nouter_radius: 12\nturns: 3\nclassification: B2\nallocation: uniform\n",
            &PathBuf::from("winding.yaml"),
        )
        .unwrap();
        let json = PlanarConfig::parse(
            r#"{"inner_radius": 6, "outer_radius": 12, "turns": 3, "classification": "B2", "allocation": "uniform"}"#,
            &PathBuf::from("winding.JSON"),
        )
        .unwrap();
        assert_eq!(yaml, json);
        assert_eq!(yaml.allocation, Some(Allocation::Uniform));
        assert_eq!(yaml.spacing, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PlanarConfig::parse("radius: 3\n", &PathBuf::from("w.yml")).unwrap_err();
        assert!(format!("{err:#}").contains("YAML"));
    }

    #[test]
    fn overrides_win() {
        let file = PlanarConfig {
            inner_radius: Some(6.0),
            turns: Some(3),
            ..PlanarConfig::default()
        };
        let flags = PlanarConfig {
            turns: Some(5),
            spacing: Some(0.3),
            ..PlanarConfig::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.inner_radius, Some(6.0));
        assert_eq!(merged.turns, Some(5));
        assert_eq!(merged.spacing, Some(0.3));
    }
}
