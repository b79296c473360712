mod defaults;

use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use coulomblab::core::sampling::overlay::OverlayMode;
use coulomblab::engine::config::{LabConfig, LabConfigBuilder};
use coulomblab::engine::error::EngineError;
use defaults::DefaultsConfig;
use nalgebra::Point2;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStoreConfig {
    capacity: Option<usize>,
    #[serde(rename = "default-magnitude")]
    default_magnitude: Option<f64>,
    /// `[x, y]` in the file, `X,Y` on the command line.
    #[serde(rename = "default-position")]
    default_position: Option<[f64; 2]>,
    #[serde(rename = "marker-size")]
    marker_size: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOverlayConfig {
    #[serde(rename = "vector-step")]
    vector_step: Option<f64>,
    #[serde(rename = "vector-scale")]
    vector_scale: Option<f64>,
    #[serde(rename = "scalar-step")]
    scalar_step: Option<f64>,
    #[serde(rename = "potential-normalization")]
    potential_normalization: Option<f64>,
}

/// The lab configuration as written in a file, every key optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialLabConfig {
    store: Option<PartialStoreConfig>,
    overlay: Option<PartialOverlayConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialLabConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, or starts empty when none was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers `--set` values and a per-mode `--step` flag over the file, fills the rest
    /// from the defaults and validates the result.
    pub fn merge_with_cli(
        mut self,
        args: &ConfigArgs,
        step_override: Option<(OverlayMode, f64)>,
    ) -> Result<LabConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let store = self.store.unwrap_or_default();
        let mut overlay = self.overlay.unwrap_or_default();

        match step_override {
            Some((OverlayMode::Vector, step)) => overlay.vector_step = Some(step),
            Some((OverlayMode::Scalar, step)) => overlay.scalar_step = Some(step),
            None => {}
        }

        let default_position = store
            .default_position
            .map_or(defaults.default_position, |[x, y]| Point2::new(x, y));

        let config = LabConfigBuilder::new()
            .capacity(store.capacity.unwrap_or(defaults.capacity))
            .default_magnitude(store.default_magnitude.unwrap_or(defaults.default_magnitude))
            .default_position(default_position)
            .marker_size(store.marker_size.unwrap_or(defaults.marker_size))
            .vector_step(overlay.vector_step.unwrap_or(defaults.vector_step))
            .vector_scale(overlay.vector_scale.unwrap_or(defaults.vector_scale))
            .scalar_step(overlay.scalar_step.unwrap_or(defaults.scalar_step))
            .potential_normalization(
                overlay
                    .potential_normalization
                    .unwrap_or(defaults.potential_normalization),
            )
            .build()
            .map_err(EngineError::from)?;
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;
            let key = key.trim();

            match key {
                "store.capacity" => {
                    self.store.get_or_insert_with(Default::default).capacity =
                        Some(parse_value(key, value, "integer")?);
                }
                "store.default-magnitude" => {
                    self.store
                        .get_or_insert_with(Default::default)
                        .default_magnitude = Some(parse_value(key, value, "float")?);
                }
                "store.default-position" => {
                    let point = parser::parse_point(value).map_err(|e| {
                        CliError::Config(format!("Invalid point value for {}: {}", key, e))
                    })?;
                    self.store
                        .get_or_insert_with(Default::default)
                        .default_position = Some([point.x, point.y]);
                }
                "store.marker-size" => {
                    self.store.get_or_insert_with(Default::default).marker_size =
                        Some(parse_value(key, value, "float")?);
                }
                "overlay.vector-step" => {
                    self.overlay.get_or_insert_with(Default::default).vector_step =
                        Some(parse_value(key, value, "float")?);
                }
                "overlay.vector-scale" => {
                    self.overlay.get_or_insert_with(Default::default).vector_scale =
                        Some(parse_value(key, value, "float")?);
                }
                "overlay.scalar-step" => {
                    self.overlay.get_or_insert_with(Default::default).scalar_step =
                        Some(parse_value(key, value, "float")?);
                }
                "overlay.potential-normalization" => {
                    self.overlay
                        .get_or_insert_with(Default::default)
                        .potential_normalization = Some(parse_value(key, value, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn set(values: &[&str]) -> ConfigArgs {
        ConfigArgs {
            config: None,
            set_values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn missing_file_section_falls_back_to_defaults() {
        let config = PartialLabConfig::default()
            .merge_with_cli(&set(&[]), None)
            .unwrap();
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn file_values_are_loaded_and_merged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lab.toml");
        fs::write(
            &path,
            r#"
            [store]
            capacity = 8
            marker-size = 10.0

            [overlay]
            vector-step = 20.0
            "#,
        )
        .unwrap();

        let config = PartialLabConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&set(&[]), None)
            .unwrap();
        assert_eq!(config.store.capacity, 8);
        assert_eq!(config.store.marker_size, 10.0);
        assert_eq!(config.store.default_magnitude, 10.0);
        assert_eq!(config.overlay.vector_step, 20.0);
        assert_eq!(config.overlay.scalar_step, 12.0);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lab.toml");
        fs::write(&path, "[overlay]\narrow-length = 3.0\n").unwrap();
        assert!(matches!(
            PartialLabConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn set_values_override_file_and_step_flag_overrides_both() {
        let partial: PartialLabConfig =
            toml::from_str("[overlay]\nscalar-step = 6.0\nvector-step = 25.0\n").unwrap();
        let config = partial
            .merge_with_cli(
                &set(&["overlay.scalar-step=4", "store.capacity = 2"]),
                Some((OverlayMode::Vector, 15.0)),
            )
            .unwrap();
        assert_eq!(config.overlay.scalar_step, 4.0);
        assert_eq!(config.overlay.vector_step, 15.0);
        assert_eq!(config.store.capacity, 2);
    }

    #[test]
    fn malformed_set_values_are_config_errors() {
        for bad in ["overlay.vector-step", "overlay.vector-step=fast", "store.colour=red"] {
            let result = PartialLabConfig::default().merge_with_cli(&set(&[bad]), None);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn invalid_values_fail_validation() {
        let result = PartialLabConfig::default()
            .merge_with_cli(&set(&["overlay.scalar-step=0"]), None);
        let Err(CliError::Core(EngineError::Config { source })) = result else {
            panic!("expected a config error");
        };
        assert!(source.to_string().contains("scalar-step"));
    }

    #[test]
    fn default_position_comes_from_file_or_set() {
        let partial: PartialLabConfig =
            toml::from_str("[store]
default-position = [40.0, 60.0]
").unwrap();
        let config = partial.merge_with_cli(&set(&[]), None).unwrap();
        assert_eq!(config.store.default_position, Point2::new(40.0, 60.0));

        let partial: PartialLabConfig =
            toml::from_str("[store]
default-position = [40.0, 60.0]
").unwrap();
        let config = partial
            .merge_with_cli(&set(&["store.default-position=120, 80"]), None)
            .unwrap();
        assert_eq!(config.store.default_position, Point2::new(120.0, 80.0));
    }

    #[test]
    fn malformed_default_position_is_a_config_error() {
        for bad in ["store.default-position=120", "store.default-position=a,b"] {
            let result = PartialLabConfig::default().merge_with_cli(&set(&[bad]), None);
            assert!(matches!(result, Err(CliError::Config(_))), "{bad}");
        }
    }
}
