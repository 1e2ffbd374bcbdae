//! Configuration management for the head movement media control
//! application

use crate::{dispatch::CommandMap, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Movement detection thresholds
    pub detection: DetectionConfig,

    /// Pose solver settings
    pub solver: SolverConfig,

    /// Debounce settings for emitted movements
    pub stabilizer: StabilizerConfig,

    /// Movement-to-action mapping
    pub commands: CommandMap,

    /// Hand gesture volume control settings
    pub volume: VolumeConfig,
}

/// Movement detection thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Yaw angle beyond which a turn counts as a movement (degrees)
    pub yaw_threshold_deg: f64,

    /// Pitch angle beyond which a tilt counts as a movement (degrees)
    pub pitch_threshold_deg: f64,
}

/// Pose solver settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Iteration budget for the reprojection solve
    pub max_iterations: usize,

    /// Convergence tolerance
    pub tolerance: f64,
}

/// Debounce settings for emitted movements
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StabilizerConfig {
    /// Minimum interval before the same movement is emitted again (seconds)
    pub min_repeat_interval_secs: f64,

    /// How long a movement must be sustained before its first emission
    /// (seconds); zero disables the hold gate
    pub min_hold_secs: f64,
}

/// Hand gesture volume control settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Thumb-index pinch distance mapped to full volume (pixels)
    pub pinch_span_px: f64,

    /// Assumed system volume level at startup (0.0-1.0)
    pub initial_level: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            yaw_threshold_deg: crate::constants::DEFAULT_YAW_THRESHOLD_DEG,
            pitch_threshold_deg: crate::constants::DEFAULT_PITCH_THRESHOLD_DEG,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: crate::constants::DEFAULT_SOLVER_MAX_ITERATIONS,
            tolerance: crate::constants::DEFAULT_SOLVER_TOLERANCE,
        }
    }
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            min_repeat_interval_secs: crate::constants::DEFAULT_MIN_REPEAT_INTERVAL_SECS,
            min_hold_secs: crate::constants::DEFAULT_MIN_HOLD_SECS,
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            pinch_span_px: crate::constants::DEFAULT_PINCH_SPAN_PX,
            initial_level: crate::constants::DEFAULT_VOLUME_LEVEL,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.detection.yaw_threshold_deg.is_finite() && self.detection.yaw_threshold_deg > 0.0) {
            return Err(Error::ConfigError(
                "Yaw threshold must be a positive number of degrees".to_string(),
            ));
        }
        if !(self.detection.pitch_threshold_deg.is_finite() && self.detection.pitch_threshold_deg > 0.0) {
            return Err(Error::ConfigError(
                "Pitch threshold must be a positive number of degrees".to_string(),
            ));
        }

        if self.solver.max_iterations == 0 {
            return Err(Error::ConfigError(
                "Solver iteration budget must be greater than 0".to_string(),
            ));
        }
        if !(self.solver.tolerance.is_finite() && self.solver.tolerance > 0.0) {
            return Err(Error::ConfigError("Solver tolerance must be positive".to_string()));
        }

        if !(self.stabilizer.min_repeat_interval_secs.is_finite() && self.stabilizer.min_repeat_interval_secs >= 0.0) {
            return Err(Error::ConfigError(
                "Minimum repeat interval must be zero or more seconds".to_string(),
            ));
        }
        if !(self.stabilizer.min_hold_secs.is_finite() && self.stabilizer.min_hold_secs >= 0.0) {
            return Err(Error::ConfigError(
                "Minimum hold duration must be zero or more seconds".to_string(),
            ));
        }

        if !(self.volume.pinch_span_px.is_finite() && self.volume.pinch_span_px > 0.0) {
            return Err(Error::ConfigError("Pinch span must be a positive pixel distance".to_string()));
        }
        if !(0.0..=1.0).contains(&self.volume.initial_level) {
            return Err(Error::ConfigError(
                "Initial volume level must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Movement Media Control Configuration

# Movement detection thresholds
detection:
  yaw_threshold_deg: 20.0
  pitch_threshold_deg: 15.0

# Pose solver settings
solver:
  max_iterations: 60
  tolerance: 1e-12

# Debounce settings
stabilizer:
  min_repeat_interval_secs: 3.0
  min_hold_secs: 0.0

# Movement-to-action mapping
# Recognized actions: next_track, previous_track, play_pause, mute, none
commands:
  right: next_track
  left: previous_track
  up: play_pause
  down: play_pause

# Hand gesture volume control
volume:
  pinch_span_px: 300.0
  initial_level: 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MappedAction;

    #[test]
    fn test_defaults_match_documented_options() {
        let config = Config::default();
        assert_eq!(config.detection.yaw_threshold_deg, 20.0);
        assert_eq!(config.detection.pitch_threshold_deg, 15.0);
        assert_eq!(config.stabilizer.min_repeat_interval_secs, 3.0);
        assert_eq!(config.stabilizer.min_hold_secs, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.commands.right, MappedAction::NextTrack);
        assert_eq!(config.commands.down, MappedAction::PlayPause);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_yaml::from_str("detection:\n  yaw_threshold_deg: 30.0\n  pitch_threshold_deg: 10.0\n").unwrap();
        assert_eq!(config.detection.yaw_threshold_deg, 30.0);
        assert_eq!(config.stabilizer.min_repeat_interval_secs, 3.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.detection.yaw_threshold_deg = -5.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.solver.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.stabilizer.min_repeat_interval_secs = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.volume.initial_level = 1.5;
        assert!(config.validate().is_err());
    }
}
