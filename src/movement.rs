//! Classification of head orientations into discrete movement symbols.

use crate::{
    config::DetectionConfig,
    pose_estimation::Orientation,
};

/// A discrete head movement. "No confident gesture" is represented by the
/// absence of a movement, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Head turned right (positive yaw)
    Right,
    /// Head turned left (negative yaw)
    Left,
    /// Head tilted up (negative pitch)
    Up,
    /// Head tilted down (positive pitch)
    Down,
}

impl Movement {
    /// Lowercase name, for logs and config keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Threshold-based movement classifier.
///
/// Pure and stateless: the same orientation always yields the same symbol.
/// Hysteresis is deliberately absent here; repeated emissions are gated by
/// time in the stabilizer, not by angle.
#[derive(Debug, Clone, Copy)]
pub struct MovementClassifier {
    yaw_threshold: f64,
    pitch_threshold: f64,
}

impl MovementClassifier {
    /// Create a classifier with thresholds in degrees.
    #[must_use]
    pub fn new(yaw_threshold_deg: f64, pitch_threshold_deg: f64) -> Self {
        Self {
            yaw_threshold: yaw_threshold_deg,
            pitch_threshold: pitch_threshold_deg,
        }
    }

    /// Create a classifier from the detection configuration.
    #[must_use]
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.yaw_threshold_deg, config.pitch_threshold_deg)
    }

    /// Map an orientation to a movement symbol.
    ///
    /// Yaw is evaluated first: a head that is both turned and tilted reads
    /// as a turn. A missing orientation classifies as no movement.
    #[must_use]
    pub fn classify(&self, orientation: Option<&Orientation>) -> Option<Movement> {
        let orientation = orientation?;

        if orientation.yaw > self.yaw_threshold {
            return Some(Movement::Right);
        }
        if orientation.yaw < -self.yaw_threshold {
            return Some(Movement::Left);
        }

        if orientation.pitch > self.pitch_threshold {
            return Some(Movement::Down);
        }
        if orientation.pitch < -self.pitch_threshold {
            return Some(Movement::Up);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orientation(yaw: f64, pitch: f64, roll: f64) -> Orientation {
        Orientation { yaw, pitch, roll }
    }

    fn classifier() -> MovementClassifier {
        MovementClassifier::new(20.0, 15.0)
    }

    #[test]
    fn test_classification_table() {
        let c = classifier();
        assert_eq!(c.classify(Some(&orientation(25.0, 0.0, 0.0))), Some(Movement::Right));
        assert_eq!(c.classify(Some(&orientation(-25.0, 0.0, 0.0))), Some(Movement::Left));
        assert_eq!(c.classify(Some(&orientation(0.0, 20.0, 0.0))), Some(Movement::Down));
        assert_eq!(c.classify(Some(&orientation(0.0, -20.0, 0.0))), Some(Movement::Up));
        assert_eq!(c.classify(Some(&orientation(0.0, 0.0, 0.0))), None);
    }

    #[test]
    fn test_yaw_beats_pitch() {
        let c = classifier();
        assert_eq!(c.classify(Some(&orientation(25.0, 20.0, 0.0))), Some(Movement::Right));
        assert_eq!(c.classify(Some(&orientation(-25.0, -20.0, 0.0))), Some(Movement::Left));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let c = classifier();
        // exactly at the threshold is not a movement
        assert_eq!(c.classify(Some(&orientation(20.0, 0.0, 0.0))), None);
        assert_eq!(c.classify(Some(&orientation(0.0, 15.0, 0.0))), None);
        assert_eq!(c.classify(Some(&orientation(0.0, -15.0, 0.0))), None);
    }

    #[test]
    fn test_missing_orientation() {
        assert_eq!(classifier().classify(None), None);
    }

    #[test]
    fn test_roll_is_ignored() {
        let c = classifier();
        assert_eq!(c.classify(Some(&orientation(0.0, 0.0, 90.0))), None);
    }

    #[test]
    fn test_pure_function() {
        let c = classifier();
        let o = orientation(25.0, 20.0, -3.0);
        let first = c.classify(Some(&o));
        for _ in 0..10 {
            assert_eq!(c.classify(Some(&o)), first);
        }
    }
}
