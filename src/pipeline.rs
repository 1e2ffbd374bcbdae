//! The per-frame head-pose-to-gesture pipeline.

use crate::{
    config::Config,
    landmarks::FaceLandmarks,
    movement::{Movement, MovementClassifier},
    pose_estimation::{Orientation, PoseEstimator},
    stabilizer::Stabilizer,
};
use std::time::Duration;

/// Result of one frame pass.
///
/// `orientation` being `None` means no usable face this frame, a distinct
/// condition from a face that classified as neutral (`orientation` present,
/// `movement` absent). Callers use the distinction to drive a "face not
/// detected" indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Recovered head orientation, if the pose solve succeeded
    pub orientation: Option<Orientation>,
    /// Raw per-frame classification
    pub movement: Option<Movement>,
    /// Debounced emission; act on this
    pub command: Option<Movement>,
}

impl FrameResult {
    /// Whether a usable face was seen this frame.
    #[must_use]
    pub fn face_visible(&self) -> bool {
        self.orientation.is_some()
    }
}

/// Estimator, classifier and stabilizer wired in sequence.
///
/// Single-threaded and synchronous: one call per captured frame, in
/// frame-acquisition order. No call blocks or suspends; the only carried
/// state is the stabilizer's, owned here exclusively.
pub struct GesturePipeline {
    estimator: PoseEstimator,
    classifier: MovementClassifier,
    stabilizer: Stabilizer<Movement>,
}

impl GesturePipeline {
    /// Build a pipeline from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            estimator: PoseEstimator::new(config.solver),
            classifier: MovementClassifier::from_config(&config.detection),
            stabilizer: Stabilizer::new(
                Duration::from_secs_f64(config.stabilizer.min_repeat_interval_secs),
                Duration::from_secs_f64(config.stabilizer.min_hold_secs),
            ),
        }
    }

    /// Run one frame through estimate, classify and stabilize.
    ///
    /// Absorbs both "no face" (`landmarks` is `None`) and "pose solve
    /// failed"; neither condition is an error and neither can crash the
    /// frame loop.
    pub fn process(
        &mut self,
        landmarks: Option<&FaceLandmarks>,
        frame_width: u32,
        frame_height: u32,
        now: Duration,
    ) -> FrameResult {
        let orientation = landmarks.and_then(|lm| self.estimator.estimate(lm, frame_width, frame_height));
        let movement = self.classifier.classify(orientation.as_ref());
        let command = self.stabilizer.observe(movement, now);

        if let Some(command) = command {
            log::debug!("stabilized movement: {}", command.as_str());
        }

        FrameResult {
            orientation,
            movement,
            command,
        }
    }

    /// Clear the stabilizer's carried state.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
    }
}
