//! Facial landmark types and the provider seam.
//!
//! The pipeline consumes six named landmark positions per frame. Where they
//! come from (an ML face mesh, a recorded trace, a test fixture) is hidden
//! behind the [`LandmarkProvider`] trait, so nothing in the core depends on
//! a concrete vision library.

use crate::{constants::NUM_FACE_LANDMARKS, Result};
use nalgebra::Point2;

/// The six facial landmarks used for the pose solve, in pixel space.
///
/// Left/right are from the subject's perspective in a horizontally mirrored
/// (selfie-view) frame, matching what a webcam preview shows the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLandmarks {
    /// Tip of the nose
    pub nose_tip: Point2<f64>,
    /// Bottom of the chin
    pub chin: Point2<f64>,
    /// Outer corner of the left eye
    pub left_eye_corner: Point2<f64>,
    /// Outer corner of the right eye
    pub right_eye_corner: Point2<f64>,
    /// Left corner of the mouth
    pub left_mouth_corner: Point2<f64>,
    /// Right corner of the mouth
    pub right_mouth_corner: Point2<f64>,
}

impl FaceLandmarks {
    /// Create landmarks from pixel-space positions, ordered nose, chin,
    /// left eye, right eye, left mouth, right mouth.
    #[must_use]
    pub fn from_points(points: [Point2<f64>; NUM_FACE_LANDMARKS]) -> Self {
        let [nose_tip, chin, left_eye_corner, right_eye_corner, left_mouth_corner, right_mouth_corner] = points;
        Self {
            nose_tip,
            chin,
            left_eye_corner,
            right_eye_corner,
            left_mouth_corner,
            right_mouth_corner,
        }
    }

    /// Scale normalized `(0, 1)` coordinates (the usual face-mesh output)
    /// into pixel space using the frame dimensions.
    #[must_use]
    pub fn from_normalized(points: [(f64, f64); NUM_FACE_LANDMARKS], frame_width: u32, frame_height: u32) -> Self {
        let w = f64::from(frame_width);
        let h = f64::from(frame_height);
        Self::from_points(points.map(|(x, y)| Point2::new(x * w, y * h)))
    }

    /// Landmark positions in the order expected by the pose solve.
    #[must_use]
    pub fn as_points(&self) -> [Point2<f64>; NUM_FACE_LANDMARKS] {
        [
            self.nose_tip,
            self.chin,
            self.left_eye_corner,
            self.right_eye_corner,
            self.left_mouth_corner,
            self.right_mouth_corner,
        ]
    }

    /// Whether every coordinate is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_points()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Pixel distance between the two eye corners.
    #[must_use]
    pub fn eye_span(&self) -> f64 {
        nalgebra::distance(&self.left_eye_corner, &self.right_eye_corner)
    }
}

/// Capability interface for landmark extraction.
///
/// Implementations wrap whatever actually produces landmarks: a face-mesh
/// model over camera frames, a recorded trace, or a mock in tests. Returning
/// `Ok(None)` means "no usable face this frame" and is the normal quiet
/// path, not an error.
pub trait LandmarkProvider {
    /// The frame type the provider understands.
    type Frame;

    /// Extract the six pose landmarks from a frame, or `None` when no face
    /// is found.
    fn extract_six_points(&mut self, frame: &Self::Frame) -> Result<Option<FaceLandmarks>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontal() -> FaceLandmarks {
        FaceLandmarks::from_normalized(
            [
                (0.50, 0.45),
                (0.50, 0.72),
                (0.41, 0.38),
                (0.59, 0.38),
                (0.44, 0.58),
                (0.56, 0.58),
            ],
            640,
            360,
        )
    }

    #[test]
    fn test_normalized_scaling() {
        let lm = frontal();
        assert!((lm.nose_tip.x - 320.0).abs() < 1e-9);
        assert!((lm.nose_tip.y - 162.0).abs() < 1e-9);
        assert!((lm.chin.x - 320.0).abs() < 1e-9);
        assert!((lm.chin.y - 259.2).abs() < 1e-9);
    }

    #[test]
    fn test_point_order_matches_roles() {
        let lm = frontal();
        let points = lm.as_points();
        assert_eq!(points[0], lm.nose_tip);
        assert_eq!(points[1], lm.chin);
        assert_eq!(points[2], lm.left_eye_corner);
        assert_eq!(points[3], lm.right_eye_corner);
        assert_eq!(points[4], lm.left_mouth_corner);
        assert_eq!(points[5], lm.right_mouth_corner);
    }

    #[test]
    fn test_eye_span() {
        let lm = frontal();
        // 0.18 of 640 px between the eye corners, same height
        assert!((lm.eye_span() - 115.2).abs() < 1e-9);
    }

    #[test]
    fn test_finite_check() {
        let mut lm = frontal();
        assert!(lm.is_finite());
        lm.chin.y = f64::NAN;
        assert!(!lm.is_finite());
    }
}
