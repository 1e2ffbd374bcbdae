//! Recorded landmark traces and their replay provider.
//!
//! A trace is the serialized output of a landmark model over a capture
//! session: per frame, the normalized six-point face (if one was found)
//! plus frame dimensions and a timestamp. Replaying a trace drives the
//! whole pipeline deterministically with no camera or ML runtime attached.

use crate::{
    landmarks::{FaceLandmarks, LandmarkProvider},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// One recorded frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Seconds since capture started
    pub t: f64,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Normalized face landmarks, absent when no face was found
    #[serde(default)]
    pub face: Option<TraceFace>,
}

impl TraceFrame {
    /// The frame's capture offset.
    #[must_use]
    pub fn timestamp(&self) -> Duration {
        Duration::from_secs_f64(self.t)
    }
}

/// Normalized `(0, 1)` landmark coordinates for one face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFace {
    /// Tip of the nose
    pub nose_tip: [f64; 2],
    /// Bottom of the chin
    pub chin: [f64; 2],
    /// Outer corner of the left eye
    pub left_eye_corner: [f64; 2],
    /// Outer corner of the right eye
    pub right_eye_corner: [f64; 2],
    /// Left corner of the mouth
    pub left_mouth_corner: [f64; 2],
    /// Right corner of the mouth
    pub right_mouth_corner: [f64; 2],
}

impl TraceFace {
    /// Scale into pixel space for the given frame dimensions.
    #[must_use]
    pub fn to_landmarks(&self, frame_width: u32, frame_height: u32) -> FaceLandmarks {
        let as_tuple = |p: [f64; 2]| (p[0], p[1]);
        FaceLandmarks::from_normalized(
            [
                as_tuple(self.nose_tip),
                as_tuple(self.chin),
                as_tuple(self.left_eye_corner),
                as_tuple(self.right_eye_corner),
                as_tuple(self.left_mouth_corner),
                as_tuple(self.right_mouth_corner),
            ],
            frame_width,
            frame_height,
        )
    }
}

/// A full recorded capture session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkTrace {
    /// Recorded frames in capture order
    pub frames: Vec<TraceFrame>,
}

impl LandmarkTrace {
    /// Load and validate a trace from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Trace(format!("Failed to parse trace: {e}")))?;
        trace.validate()?;
        Ok(trace)
    }

    /// Check the trace is replayable: finite, non-negative, non-decreasing
    /// timestamps and nonzero frame dimensions.
    pub fn validate(&self) -> Result<()> {
        let mut previous = 0.0_f64;
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.t.is_finite() || frame.t < 0.0 {
                return Err(Error::Trace(format!("frame {index} has an invalid timestamp {}", frame.t)));
            }
            if frame.t < previous {
                return Err(Error::Trace(format!(
                    "frame {index} goes back in time ({} < {previous})",
                    frame.t
                )));
            }
            if frame.width == 0 || frame.height == 0 {
                return Err(Error::Trace(format!(
                    "frame {index} has empty dimensions {}x{}",
                    frame.width, frame.height
                )));
            }
            previous = frame.t;
        }
        Ok(())
    }
}

/// [`LandmarkProvider`] that reads landmarks back out of trace frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceLandmarkProvider;

impl LandmarkProvider for TraceLandmarkProvider {
    type Frame = TraceFrame;

    fn extract_six_points(&mut self, frame: &TraceFrame) -> Result<Option<FaceLandmarks>> {
        Ok(frame.face.as_ref().map(|face| face.to_landmarks(frame.width, frame.height)))
    }
}
