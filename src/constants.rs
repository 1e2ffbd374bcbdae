//! Constants used throughout the application

/// Number of facial landmarks consumed per frame
pub const NUM_FACE_LANDMARKS: usize = 6;

/// Number of hand landmarks consumed per frame
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Camera matrix center factor
pub const CAMERA_CENTER_FACTOR: f64 = 2.0;

/// Yaw angle beyond which a head turn counts as a movement (degrees)
pub const DEFAULT_YAW_THRESHOLD_DEG: f64 = 20.0;

/// Pitch angle beyond which a head tilt counts as a movement (degrees)
pub const DEFAULT_PITCH_THRESHOLD_DEG: f64 = 15.0;

/// Minimum interval before the same movement is emitted again (seconds)
pub const DEFAULT_MIN_REPEAT_INTERVAL_SECS: f64 = 3.0;

/// How long a movement must be sustained before its first emission
/// (seconds); zero disables the hold gate
pub const DEFAULT_MIN_HOLD_SECS: f64 = 0.0;

/// Iteration budget for the reprojection solve
pub const DEFAULT_SOLVER_MAX_ITERATIONS: usize = 60;

/// Convergence tolerance for the reprojection solve
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1e-12;

/// Relative step for finite-difference Jacobians
pub const NUMERIC_DIFF_STEP: f64 = 1e-6;

/// Minimum pixel distance between the eye corners for a solvable face
pub const MIN_EYE_SPAN_PX: f64 = 1e-3;

/// Delay between synthetic key press and release (milliseconds)
pub const KEY_TAP_DELAY_MS: u64 = 50;

/// Number of volume key taps covering the full 0.0-1.0 range
pub const VOLUME_KEY_STEPS: f64 = 10.0;

/// Smallest volume change worth forwarding to the dispatcher
pub const VOLUME_DELTA_MIN: f64 = 0.05;

/// Thumb-index pinch distance mapped to full volume (pixels)
pub const DEFAULT_PINCH_SPAN_PX: f64 = 300.0;

/// Assumed system volume level at startup
pub const DEFAULT_VOLUME_LEVEL: f64 = 0.5;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
