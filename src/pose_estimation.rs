//! Head pose estimation from six facial landmarks.
//!
//! Solves the perspective correspondence between a canonical 3D face model
//! and the observed 2D landmark positions, then reads yaw/pitch/roll off
//! the recovered rotation. The solve is an iterative minimization of pixel
//! reprojection error over an axis-angle rotation and a translation,
//! driven by Levenberg-Marquardt.

use crate::{
    config::SolverConfig,
    constants::{CAMERA_CENTER_FACTOR, EPSILON, MIN_EYE_SPAN_PX, NUMERIC_DIFF_STEP},
    landmarks::FaceLandmarks,
};
use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt};
use nalgebra::{storage::Owned, Matrix, OMatrix, OVector, Rotation3, Vector, Vector2, Vector3, Vector6, U12, U6};

/// Canonical face geometry in millimeters, camera-aligned axes (x right,
/// y down, z away from the camera), so a neutral frontal face solves to a
/// near-identity rotation. Order matches [`FaceLandmarks::as_points`].
const REFERENCE_FACE_MODEL: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],          // nose tip
    [0.0, 330.0, 65.0],       // chin
    [-225.0, -170.0, 135.0],  // left eye outer corner
    [225.0, -170.0, 135.0],   // right eye outer corner
    [-150.0, 150.0, 125.0],   // left mouth corner
    [150.0, 150.0, 125.0],    // right mouth corner
];

/// Distance between the model's eye corners, used to seed the solve depth.
const MODEL_EYE_SPAN_MM: f64 = 450.0;

/// The reference face model as vectors, in landmark order.
#[must_use]
pub fn reference_face_model() -> [Vector3<f64>; 6] {
    REFERENCE_FACE_MODEL.map(Vector3::from)
}

/// Mapping from XYZ Euler decomposition indices to semantic angles.
///
/// The decomposition's X angle reads as pitch and its Y angle as yaw, a
/// consequence of how the reference model is oriented relative to the
/// camera axes. Reordering these without retuning the movement thresholds
/// will gate on the wrong axis.
pub mod euler_axes {
    /// Decomposition index carrying the pitch angle
    pub const PITCH: usize = 0;
    /// Decomposition index carrying the yaw angle
    pub const YAW: usize = 1;
    /// Decomposition index carrying the roll angle
    pub const ROLL: usize = 2;
}

/// Head orientation in degrees.
///
/// Recomputed every frame; nothing here is smoothed or persisted. Angles
/// stay within (-180, 180].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation about the vertical axis; positive turns toward the right
    /// of the mirrored preview
    pub yaw: f64,
    /// Rotation about the lateral axis; positive tilts the head down
    pub pitch: f64,
    /// Rotation about the forward axis
    pub roll: f64,
}

impl Orientation {
    /// Relabel a raw XYZ decomposition into semantic angles via
    /// [`euler_axes`].
    #[must_use]
    pub fn from_euler_xyz(angles: [f64; 3]) -> Self {
        Self {
            yaw: angles[euler_axes::YAW],
            pitch: angles[euler_axes::PITCH],
            roll: angles[euler_axes::ROLL],
        }
    }
}

/// Pinhole camera intrinsics derived from the frame dimensions.
///
/// Focal length equals the frame width, the principal point sits at the
/// frame center, and lens distortion is assumed zero. Rebuilt every frame;
/// there is no persistent calibration.
#[derive(Debug, Clone, Copy)]
pub struct CameraModel {
    /// Horizontal focal length (pixels)
    pub fx: f64,
    /// Vertical focal length (pixels)
    pub fy: f64,
    /// Principal point x (pixels)
    pub cx: f64,
    /// Principal point y (pixels)
    pub cy: f64,
}

impl CameraModel {
    /// Build intrinsics for a frame of the given dimensions.
    #[must_use]
    pub fn from_frame(frame_width: u32, frame_height: u32) -> Self {
        let focal_length = f64::from(frame_width);
        Self {
            fx: focal_length,
            fy: focal_length,
            cx: f64::from(frame_width) / CAMERA_CENTER_FACTOR,
            cy: f64::from(frame_height) / CAMERA_CENTER_FACTOR,
        }
    }

    /// Project a camera-frame point to pixels; `None` for points at or
    /// behind the image plane.
    #[must_use]
    pub fn project(&self, point: &Vector3<f64>) -> Option<Vector2<f64>> {
        if point.z <= EPSILON {
            return None;
        }
        Some(Vector2::new(
            self.fx * point.x / point.z + self.cx,
            self.fy * point.y / point.z + self.cy,
        ))
    }
}

/// Reprojection problem over six point correspondences.
///
/// Parameters are `[rx, ry, rz, tx, ty, tz]`: a scaled-axis rotation and a
/// translation in millimeters. Residuals are the twelve pixel errors.
struct ReprojectionProblem {
    object: [Vector3<f64>; 6],
    observed: [Vector2<f64>; 6],
    camera: CameraModel,
    params: Vector6<f64>,
}

impl ReprojectionProblem {
    fn residuals_at(&self, params: &Vector6<f64>) -> Option<OVector<f64, U12>> {
        let rotation = Rotation3::from_scaled_axis(params.fixed_rows::<3>(0).into_owned());
        let translation = params.fixed_rows::<3>(3).into_owned();

        let mut residuals = OVector::<f64, U12>::zeros();
        for (i, point) in self.object.iter().enumerate() {
            let projected = self.camera.project(&(rotation * point + translation))?;
            residuals[2 * i] = projected.x - self.observed[i].x;
            residuals[2 * i + 1] = projected.y - self.observed[i].y;
        }
        Some(residuals)
    }
}

impl LeastSquaresProblem<f64, U12, U6> for ReprojectionProblem {
    type ResidualStorage = Owned<f64, U12>;
    type JacobianStorage = Owned<f64, U12, U6>;
    type ParameterStorage = Owned<f64, U6>;

    fn set_params(&mut self, params: &Vector<f64, U6, Self::ParameterStorage>) {
        self.params.copy_from(params);
    }

    fn params(&self) -> Vector<f64, U6, Self::ParameterStorage> {
        self.params
    }

    fn residuals(&self) -> Option<Vector<f64, U12, Self::ResidualStorage>> {
        self.residuals_at(&self.params)
    }

    fn jacobian(&self) -> Option<Matrix<f64, U12, U6, Self::JacobianStorage>> {
        // Central differences; twelve residuals over six parameters is too
        // small for analytic derivatives to pay off.
        let mut jacobian = OMatrix::<f64, U12, U6>::zeros();
        for col in 0..6 {
            let step = NUMERIC_DIFF_STEP * self.params[col].abs().max(1.0);
            let mut plus = self.params;
            plus[col] += step;
            let mut minus = self.params;
            minus[col] -= step;
            let delta = (self.residuals_at(&plus)? - self.residuals_at(&minus)?) / (2.0 * step);
            jacobian.set_column(col, &delta);
        }
        Some(jacobian)
    }
}

/// Head pose estimator over the fixed six-point reference model.
pub struct PoseEstimator {
    solver: SolverConfig,
}

impl PoseEstimator {
    /// Create an estimator with the given solver settings.
    #[must_use]
    pub fn new(solver: SolverConfig) -> Self {
        Self { solver }
    }

    /// Estimate the head orientation from one frame's landmarks.
    ///
    /// Returns `None` when the orientation is indeterminate: degenerate or
    /// non-finite landmarks, a solve that failed to converge, or a solution
    /// behind the camera. Callers treat that as "no usable face this
    /// frame", never as an error.
    #[must_use]
    pub fn estimate(
        &self,
        landmarks: &FaceLandmarks,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<Orientation> {
        if frame_width == 0 || frame_height == 0 {
            return None;
        }
        if !landmarks.is_finite() || landmarks.eye_span() < MIN_EYE_SPAN_PX {
            return None;
        }

        let camera = CameraModel::from_frame(frame_width, frame_height);
        let (rotation, translation) = self.solve_pose(landmarks, &camera)?;
        if translation.z <= 0.0 {
            log::debug!("pose solve placed the face behind the camera, discarding");
            return None;
        }

        Some(Orientation::from_euler_xyz(rotation_to_euler_xyz(&rotation)))
    }

    /// Run the reprojection solve, returning the recovered rotation and
    /// translation (millimeters, camera frame).
    #[must_use]
    pub fn solve_pose(
        &self,
        landmarks: &FaceLandmarks,
        camera: &CameraModel,
    ) -> Option<(Rotation3<f64>, Vector3<f64>)> {
        let observed = landmarks.as_points().map(|p| p.coords);

        // Seed with zero rotation and the nose-tip ray at the depth implied
        // by the eye span. The caller never supplies an extrinsic guess.
        let depth = camera.fx * MODEL_EYE_SPAN_MM / landmarks.eye_span();
        let mut params = Vector6::zeros();
        params[3] = (observed[0].x - camera.cx) * depth / camera.fx;
        params[4] = (observed[0].y - camera.cy) * depth / camera.fy;
        params[5] = depth;

        let problem = ReprojectionProblem {
            object: reference_face_model(),
            observed,
            camera: *camera,
            params,
        };

        let (problem, report) = LevenbergMarquardt::new()
            .with_ftol(self.solver.tolerance)
            .with_xtol(self.solver.tolerance)
            .with_gtol(self.solver.tolerance)
            .with_patience(self.solver.max_iterations.max(1))
            .minimize(problem);

        if !report.termination.was_successful() {
            log::debug!(
                "reprojection solve did not converge after {} evaluations: {:?}",
                report.number_of_evaluations,
                report.termination
            );
            return None;
        }

        let params = problem.params;
        if !params.iter().all(|v| v.is_finite()) {
            return None;
        }

        let rotation = Rotation3::from_scaled_axis(params.fixed_rows::<3>(0).into_owned());
        let translation = params.fixed_rows::<3>(3).into_owned();
        Some((rotation, translation))
    }
}

/// Decompose a rotation into intrinsic XYZ Euler angles, in degrees.
///
/// Returns the raw `[x, y, z]` angle triple; semantic relabeling happens in
/// [`Orientation::from_euler_xyz`].
#[must_use]
pub fn rotation_to_euler_xyz(rotation: &Rotation3<f64>) -> [f64; 3] {
    let m = rotation.matrix();

    let sin_y = m[(0, 2)].clamp(-1.0, 1.0);
    let theta_y = sin_y.asin();

    let (theta_x, theta_z) = if sin_y.abs() < 1.0 - EPSILON {
        ((-m[(1, 2)]).atan2(m[(2, 2)]), (-m[(0, 1)]).atan2(m[(0, 0)]))
    } else {
        // Gimbal lock: x and z rotations are indistinguishable, fold
        // everything into x.
        (m[(2, 1)].atan2(m[(1, 1)]), 0.0)
    };

    [theta_x.to_degrees(), theta_y.to_degrees(), theta_z.to_degrees()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point2, Vector3};

    fn intrinsic_xyz(x_deg: f64, y_deg: f64, z_deg: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians())
            * Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians())
            * Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians())
    }

    fn project_model(rotation: &Rotation3<f64>, translation: &Vector3<f64>, camera: &CameraModel) -> FaceLandmarks {
        let points = reference_face_model().map(|p| {
            let uv = camera.project(&(rotation * p + translation)).unwrap();
            Point2::new(uv.x, uv.y)
        });
        FaceLandmarks::from_points(points)
    }

    #[test]
    fn test_euler_identity() {
        let angles = rotation_to_euler_xyz(&Rotation3::identity());
        for angle in angles {
            assert!(angle.abs() < 1e-9);
        }
    }

    #[test]
    fn test_euler_roundtrip() {
        let rotation = intrinsic_xyz(-12.0, 25.0, 7.0);
        let angles = rotation_to_euler_xyz(&rotation);
        assert_relative_eq!(angles[0], -12.0, epsilon = 1e-9);
        assert_relative_eq!(angles[1], 25.0, epsilon = 1e-9);
        assert_relative_eq!(angles[2], 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axis_relabeling_table() {
        // pitch comes from index 0, yaw from index 1, roll from index 2
        let orientation = Orientation::from_euler_xyz([1.0, 2.0, 3.0]);
        assert_eq!(orientation.pitch, 1.0);
        assert_eq!(orientation.yaw, 2.0);
        assert_eq!(orientation.roll, 3.0);
    }

    #[test]
    fn test_camera_model_from_frame() {
        let camera = CameraModel::from_frame(640, 480);
        assert_eq!(camera.fx, 640.0);
        assert_eq!(camera.fy, 640.0);
        assert_eq!(camera.cx, 320.0);
        assert_eq!(camera.cy, 240.0);
    }

    #[test]
    fn test_project_behind_camera() {
        let camera = CameraModel::from_frame(640, 480);
        assert!(camera.project(&Vector3::new(0.0, 0.0, -100.0)).is_none());
        assert!(camera.project(&Vector3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_recovers_frontal_pose() {
        let camera = CameraModel::from_frame(640, 480);
        let translation = Vector3::new(0.0, 0.0, 1200.0);
        let landmarks = project_model(&Rotation3::identity(), &translation, &camera);

        let estimator = PoseEstimator::new(SolverConfig::default());
        let orientation = estimator.estimate(&landmarks, 640, 480).unwrap();

        assert!(orientation.yaw.abs() < 0.5, "yaw was {}", orientation.yaw);
        assert!(orientation.pitch.abs() < 0.5, "pitch was {}", orientation.pitch);
        assert!(orientation.roll.abs() < 0.5, "roll was {}", orientation.roll);
    }

    #[test]
    fn test_recovers_turned_pose() {
        let camera = CameraModel::from_frame(640, 480);
        let rotation = intrinsic_xyz(0.0, 25.0, 0.0);
        let translation = Vector3::new(40.0, -20.0, 1300.0);
        let landmarks = project_model(&rotation, &translation, &camera);

        let estimator = PoseEstimator::new(SolverConfig::default());
        let orientation = estimator.estimate(&landmarks, 640, 480).unwrap();

        assert_relative_eq!(orientation.yaw, 25.0, epsilon = 0.5);
        assert!(orientation.pitch.abs() < 0.5);
    }

    #[test]
    fn test_recovers_tilted_pose() {
        let camera = CameraModel::from_frame(640, 480);
        let rotation = intrinsic_xyz(-20.0, 0.0, 0.0);
        let translation = Vector3::new(0.0, 30.0, 1250.0);
        let landmarks = project_model(&rotation, &translation, &camera);

        let estimator = PoseEstimator::new(SolverConfig::default());
        let orientation = estimator.estimate(&landmarks, 640, 480).unwrap();

        assert_relative_eq!(orientation.pitch, -20.0, epsilon = 0.5);
        assert!(orientation.yaw.abs() < 0.5);
    }

    #[test]
    fn test_degenerate_landmarks_rejected() {
        let estimator = PoseEstimator::new(SolverConfig::default());

        // all six points coincident
        let collapsed = FaceLandmarks::from_points([Point2::new(100.0, 100.0); 6]);
        assert!(estimator.estimate(&collapsed, 640, 480).is_none());

        // non-finite coordinate
        let mut bad = collapsed.clone();
        bad.nose_tip = Point2::new(f64::NAN, 100.0);
        assert!(estimator.estimate(&bad, 640, 480).is_none());
    }

    #[test]
    fn test_zero_frame_dimensions_rejected() {
        let camera = CameraModel::from_frame(640, 480);
        let landmarks = project_model(&Rotation3::identity(), &Vector3::new(0.0, 0.0, 1200.0), &camera);
        let estimator = PoseEstimator::new(SolverConfig::default());
        assert!(estimator.estimate(&landmarks, 0, 480).is_none());
        assert!(estimator.estimate(&landmarks, 640, 0).is_none());
    }
}
