//! Edge case tests for degenerate input and configuration handling

use head_media_control::{
    app::MediaControlApp,
    config::Config,
    dispatch::LoggingDispatcher,
    landmarks::{FaceLandmarks, LandmarkProvider},
    pipeline::GesturePipeline,
    pose_estimation::PoseEstimator,
    replay::LandmarkTrace,
    Error,
};
use nalgebra::Point2;
use std::time::Duration;

#[test]
fn test_collapsed_landmarks_yield_no_orientation() {
    let estimator = PoseEstimator::new(Config::default().solver);
    let collapsed = FaceLandmarks::from_points([Point2::new(320.0, 240.0); 6]);
    assert!(estimator.estimate(&collapsed, 640, 480).is_none());
}

#[test]
fn test_nonfinite_landmarks_yield_no_orientation() {
    let estimator = PoseEstimator::new(Config::default().solver);

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut landmarks = FaceLandmarks::from_points([
            Point2::new(320.0, 200.0),
            Point2::new(320.0, 320.0),
            Point2::new(250.0, 150.0),
            Point2::new(390.0, 150.0),
            Point2::new(280.0, 280.0),
            Point2::new(360.0, 280.0),
        ]);
        landmarks.left_mouth_corner = Point2::new(bad, 280.0);
        assert!(estimator.estimate(&landmarks, 640, 480).is_none());
    }
}

#[test]
fn test_pipeline_absorbs_unsolvable_frames() {
    // an unsolvable face must surface as "no orientation", never a panic or
    // error, and must not disturb later frames
    let mut pipeline = GesturePipeline::new(&Config::default());

    let collapsed = FaceLandmarks::from_points([Point2::new(1.0, 1.0); 6]);
    let result = pipeline.process(Some(&collapsed), 640, 480, Duration::ZERO);
    assert!(result.orientation.is_none());
    assert!(result.command.is_none());

    let result = pipeline.process(None, 640, 480, Duration::from_millis(33));
    assert!(result.orientation.is_none());
}

#[test]
fn test_provider_errors_propagate() {
    struct FailingProvider;

    impl LandmarkProvider for FailingProvider {
        type Frame = ();

        fn extract_six_points(&mut self, _frame: &()) -> head_media_control::Result<Option<FaceLandmarks>> {
            Err(Error::InvalidInput("camera unplugged".to_string()))
        }
    }

    let mut app = MediaControlApp::new(FailingProvider, LoggingDispatcher::new(), &Config::default());
    let result = app.process_frame(&(), 640, 480, Duration::ZERO);
    assert!(result.is_err());
}

#[test]
fn test_config_round_trip() {
    let mut config = Config::default();
    config.detection.yaw_threshold_deg = 25.0;
    config.stabilizer.min_repeat_interval_secs = 5.0;

    let path = std::env::temp_dir().join(format!("head-media-control-config-{}.yaml", std::process::id()));
    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.detection.yaw_threshold_deg, 25.0);
    assert_eq!(loaded.stabilizer.min_repeat_interval_secs, 5.0);
    assert_eq!(loaded.detection.pitch_threshold_deg, config.detection.pitch_threshold_deg);
}

#[test]
fn test_config_missing_file() {
    assert!(Config::from_file("does-not-exist.yaml").is_err());
}

#[test]
fn test_config_rejects_malformed_yaml() {
    let path = std::env::temp_dir().join(format!("head-media-control-broken-{}.yaml", std::process::id()));
    std::fs::write(&path, "detection: [this is not a mapping").unwrap();
    let result = Config::from_file(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_trace_rejects_nonfinite_timestamps() {
    let yaml = "frames:\n  - t: .nan\n    width: 640\n    height: 480\n";
    let trace: LandmarkTrace = serde_yaml::from_str(yaml).unwrap();
    assert!(trace.validate().is_err());
}

#[test]
fn test_extreme_frame_dimensions() {
    let estimator = PoseEstimator::new(Config::default().solver);
    let landmarks = FaceLandmarks::from_normalized(
        [
            (0.50, 0.45),
            (0.50, 0.72),
            (0.41, 0.38),
            (0.59, 0.38),
            (0.44, 0.58),
            (0.56, 0.58),
        ],
        16,
        16,
    );
    // a tiny frame is unusual but not degenerate; the solve must not panic
    let _ = estimator.estimate(&landmarks, 16, 16);

    let landmarks = FaceLandmarks::from_normalized(
        [
            (0.50, 0.45),
            (0.50, 0.72),
            (0.41, 0.38),
            (0.59, 0.38),
            (0.44, 0.58),
            (0.56, 0.58),
        ],
        7680,
        4320,
    );
    let _ = estimator.estimate(&landmarks, 7680, 4320);
}
