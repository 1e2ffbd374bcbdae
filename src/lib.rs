//! Head movement media control library.
//!
//! This library turns head movements tracked through a webcam into system
//! media commands. The pipeline runs once per captured frame:
//!
//! 1. A landmark provider supplies six facial landmark positions
//! 2. Pose estimation solves the perspective correspondence against a
//!    canonical 3D face model to recover yaw/pitch/roll
//! 3. The classifier maps the orientation to a discrete movement symbol
//! 4. The stabilizer debounces the symbol stream so a sustained gesture
//!    fires one command, not one per frame
//! 5. A dispatcher performs the mapped media action
//!
//! Landmark extraction and key injection sit behind the
//! [`landmarks::LandmarkProvider`] and [`dispatch::MediaDispatcher`]
//! traits, so the pipeline itself runs against live models, recorded
//! traces, or test mocks alike.
//!
//! # Examples
//!
//! ## Running the pipeline over one frame
//!
//! ```
//! use head_media_control::{config::Config, landmarks::FaceLandmarks, pipeline::GesturePipeline};
//! use std::time::Duration;
//!
//! let mut pipeline = GesturePipeline::new(&Config::default());
//!
//! // Normalized landmark output from a face-mesh model, scaled into a
//! // 640x360 frame
//! let landmarks = FaceLandmarks::from_normalized(
//!     [
//!         (0.50, 0.45), // nose tip
//!         (0.50, 0.72), // chin
//!         (0.41, 0.38), // left eye corner
//!         (0.59, 0.38), // right eye corner
//!         (0.44, 0.58), // left mouth corner
//!         (0.56, 0.58), // right mouth corner
//!     ],
//!     640,
//!     360,
//! );
//!
//! let result = pipeline.process(Some(&landmarks), 640, 360, Duration::ZERO);
//! if let Some(orientation) = result.orientation {
//!     println!("yaw {:.1}°, pitch {:.1}°", orientation.yaw, orientation.pitch);
//! }
//! if let Some(movement) = result.command {
//!     println!("emit {}", movement.as_str());
//! }
//! ```
//!
//! ## Dispatching commands
//!
//! ```
//! use head_media_control::dispatch::{CommandMap, LoggingDispatcher, MediaDispatcher};
//! use head_media_control::movement::Movement;
//!
//! # fn main() -> head_media_control::Result<()> {
//! let commands = CommandMap::default();
//! let mut dispatcher = LoggingDispatcher::new();
//!
//! if let Some(action) = commands.action_for(Movement::Right) {
//!     dispatcher.dispatch(action)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a recorded trace
//!
//! ```no_run
//! use head_media_control::{
//!     app::MediaControlApp, config::Config, dispatch::LoggingDispatcher,
//!     replay::{LandmarkTrace, TraceLandmarkProvider},
//! };
//!
//! # fn main() -> head_media_control::Result<()> {
//! let trace = LandmarkTrace::from_file("session.yaml")?;
//! let mut app = MediaControlApp::new(TraceLandmarkProvider, LoggingDispatcher::new(), &Config::default());
//!
//! for frame in &trace.frames {
//!     app.process_frame(frame, frame.width, frame.height, frame.timestamp())?;
//! }
//! # Ok(())
//! # }
//! ```

/// Facial landmark types and the provider seam
pub mod landmarks;

/// Head pose estimation from six facial landmarks
pub mod pose_estimation;

/// Classification of orientations into movement symbols
pub mod movement;

/// Temporal debouncing of gesture symbols
pub mod stabilizer;

/// The per-frame head-pose-to-gesture pipeline
pub mod pipeline;

/// Hand gesture recognition
pub mod hand_gesture;

/// Media actions, command mapping and the dispatcher seam
pub mod dispatch;

/// Media key injection for X11 systems
pub mod media_keys;

/// Application glue tying provider, pipeline and dispatcher together
pub mod app;

/// Recorded landmark traces and their replay provider
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
