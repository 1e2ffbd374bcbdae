//! Application glue: landmarks in, media commands out.

use crate::{
    config::Config,
    constants::VOLUME_DELTA_MIN,
    dispatch::{CommandMap, MediaAction, MediaDispatcher},
    hand_gesture::{classify_hand, HandGesture, HandLandmarks},
    landmarks::LandmarkProvider,
    pipeline::{FrameResult, GesturePipeline},
    stabilizer::Stabilizer,
    Result,
};
use log::{debug, info};
use std::time::Duration;

/// Drives the full control loop for each captured frame: extract landmarks
/// through the provider, run the gesture pipeline, resolve the command map
/// and dispatch.
///
/// Generic over the landmark provider and the dispatcher so the same loop
/// runs against a live face-mesh model, a recorded trace, or test mocks.
pub struct MediaControlApp<P: LandmarkProvider, D: MediaDispatcher> {
    provider: P,
    pipeline: GesturePipeline,
    dispatcher: D,
    commands: CommandMap,
    hand_stabilizer: Stabilizer<HandGesture>,
    pinch_span: f64,
    last_volume_sent: Option<f64>,
    face_visible: bool,
    frames_processed: u64,
    commands_dispatched: u64,
}

impl<P: LandmarkProvider, D: MediaDispatcher> MediaControlApp<P, D> {
    /// Create the application from configuration.
    #[must_use]
    pub fn new(provider: P, dispatcher: D, config: &Config) -> Self {
        Self {
            provider,
            pipeline: GesturePipeline::new(config),
            dispatcher,
            commands: config.commands,
            hand_stabilizer: Stabilizer::new(
                Duration::from_secs_f64(config.stabilizer.min_repeat_interval_secs),
                Duration::from_secs_f64(config.stabilizer.min_hold_secs),
            ),
            pinch_span: config.volume.pinch_span_px,
            last_volume_sent: None,
            face_visible: false,
            frames_processed: 0,
            commands_dispatched: 0,
        }
    }

    /// Process one captured frame.
    ///
    /// `now` is a monotonic offset since the loop started; frames must be
    /// fed in acquisition order. Errors come only from the provider or the
    /// dispatcher; an undetected or unsolvable face is not an error.
    pub fn process_frame(
        &mut self,
        frame: &P::Frame,
        frame_width: u32,
        frame_height: u32,
        now: Duration,
    ) -> Result<FrameResult> {
        let landmarks = self.provider.extract_six_points(frame)?;
        let result = self
            .pipeline
            .process(landmarks.as_ref(), frame_width, frame_height, now);
        self.frames_processed += 1;

        if result.face_visible() != self.face_visible {
            self.face_visible = result.face_visible();
            if self.face_visible {
                info!("Face detected");
            } else {
                info!("Face not detected");
            }
        }

        if let Some(movement) = result.command {
            match self.commands.action_for(movement) {
                Some(action) => {
                    info!("Movement {} -> {}", movement.as_str(), action.as_str());
                    self.dispatcher.dispatch(action)?;
                    self.commands_dispatched += 1;
                }
                None => debug!("Movement {} is not mapped to an action", movement.as_str()),
            }
        }

        Ok(result)
    }

    /// Process one frame's hand landmarks, if hand control is in use.
    ///
    /// Discrete gestures are debounced like head movements; the volume
    /// pinch is continuous and forwarded whenever the level moves enough
    /// to matter.
    pub fn process_hand(&mut self, hand: Option<&HandLandmarks>, now: Duration) -> Result<()> {
        let reading = hand.and_then(classify_hand);

        if let Some(reading) = reading {
            if let (HandGesture::VolumePinch, Some(distance)) = (reading.gesture, reading.pinch_distance) {
                self.hand_stabilizer.observe(None, now);
                let level = (distance / self.pinch_span).clamp(0.0, 1.0);
                let moved_enough = self
                    .last_volume_sent
                    .map_or(true, |last| (level - last).abs() >= VOLUME_DELTA_MIN);
                if moved_enough {
                    self.dispatcher.set_volume(level)?;
                    self.last_volume_sent = Some(level);
                }
                return Ok(());
            }
        }

        let symbol = reading.map(|r| r.gesture);
        if let Some(gesture) = self.hand_stabilizer.observe(symbol, now) {
            let action = match gesture {
                HandGesture::PausePlay => Some(MediaAction::PlayPause),
                HandGesture::NextTrack => Some(MediaAction::NextTrack),
                // continuous, handled above
                HandGesture::VolumePinch => None,
            };
            if let Some(action) = action {
                info!("Hand gesture -> {}", action.as_str());
                self.dispatcher.dispatch(action)?;
                self.commands_dispatched += 1;
            }
        }

        Ok(())
    }

    /// Whether the most recent frame had a usable face.
    #[must_use]
    pub fn face_visible(&self) -> bool {
        self.face_visible
    }

    /// Frames processed since construction.
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Commands dispatched since construction.
    #[must_use]
    pub fn commands_dispatched(&self) -> u64 {
        self.commands_dispatched
    }

    /// Borrow the dispatcher, e.g. to read back a recording mock.
    #[must_use]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}
