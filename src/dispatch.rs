//! Media actions, the movement-to-action command map, and the dispatcher
//! seam.

use crate::{movement::Movement, Result};
use serde::{Deserialize, Serialize};

/// A media control action to perform on the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaAction {
    /// Skip to the next track
    NextTrack,
    /// Return to the previous track
    PreviousTrack,
    /// Toggle playback
    PlayPause,
    /// Mute system audio
    Mute,
}

impl MediaAction {
    /// Lowercase name, for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextTrack => "next_track",
            Self::PreviousTrack => "previous_track",
            Self::PlayPause => "play_pause",
            Self::Mute => "mute",
        }
    }
}

/// A configurable action slot: a media action or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MappedAction {
    /// Skip to the next track
    NextTrack,
    /// Return to the previous track
    PreviousTrack,
    /// Toggle playback
    PlayPause,
    /// Mute system audio
    Mute,
    /// Ignore this movement
    #[default]
    None,
}

impl MappedAction {
    /// The concrete action, if this slot is mapped to one.
    #[must_use]
    pub fn action(self) -> Option<MediaAction> {
        match self {
            Self::NextTrack => Some(MediaAction::NextTrack),
            Self::PreviousTrack => Some(MediaAction::PreviousTrack),
            Self::PlayPause => Some(MediaAction::PlayPause),
            Self::Mute => Some(MediaAction::Mute),
            Self::None => None,
        }
    }
}

/// User-configurable movement-to-action mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMap {
    /// Action for a head turn to the right
    pub right: MappedAction,
    /// Action for a head turn to the left
    pub left: MappedAction,
    /// Action for an upward head tilt
    pub up: MappedAction,
    /// Action for a downward head tilt
    pub down: MappedAction,
}

impl Default for CommandMap {
    fn default() -> Self {
        Self {
            right: MappedAction::NextTrack,
            left: MappedAction::PreviousTrack,
            up: MappedAction::PlayPause,
            down: MappedAction::PlayPause,
        }
    }
}

impl CommandMap {
    /// Resolve a movement to its configured action.
    #[must_use]
    pub fn action_for(&self, movement: Movement) -> Option<MediaAction> {
        match movement {
            Movement::Right => self.right.action(),
            Movement::Left => self.left.action(),
            Movement::Up => self.up.action(),
            Movement::Down => self.down.action(),
        }
    }
}

/// Capability interface for performing media actions on the host system.
///
/// Implementations inject OS media keys, forward to a player API, or just
/// record what was asked of them (tests, dry runs).
pub trait MediaDispatcher {
    /// Perform a media action.
    fn dispatch(&mut self, action: MediaAction) -> Result<()>;

    /// Move the system volume toward a level in `0.0..=1.0`.
    fn set_volume(&mut self, level: f64) -> Result<()>;
}

impl<D: MediaDispatcher + ?Sized> MediaDispatcher for Box<D> {
    fn dispatch(&mut self, action: MediaAction) -> Result<()> {
        (**self).dispatch(action)
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        (**self).set_volume(level)
    }
}

/// Dispatcher that logs instead of touching the system.
///
/// Used for dry runs and headless environments; tests read back the
/// recorded history.
#[derive(Debug, Default)]
pub struct LoggingDispatcher {
    actions: Vec<MediaAction>,
    volume: Option<f64>,
}

impl LoggingDispatcher {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action dispatched so far, in order.
    #[must_use]
    pub fn actions(&self) -> &[MediaAction] {
        &self.actions
    }

    /// The most recent volume target, if any.
    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        self.volume
    }
}

impl MediaDispatcher for LoggingDispatcher {
    fn dispatch(&mut self, action: MediaAction) -> Result<()> {
        log::info!("media action: {}", action.as_str());
        self.actions.push(action);
        Ok(())
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        let level = level.clamp(0.0, 1.0);
        log::info!("volume target: {:.0}%", level * 100.0);
        self.volume = Some(level);
        Ok(())
    }
}
