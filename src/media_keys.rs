//! Media key injection for X11-based systems.
//!
//! Synthesizes XF86 audio key events through the XTEST extension, so any
//! media player listening for the standard keys responds. This is the
//! default [`MediaDispatcher`] on Linux desktops.

use crate::{
    constants::{DEFAULT_VOLUME_LEVEL, KEY_TAP_DELAY_MS, VOLUME_KEY_STEPS},
    dispatch::{MediaAction, MediaDispatcher},
    error::{Error, Result},
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt as _, Keycode, Keysym, KEY_PRESS_EVENT, KEY_RELEASE_EVENT},
    protocol::xtest::ConnectionExt as _,
    rust_connection::RustConnection,
};

// XF86 keysym values from XF86keysym.h
const XF86_AUDIO_LOWER_VOLUME: Keysym = 0x1008_ff11;
const XF86_AUDIO_MUTE: Keysym = 0x1008_ff12;
const XF86_AUDIO_RAISE_VOLUME: Keysym = 0x1008_ff13;
const XF86_AUDIO_PLAY: Keysym = 0x1008_ff14;
const XF86_AUDIO_PREV: Keysym = 0x1008_ff16;
const XF86_AUDIO_NEXT: Keysym = 0x1008_ff17;

/// Resolved keycodes for the media keys we inject.
#[derive(Debug, Clone, Copy)]
struct MediaKeycodes {
    play: Keycode,
    next: Keycode,
    prev: Keycode,
    mute: Keycode,
    volume_up: Keycode,
    volume_down: Keycode,
}

/// Media key dispatcher for X11.
///
/// Tracks an assumed volume level and steps the system volume keys toward
/// requested targets, since X offers no absolute volume control.
pub struct X11MediaDispatcher {
    connection: RustConnection,
    root: u32,
    keycodes: MediaKeycodes,
    volume: f64,
}

impl X11MediaDispatcher {
    /// Connect to the X server and resolve the media keycodes.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 media key dispatcher");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let root = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?
            .root;

        // XTEST must be present for synthetic input
        connection
            .xtest_get_version(2, 2)
            .map_err(|e| Error::X11(format!("Failed to query XTEST: {e}")))?
            .reply()
            .map_err(|e| Error::X11(format!("XTEST extension unavailable: {e}")))?;

        let keycodes = Self::resolve_keycodes(&connection)?;
        debug!("Resolved media keycodes: {keycodes:?}");

        Ok(Self {
            connection,
            root,
            keycodes,
            volume: DEFAULT_VOLUME_LEVEL,
        })
    }

    /// Override the assumed starting volume level.
    #[must_use]
    pub fn with_initial_volume(mut self, level: f64) -> Self {
        self.volume = level.clamp(0.0, 1.0);
        self
    }

    /// Look up the keycode bound to each XF86 audio keysym.
    fn resolve_keycodes(connection: &RustConnection) -> Result<MediaKeycodes> {
        let setup = connection.setup();
        let min = setup.min_keycode;
        let count = setup.max_keycode - min + 1;

        let mapping = connection
            .get_keyboard_mapping(min, count)
            .map_err(|e| Error::X11(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| Error::X11(format!("Failed to read keyboard mapping: {e}")))?;

        let per_keycode = usize::from(mapping.keysyms_per_keycode);
        if per_keycode == 0 {
            return Err(Error::X11("Server returned an empty keyboard mapping".to_string()));
        }
        let find = |keysym: Keysym| -> Result<Keycode> {
            mapping
                .keysyms
                .chunks(per_keycode)
                .position(|syms| syms.contains(&keysym))
                .map(|offset| min + offset as Keycode)
                .ok_or_else(|| Error::X11(format!("No keycode bound to keysym {keysym:#x}")))
        };

        Ok(MediaKeycodes {
            play: find(XF86_AUDIO_PLAY)?,
            next: find(XF86_AUDIO_NEXT)?,
            prev: find(XF86_AUDIO_PREV)?,
            mute: find(XF86_AUDIO_MUTE)?,
            volume_up: find(XF86_AUDIO_RAISE_VOLUME)?,
            volume_down: find(XF86_AUDIO_LOWER_VOLUME)?,
        })
    }

    /// Inject a key press/release pair.
    fn tap_key(&self, keycode: Keycode) -> Result<()> {
        self.fake_key(KEY_PRESS_EVENT, keycode)?;
        std::thread::sleep(std::time::Duration::from_millis(KEY_TAP_DELAY_MS));
        self.fake_key(KEY_RELEASE_EVENT, keycode)
    }

    fn fake_key(&self, event: u8, keycode: Keycode) -> Result<()> {
        self.connection
            .xtest_fake_input(event, keycode, x11rb::CURRENT_TIME, self.root, 0, 0, 0)
            .map_err(|e| Error::X11(format!("Failed to inject key event: {e}")))?;
        self.connection
            .flush()
            .map_err(|e| Error::X11(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }
}

impl MediaDispatcher for X11MediaDispatcher {
    fn dispatch(&mut self, action: MediaAction) -> Result<()> {
        debug!("Dispatching media action: {}", action.as_str());
        let keycode = match action {
            MediaAction::NextTrack => self.keycodes.next,
            MediaAction::PreviousTrack => self.keycodes.prev,
            MediaAction::PlayPause => self.keycodes.play,
            MediaAction::Mute => self.keycodes.mute,
        };
        self.tap_key(keycode)
    }

    fn set_volume(&mut self, level: f64) -> Result<()> {
        let target = level.clamp(0.0, 1.0);
        let steps = ((target - self.volume).abs() * VOLUME_KEY_STEPS) as u32;
        if steps == 0 {
            return Ok(());
        }

        let keycode = if target > self.volume {
            self.keycodes.volume_up
        } else {
            self.keycodes.volume_down
        };
        for _ in 0..steps {
            self.tap_key(keycode)?;
        }

        self.volume = target;
        info!("Volume set to {:.0}%", self.volume * 100.0);
        Ok(())
    }
}
