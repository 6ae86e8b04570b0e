use std::cell::Cell;
use std::fmt;

use crate::{
    assets::library::{Animation, Frame},
    foundation::error::LoadError,
};

/// One of the two independently clocked playback tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Painted first; holds its last pose when its sequence ends.
    Base,
    /// Painted over the base; disappears after its last frame.
    Overlay,
}

impl Track {
    /// Paint order.
    pub const ALL: [Self; 2] = [Self::Base, Self::Overlay];

    pub fn end_policy(self) -> EndPolicy {
        match self {
            Self::Base => EndPolicy::HoldLast,
            Self::Overlay => EndPolicy::Vanish,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Base => 0,
            Self::Overlay => 1,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Overlay => f.write_str("overlay"),
        }
    }
}

/// What a track's cursor does when a tick would step past the end of its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndPolicy {
    /// Clamp to the last entry and keep painting it.
    HoldLast,
    /// Step one past the last entry, which paints nothing.
    Vanish,
}

/// Playback position of one track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub index: usize,
    pub running: bool,
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self {
            index: 0,
            running: true,
        }
    }
}

impl PlaybackCursor {
    /// Pure transition for one tick against a sequence of `len` entries.
    ///
    /// A stopped cursor is returned unchanged.
    pub fn advance(self, len: usize, policy: EndPolicy) -> Self {
        if !self.running {
            return self;
        }
        let next = self.index + 1;
        if next < len {
            return Self {
                index: next,
                running: true,
            };
        }
        let index = match policy {
            EndPolicy::HoldLast => len.saturating_sub(1),
            EndPolicy::Vanish => next,
        };
        Self {
            index,
            running: false,
        }
    }
}

/// Result of delivering one tick to a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub cursor: PlaybackCursor,
    /// The tick was consumed and the view should be redrawn.
    pub repaint: bool,
    /// The tick moved the track from running to stopped; its trigger should be disabled.
    pub stopped: bool,
}

/// Owns the loaded animation and one cursor per track.
#[derive(Debug)]
pub struct Player {
    animation: Animation,
    cursors: [PlaybackCursor; 2],
    reported_invalid: [Cell<bool>; 2],
}

impl Player {
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            cursors: [PlaybackCursor::default(); 2],
            reported_invalid: [Cell::new(false), Cell::new(false)],
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn cursor(&self, track: Track) -> PlaybackCursor {
        self.cursors[track.slot()]
    }

    pub fn is_running(&self, track: Track) -> bool {
        self.cursor(track).running
    }

    /// Advance `track` by one tick and apply its end-of-sequence policy.
    pub fn on_tick(&mut self, track: Track) -> TickOutcome {
        let before = self.cursors[track.slot()];
        if !before.running {
            return TickOutcome {
                cursor: before,
                repaint: false,
                stopped: false,
            };
        }

        let len = self.animation.sequences.sequence(track).len();
        let after = before.advance(len, track.end_policy());
        self.cursors[track.slot()] = after;

        let stopped = !after.running;
        if stopped {
            tracing::debug!(%track, index = after.index, len, "track stopped");
        }
        TickOutcome {
            cursor: after,
            repaint: true,
            stopped,
        }
    }

    /// Frame `track` should paint now, or `None` past the end of its sequence.
    ///
    /// An entry that does not address a frame is reported as
    /// [`LoadError::InvalidIndex`].
    pub fn try_current_frame(&self, track: Track) -> Result<Option<&Frame>, LoadError> {
        let cursor = self.cursor(track);
        let Some(index) = self.animation.sequences.sequence(track).get(cursor.index) else {
            return Ok(None);
        };
        self.animation
            .library
            .get(index)
            .map(Some)
            .ok_or(LoadError::InvalidIndex {
                track,
                position: cursor.index,
                index,
                frames: self.animation.library.len(),
            })
    }

    /// Like [`Player::try_current_frame`], but an invalid entry paints nothing
    /// and is logged the first time it is seen on each track.
    pub fn current_frame(&self, track: Track) -> Option<&Frame> {
        match self.try_current_frame(track) {
            Ok(frame) => frame,
            Err(err) => {
                let reported = &self.reported_invalid[track.slot()];
                if !reported.replace(true) {
                    tracing::warn!(%track, error = %err, "skipping frame with invalid index");
                }
                None
            }
        }
    }
}
