use std::time::Duration;

use shared::{domain::SpeedRange, protocol::PlayerSnapshot};

/// Lowest cursor position a sequence can rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorFloor {
    /// The first step is shown immediately.
    First,
    /// Nothing is shown until the run starts.
    BeforeStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Advanced onto the last step and stopped playing.
    Completed,
    Idle,
}

/// Cursor, playback flag and speed for one step sequence. Every mutation
/// keeps the cursor inside `[floor, last]`.
#[derive(Debug, Clone)]
pub struct Playhead {
    cursor: Option<usize>,
    floor: CursorFloor,
    len: usize,
    playing: bool,
    speed_ms: u64,
    speeds: SpeedRange,
}

impl Playhead {
    pub fn new(len: usize, floor: CursorFloor, speeds: SpeedRange) -> Self {
        let mut playhead = Self {
            cursor: None,
            floor,
            len,
            playing: false,
            speed_ms: speeds.clamp(speeds.default_ms),
            speeds,
        };
        playhead.cursor = playhead.floor_cursor();
        playhead
    }

    fn floor_cursor(&self) -> Option<usize> {
        match self.floor {
            CursorFloor::First if self.len > 0 => Some(0),
            _ => None,
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn at_last(&self) -> bool {
        self.last_index().is_some() && self.cursor == self.last_index()
    }

    /// Moves forward one step; at the end it only stops playback.
    pub fn next(&mut self) -> bool {
        match (self.cursor, self.last_index()) {
            (None, Some(_)) => {
                self.cursor = Some(0);
                true
            }
            (Some(cursor), Some(last)) if cursor < last => {
                self.cursor = Some(cursor + 1);
                true
            }
            _ => {
                self.playing = false;
                false
            }
        }
    }

    /// Moves back one step and pauses. No-op on step 0 or before start.
    pub fn previous(&mut self) -> bool {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.playing = false;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Returns to the floor and pauses. `len` replaces the sequence length
    /// when the steps were regenerated.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.playing = false;
        self.cursor = self.floor_cursor();
    }

    pub fn set_speed(&mut self, ms: u64) -> u64 {
        self.speed_ms = self.speeds.clamp(ms);
        self.speed_ms
    }

    /// Whether a tick timer should be pending. Playing with nowhere left to
    /// go flips playback off instead.
    pub fn should_arm(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.is_empty() || self.at_last() {
            self.playing = false;
            return false;
        }
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing || !self.next() {
            return TickOutcome::Idle;
        }
        if self.at_last() {
            self.playing = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            cursor: self.cursor,
            len: self.len,
            playing: self.playing,
            speed_ms: self.speed_ms,
            can_previous: self.cursor.is_some_and(|cursor| cursor > 0),
            can_next: self.len > 0 && !self.at_last(),
        }
    }
}
