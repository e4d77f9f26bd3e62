//! Playback clock — fixed-period frame advance gated by a playing flag.
//!
//! The host scheduler calls [`PlaybackClock::tick`] every
//! [`PlaybackClock::tick_period`] regardless of state; a tick while stopped
//! is a no-op. Stopping playback therefore never cancels the timer, it just
//! makes future ticks inert, and wraparound is always modular.

use std::time::Duration;

use tracing::debug;

use fl_common::TOTAL_FRAMES;
use fl_project::Project;

/// Frame-advance timer state.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    playing: bool,
    fps: u32,
}

impl PlaybackClock {
    /// Create a stopped clock at the given frame rate (minimum 1 fps).
    pub fn new(fps: u32) -> Self {
        Self {
            playing: false,
            fps: fps.max(1),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
    }

    /// The interval the host scheduler should tick at (`1000 / fps` ms).
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    /// Flip the playing flag; returns the new state.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        debug!(playing = self.playing, "Playback toggled");
        self.playing
    }

    /// One timer tick. While playing, advances the project to the next
    /// frame (wrapping at [`TOTAL_FRAMES`]) and returns the new index;
    /// while stopped, does nothing.
    pub fn tick(&self, project: &mut Project) -> Option<usize> {
        if !self.playing {
            return None;
        }
        let next = (project.current_frame + 1) % TOTAL_FRAMES;
        project.select_frame(next);
        Some(next)
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(12)
    }
}
