use serde::{Deserialize, Serialize};

use crate::shot::Shot;
use crate::track::Frame;

/// Playback state of a shot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Camera is free; the shot does not drive the view
    #[default]
    Stopped,
    /// View is held at the current frame
    Paused,
    /// Frame advances once per tick
    Playing,
}

impl PlaybackState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Playing => "playing",
        }
    }

    /// Check if the playhead is actively advancing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Current frame of a shot and whether it is advancing.
///
/// The host calls [`tick`](Playhead::tick) once per simulation step and,
/// while [`is_view_locked`](Playhead::is_view_locked) holds, samples the shot
/// at [`frame`](Playhead::frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playhead {
    pub frame: Frame,
    pub state: PlaybackState,
}

impl Playhead {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            state: PlaybackState::Stopped,
        }
    }

    pub fn play(&mut self) {
        self.set_state(PlaybackState::Playing);
    }

    pub fn pause(&mut self) {
        self.set_state(PlaybackState::Paused);
    }

    /// Release the view. The frame is kept.
    pub fn stop(&mut self) {
        self.set_state(PlaybackState::Stopped);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            log::debug!(
                "playhead {} -> {} at frame {}",
                self.state.name(),
                state.name(),
                self.frame
            );
            self.state = state;
        }
    }

    #[inline]
    pub fn is_view_locked(&self) -> bool {
        self.state != PlaybackState::Stopped
    }

    pub fn step(&mut self, delta: Frame) {
        self.frame = self.frame.saturating_add(delta);
    }

    pub fn seek(&mut self, frame: Frame) {
        self.frame = frame;
    }

    /// Jump to the next keyframe of any track; stays put after the last one.
    pub fn seek_next_keyframe(&mut self, shot: &Shot) {
        self.frame = shot.next_larger_than(self.frame);
    }

    pub fn seek_prev_keyframe(&mut self, shot: &Shot) {
        self.frame = shot.next_smaller_than(self.frame);
    }

    /// Advance one frame while playing.
    ///
    /// Returns `true` when this tick reached the shot's last frame, in which
    /// case playback is paused there.
    pub fn tick(&mut self, shot: &Shot) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.step(1);
        if shot.is_last_frame(self.frame) {
            self.pause();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{KeyedPose, TransitionKind};
    use crate::track::Track;
    use nalgebra::Vector3;

    fn shot_with_keys(frames: &[Frame]) -> Shot {
        let position: Track = frames
            .iter()
            .map(|f| (*f, KeyedPose::unlocked(Vector3::zeros(), TransitionKind::Spline)))
            .collect();
        Shot::new(position, Track::new(), Track::new())
    }

    #[test]
    fn state_names() {
        assert_eq!(PlaybackState::Stopped.name(), "stopped");
        assert_eq!(PlaybackState::Paused.name(), "paused");
        assert_eq!(PlaybackState::Playing.name(), "playing");
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());
    }

    #[test]
    fn ticks_only_advance_while_playing() {
        let shot = shot_with_keys(&[0, 100]);
        let mut head = Playhead::new(10);
        assert!(!head.tick(&shot));
        assert_eq!(head.frame, 10);

        head.play();
        assert!(!head.tick(&shot));
        assert!(!head.tick(&shot));
        assert_eq!(head.frame, 12);

        head.pause();
        head.tick(&shot);
        assert_eq!(head.frame, 12);
    }

    #[test]
    fn playback_pauses_on_last_frame() {
        let shot = shot_with_keys(&[0, 3]);
        let mut head = Playhead::new(0);
        head.play();
        assert!(!head.tick(&shot));
        assert!(!head.tick(&shot));
        assert!(head.tick(&shot));
        assert_eq!(head.frame, 3);
        assert_eq!(head.state, PlaybackState::Paused);
        assert!(head.is_view_locked());
    }

    #[test]
    fn playing_past_the_end_keeps_going() {
        let shot = shot_with_keys(&[0, 3]);
        let mut head = Playhead::new(5);
        head.play();
        for _ in 0..10 {
            assert!(!head.tick(&shot));
        }
        assert_eq!(head.frame, 15);
    }

    #[test]
    fn stop_keeps_frame_but_unlocks_view() {
        let mut head = Playhead::new(7);
        head.play();
        head.stop();
        assert_eq!(head.frame, 7);
        assert!(!head.is_view_locked());
    }

    #[test]
    fn seeking_between_keyframes() {
        let shot = shot_with_keys(&[-10, 0, 25]);
        let mut head = Playhead::new(3);
        head.seek_next_keyframe(&shot);
        assert_eq!(head.frame, 25);
        head.seek_next_keyframe(&shot);
        assert_eq!(head.frame, 25);
        head.seek_prev_keyframe(&shot);
        head.seek_prev_keyframe(&shot);
        assert_eq!(head.frame, -10);

        head.seek(Frame::MAX - 1);
        head.step(5);
        assert_eq!(head.frame, Frame::MAX);
    }
}
