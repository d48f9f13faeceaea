//! A full camera move: position, look-at and up tracks keyed in lockstep.

use nalgebra::{Isometry3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::composite::CompositeTrack;
use crate::config::Config;
use crate::error::TrackError;
use crate::ids::ReferenceId;
use crate::pose::{KeyedPose, TransitionKind};
use crate::reference::{ReferenceResolver, WorldTransform};
use crate::sampling::TrackSource;
use crate::track::{Frame, Track};

/// World-space camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vector3<f64>,
    pub look_at: Vector3<f64>,
    pub up: Vector3<f64>,
}

impl CameraView {
    pub fn new(position: Vector3<f64>, look_at: Vector3<f64>, up: Vector3<f64>) -> Self {
        Self {
            position,
            look_at,
            up,
        }
    }

    /// Camera-to-world transform: origin at `position`, +Z towards `look_at`.
    pub fn world_transform(&self) -> WorldTransform {
        Isometry3::face_towards(
            &Point3::from(self.position),
            &Point3::from(self.look_at),
            &self.up,
        )
        .into()
    }
}

/// References that recorded keyframes are locked to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotLocks {
    /// Applies to the position and the up vector.
    pub position: Option<ReferenceId>,
    pub look_at: Option<ReferenceId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub position: Track,
    pub look_at: Track,
    pub up: Track,
}

/// Merge per-track neighbour queries. A track with no neighbour reports
/// `frame` itself and is left out; if every track does, the result is `frame`.
fn merge_neighbours(frame: Frame, found: [Frame; 3], nearest: fn(Frame, Frame) -> Frame) -> Frame {
    found
        .into_iter()
        .filter(|k| *k != frame)
        .reduce(nearest)
        .unwrap_or(frame)
}

impl Shot {
    pub fn new(position: Track, look_at: Track, up: Track) -> Self {
        Self {
            position,
            look_at,
            up,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty() && self.look_at.is_empty() && self.up.is_empty()
    }

    /// A frame counts as keyed when the position or the look-at track has it.
    pub fn is_keyframe(&self, frame: Frame) -> bool {
        self.position.is_keyframe(frame) || self.look_at.is_keyframe(frame)
    }

    pub fn delete_keyframe(&mut self, frame: Frame) {
        self.position.delete_keyframe(frame);
        self.look_at.delete_keyframe(frame);
        self.up.delete_keyframe(frame);
    }

    pub fn next_smaller_than(&self, frame: Frame) -> Frame {
        merge_neighbours(
            frame,
            [
                self.position.next_smaller_than(frame),
                self.look_at.next_smaller_than(frame),
                self.up.next_smaller_than(frame),
            ],
            Frame::max,
        )
    }

    pub fn next_larger_than(&self, frame: Frame) -> Frame {
        merge_neighbours(
            frame,
            [
                self.position.next_larger_than(frame),
                self.look_at.next_larger_than(frame),
                self.up.next_larger_than(frame),
            ],
            Frame::min,
        )
    }

    /// Greatest keyed frame over all three tracks.
    pub fn last_frame(&self) -> Option<Frame> {
        [&self.position, &self.look_at, &self.up]
            .into_iter()
            .filter_map(Track::last_frame)
            .max()
    }

    pub fn is_last_frame(&self, frame: Frame) -> bool {
        self.last_frame() == Some(frame)
    }

    /// Look-at track re-expressed as a unit offset from the position track.
    pub fn look_at_by_position(&self) -> CompositeTrack<'_> {
        CompositeTrack::new(&self.position, &self.look_at)
    }

    pub fn sample_view(
        &self,
        frame: Frame,
        fallback: &CameraView,
        resolver: &dyn ReferenceResolver,
    ) -> Result<CameraView, TrackError> {
        self.sample_view_with(&Config::default(), frame, fallback, resolver)
    }

    /// Camera view at `frame`. Channels whose track is empty take the
    /// fallback's value.
    pub fn sample_view_with(
        &self,
        config: &Config,
        frame: Frame,
        fallback: &CameraView,
        resolver: &dyn ReferenceResolver,
    ) -> Result<CameraView, TrackError> {
        let position = if self.position.is_empty() {
            fallback.position
        } else {
            self.position.evaluate_with(config, frame, false, resolver)?
        };

        let look_at = match (self.position.is_empty(), self.look_at.is_empty()) {
            (_, true) => fallback.look_at,
            (false, false) => self
                .look_at_by_position()
                .evaluate_with(config, frame, false, resolver)?,
            (true, false) => self.look_at.evaluate_with(config, frame, false, resolver)?,
        };

        let up = if self.up.is_empty() {
            fallback.up
        } else {
            self.up.evaluate_with(config, frame, true, resolver)?
        };

        Ok(CameraView::new(position, look_at, up))
    }

    /// Record `view` as a keyframe on all three tracks.
    ///
    /// Nothing is written unless every channel could be captured.
    pub fn record(
        &mut self,
        frame: Frame,
        view: &CameraView,
        locks: ShotLocks,
        transition: TransitionKind,
        resolver: &dyn ReferenceResolver,
    ) -> Result<(), TrackError> {
        let position = KeyedPose::capture(view.position, locks.position, false, transition, resolver)?;
        let look_at = KeyedPose::capture(view.look_at, locks.look_at, false, transition, resolver)?;
        let up = KeyedPose::capture(view.up, locks.position, true, transition, resolver)?;

        self.position.add_keyframe(frame, position);
        self.look_at.add_keyframe(frame, look_at);
        self.up.add_keyframe(frame, up);
        Ok(())
    }

    /// Record only the look-at channel.
    pub fn record_look_at(
        &mut self,
        frame: Frame,
        look_at: Vector3<f64>,
        lock: Option<ReferenceId>,
        transition: TransitionKind,
        resolver: &dyn ReferenceResolver,
    ) -> Result<(), TrackError> {
        let pose = KeyedPose::capture(look_at, lock, false, transition, resolver)?;
        self.look_at.add_keyframe(frame, pose);
        Ok(())
    }
}
