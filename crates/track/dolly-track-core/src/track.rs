use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::pose::KeyedPose;

/// Frame number on the host's simulation clock.
pub type Frame = i32;

/// Keyframes of one camera channel (position, look-at or up), ordered by frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub(crate) keyframes: BTreeMap<Frame, KeyedPose>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyframe, replacing any pose already stored at `frame`.
    pub fn add_keyframe(&mut self, frame: Frame, pose: KeyedPose) {
        self.keyframes.insert(frame, pose);
    }

    /// Remove the keyframe at `frame`, if any.
    pub fn delete_keyframe(&mut self, frame: Frame) -> Option<KeyedPose> {
        self.keyframes.remove(&frame)
    }

    #[inline]
    pub fn is_keyframe(&self, frame: Frame) -> bool {
        self.keyframes.contains_key(&frame)
    }

    #[inline]
    pub fn get(&self, frame: Frame) -> Option<&KeyedPose> {
        self.keyframes.get(&frame)
    }

    /// Largest keyframe strictly before `frame`; `frame` itself if there is none.
    pub fn next_smaller_than(&self, frame: Frame) -> Frame {
        self.keyframes
            .range(..frame)
            .next_back()
            .map_or(frame, |(f, _)| *f)
    }

    /// Smallest keyframe strictly after `frame`; `frame` itself if there is none.
    pub fn next_larger_than(&self, frame: Frame) -> Frame {
        self.keyframes
            .range((Bound::Excluded(frame), Bound::Unbounded))
            .next()
            .map_or(frame, |(f, _)| *f)
    }

    #[inline]
    pub fn first_frame(&self) -> Option<Frame> {
        self.keyframes.keys().next().copied()
    }

    /// Greatest keyed frame, `None` for an empty track.
    #[inline]
    pub fn last_frame(&self) -> Option<Frame> {
        self.keyframes.keys().next_back().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Keyframes in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = (Frame, &KeyedPose)> + '_ {
        self.keyframes.iter().map(|(f, p)| (*f, p))
    }
}

impl FromIterator<(Frame, KeyedPose)> for Track {
    fn from_iter<I: IntoIterator<Item = (Frame, KeyedPose)>>(iter: I) -> Self {
        Self {
            keyframes: iter.into_iter().collect(),
        }
    }
}
