//! Keyframed pose samples and the transition attached to them.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::ids::ReferenceId;
use crate::reference::ReferenceResolver;

/// Interpolation style used when arriving at a keyframe from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Constant,
    Linear,
    Cosine,
    #[default]
    Spline,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 4] = [
        TransitionKind::Constant,
        TransitionKind::Linear,
        TransitionKind::Cosine,
        TransitionKind::Spline,
    ];

    /// Token used in the track text format.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "Constant",
            Self::Linear => "Linear",
            Self::Cosine => "Cosine",
            Self::Spline => "Spline",
        }
    }

    /// Strict, case-sensitive inverse of [`name`](Self::name).
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == token)
    }

    /// Next kind in the recording cycle Constant -> Linear -> Cosine -> Spline -> Constant.
    #[inline]
    pub fn cycle(&self) -> Self {
        match self {
            Self::Constant => Self::Linear,
            Self::Linear => Self::Cosine,
            Self::Cosine => Self::Spline,
            Self::Spline => Self::Constant,
        }
    }

    /// Linear and Spline segments continue smoothly into a neighbouring spline.
    #[inline]
    pub fn is_curve_continuous(&self) -> bool {
        matches!(self, Self::Linear | Self::Spline)
    }
}

/// Frame of reference of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceMode {
    /// Value is already in world space.
    Unlocked,
    /// Value is in the local space of the referenced object.
    Locked(ReferenceId),
}

impl ReferenceMode {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unlocked => "Unlocked",
            Self::Locked(_) => "Locked",
        }
    }

    #[inline]
    pub fn reference_id(&self) -> Option<ReferenceId> {
        match self {
            Self::Unlocked => None,
            Self::Locked(id) => Some(*id),
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

/// One keyframe's stored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyedPose {
    pub mode: ReferenceMode,
    /// World value when unlocked, local value when locked.
    pub local_value: Vector3<f64>,
    pub transition: TransitionKind,
}

impl KeyedPose {
    /// A world-space pose.
    #[inline]
    pub fn unlocked(value: Vector3<f64>, transition: TransitionKind) -> Self {
        Self {
            mode: ReferenceMode::Unlocked,
            local_value: value,
            transition,
        }
    }

    /// A pose expressed in the local space of `reference`.
    #[inline]
    pub fn locked(reference: ReferenceId, local_value: Vector3<f64>, transition: TransitionKind) -> Self {
        Self {
            mode: ReferenceMode::Locked(reference),
            local_value,
            transition,
        }
    }

    /// Record a world-space value, converting it into the lock's local space when locked.
    pub fn capture(
        world_value: Vector3<f64>,
        lock: Option<ReferenceId>,
        want_direction: bool,
        transition: TransitionKind,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Self, TrackError> {
        let Some(id) = lock else {
            return Ok(Self::unlocked(world_value, transition));
        };
        let transform = resolver
            .resolve(id)
            .ok_or(TrackError::ReferenceNotFound { id: id.0 })?;
        let local = if want_direction {
            transform.inverse_transform_direction(&world_value)
        } else {
            transform.inverse_transform_point(&world_value)
        };
        Ok(Self::locked(id, local, transition))
    }

    /// World-space value of this pose.
    ///
    /// Directions (up vectors) only pick up the reference's rotation; points
    /// get the full transform.
    pub fn resolve(
        &self,
        want_direction: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vector3<f64>, TrackError> {
        match self.mode {
            ReferenceMode::Unlocked => Ok(self.local_value),
            ReferenceMode::Locked(id) => {
                let transform = resolver
                    .resolve(id)
                    .ok_or(TrackError::ReferenceNotFound { id: id.0 })?;
                Ok(if want_direction {
                    transform.transform_direction(&self.local_value)
                } else {
                    transform.transform_point(&self.local_value)
                })
            }
        }
    }
}
