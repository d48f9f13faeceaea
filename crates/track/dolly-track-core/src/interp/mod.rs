//! Interpolators for pose segments.
//!
//! Constant, Linear and Cosine only need the two segment ends; Spline also
//! needs one control point on either side and lives in [`functions::catmull_rom`].

pub mod functions;

use nalgebra::Vector3;

use crate::pose::TransitionKind;

/// Signature shared by the two-point interpolators.
pub type PairInterpolator = fn(&Vector3<f64>, &Vector3<f64>, f64) -> Vector3<f64>;

/// Two-point interpolator for `kind`, or `None` when the kind needs control points.
pub fn pair_interpolator(kind: TransitionKind) -> Option<PairInterpolator> {
    match kind {
        TransitionKind::Constant => Some(functions::constant),
        TransitionKind::Linear => Some(functions::linear),
        TransitionKind::Cosine => Some(functions::cosine),
        TransitionKind::Spline => None,
    }
}
