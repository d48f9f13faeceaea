//! Frame evaluation of keyframe tracks.
//!
//! Model:
//! - A segment runs from the last keyframe at or before the frame (`from`) to
//!   the first keyframe at or after it (`to`).
//! - The segment is shaped by `to.transition`, the kind attached to the
//!   arriving keyframe.
//! - Spline segments also use the keyframe before `from` and the one after
//!   `to`. A missing neighbour, or one whose own transition is neither Linear
//!   nor Spline, is replaced by a straight run-up: a linear control point
//!   [`CONTROL_GAP_FRAMES`] away holding the segment end's value. Since the
//!   point is linear, the spline mirrors the inner segment onto it and the
//!   gap itself never reaches the curve.
//! - Frames outside the keyed range hold the nearest keyframe.

use nalgebra::Vector3;

use crate::config::Config;
use crate::error::TrackError;
use crate::interp::functions::catmull_rom;
use crate::interp::pair_interpolator;
use crate::pose::{KeyedPose, TransitionKind};
use crate::reference::ReferenceResolver;
use crate::track::{Frame, Track};

/// Anything that yields a world-space vector per frame.
pub trait TrackSource {
    fn evaluate_with(
        &self,
        config: &Config,
        frame: Frame,
        want_direction: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vector3<f64>, TrackError>;

    /// Evaluate with the default configuration.
    fn evaluate(
        &self,
        frame: Frame,
        want_direction: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vector3<f64>, TrackError> {
        self.evaluate_with(&Config::default(), frame, want_direction, resolver)
    }
}

/// Frame distance of a synthesized run-up control point from its segment end.
pub const CONTROL_GAP_FRAMES: Frame = 60;

type Entry<'a> = (Frame, &'a KeyedPose);

/// Keyframes around a frame: the segment ends plus one control point beyond each.
#[derive(Debug, Default, Clone, Copy)]
struct Bracket<'a> {
    control_lo: Option<Entry<'a>>,
    from: Option<Entry<'a>>,
    to: Option<Entry<'a>>,
    control_hi: Option<Entry<'a>>,
}

fn find_bracket(track: &Track, frame: Frame) -> Bracket<'_> {
    let mut below = track.keyframes.range(..=frame).rev().map(|(f, p)| (*f, p));
    let mut above = track.keyframes.range(frame..).map(|(f, p)| (*f, p));
    let from = below.next();
    let control_lo = below.next();
    let to = above.next();
    let control_hi = above.next();
    Bracket {
        control_lo,
        from,
        to,
        control_hi,
    }
}

/// Control point next to a spline segment end: value, frame and whether it is a linear run.
fn control_point(
    neighbour: Option<Entry<'_>>,
    end_value: Vector3<f64>,
    synthetic_frame: f64,
    want_direction: bool,
    resolver: &dyn ReferenceResolver,
) -> Result<(Vector3<f64>, f64, bool), TrackError> {
    match neighbour {
        Some((frame, pose)) if pose.transition.is_curve_continuous() => Ok((
            pose.resolve(want_direction, resolver)?,
            f64::from(frame),
            pose.transition == TransitionKind::Linear,
        )),
        _ => Ok((end_value, synthetic_frame, true)),
    }
}

/// Sample a track at `frame`.
pub fn sample_track(
    track: &Track,
    config: &Config,
    frame: Frame,
    want_direction: bool,
    resolver: &dyn ReferenceResolver,
) -> Result<Vector3<f64>, TrackError> {
    let bracket = find_bracket(track, frame);

    let ((from_frame, from), (to_frame, to)) = match (bracket.from, bracket.to) {
        (None, None) => return Err(TrackError::EmptyTrack),
        // before the first keyframe
        (None, Some((_, to))) => return to.resolve(want_direction, resolver),
        // after the last keyframe
        (Some((_, from)), None) => return from.resolve(want_direction, resolver),
        (Some(from), Some(to)) => (from, to),
    };

    if from_frame == to_frame {
        return from.resolve(want_direction, resolver);
    }

    let t = (f64::from(frame) - f64::from(from_frame)) / (f64::from(to_frame) - f64::from(from_frame));
    let from_value = from.resolve(want_direction, resolver)?;
    let to_value = to.resolve(want_direction, resolver)?;
    log::trace!(
        "frame {frame}: {:?} segment {from_frame}..{to_frame} at t={t}",
        to.transition
    );

    if let Some(interpolate) = pair_interpolator(to.transition) {
        return Ok(interpolate(&from_value, &to_value, t));
    }

    match to.transition {
        TransitionKind::Spline => {
            let gap = f64::from(CONTROL_GAP_FRAMES);
            let (lo_value, lo_frame, left_linear) = control_point(
                bracket.control_lo,
                from_value,
                f64::from(from_frame) - gap,
                want_direction,
                resolver,
            )?;
            let (hi_value, hi_frame, right_linear) = control_point(
                bracket.control_hi,
                to_value,
                f64::from(to_frame) + gap,
                want_direction,
                resolver,
            )?;
            Ok(catmull_rom(
                [lo_value, from_value, to_value, hi_value],
                [lo_frame, f64::from(from_frame), f64::from(to_frame), hi_frame],
                left_linear,
                right_linear,
                f64::from(frame),
                config.spline_tension,
            ))
        }
        other => Err(TrackError::UnknownTransition {
            name: other.name().to_string(),
        }),
    }
}

impl TrackSource for Track {
    fn evaluate_with(
        &self,
        config: &Config,
        frame: Frame,
        want_direction: bool,
        resolver: &dyn ReferenceResolver,
    ) -> Result<Vector3<f64>, TrackError> {
        sample_track(self, config, frame, want_direction, resolver)
    }
}
