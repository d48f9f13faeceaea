//! Textual track and shot format.
//!
//! A track is a run of bracketed entries, each followed by a space:
//!
//! ```text
//! [5:Locked:170:<7,8,9>:Linear] [15:Unlocked::<0.5,-1,NaN>:Spline]
//! ```
//!
//! A shot is `Position: <entries>, LookAt: <entries>, UpVec: <entries>`.
//! Decoding is all-or-nothing: any grammar violation, duplicate frame or
//! trailing text fails the whole decode.

use std::fmt::Write as _;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::error::TrackError;
use crate::ids::ReferenceId;
use crate::pose::{KeyedPose, ReferenceMode, TransitionKind};
use crate::scanner::Scanner;
use crate::shot::Shot;
use crate::track::{Frame, Track};

fn write_entry(out: &mut String, frame: Frame, pose: &KeyedPose) -> Result<(), TrackError> {
    let v = &pose.local_value;
    // NaN has a spelling in the grammar, the infinities do not
    if let Some(&value) = v.iter().find(|c| c.is_infinite()) {
        return Err(TrackError::Unencodable { frame, value });
    }
    // writing into a String cannot fail
    let _ = write!(out, "[{frame}:{}:", pose.mode.name());
    if let ReferenceMode::Locked(id) = pose.mode {
        let _ = write!(out, "{id}");
    }
    let _ = write!(
        out,
        ":<{},{},{}>:{}] ",
        v.x,
        v.y,
        v.z,
        pose.transition.name()
    );
    Ok(())
}

/// Encode a track's entries. Fails on an infinite component, which would not decode.
pub fn encode_track(track: &Track) -> Result<String, TrackError> {
    let mut out = String::new();
    for (frame, pose) in track.iter() {
        write_entry(&mut out, frame, pose)?;
    }
    Ok(out)
}

fn read_component(scanner: &mut Scanner<'_>, axis: &str) -> Result<f64, TrackError> {
    scanner
        .read_float()
        .ok_or_else(|| scanner.fail(format!("vector {axis} expected")))
}

fn read_entry(scanner: &mut Scanner<'_>) -> Result<(Frame, KeyedPose), TrackError> {
    let raw_frame = scanner
        .read_integer()
        .ok_or_else(|| scanner.fail("frame expected"))?;
    let frame =
        Frame::try_from(raw_frame).map_err(|_| TrackError::FrameOutOfRange { value: raw_frame })?;
    scanner.expect(":")?;

    let locked = if scanner.accept("Locked") {
        true
    } else if scanner.accept("Unlocked") {
        false
    } else {
        return Err(scanner.fail("unknown track mode"));
    };
    scanner.expect(":")?;
    let mode = if locked {
        let id = scanner
            .read_integer()
            .ok_or_else(|| scanner.fail("entity id expected"))?;
        ReferenceMode::Locked(ReferenceId(id))
    } else {
        ReferenceMode::Unlocked
    };
    scanner.expect(":")?;

    scanner.expect("<")?;
    let x = read_component(scanner, "x")?;
    scanner.expect(",")?;
    let y = read_component(scanner, "y")?;
    scanner.expect(",")?;
    let z = read_component(scanner, "z")?;
    scanner.expect(">")?;
    scanner.expect(":")?;

    let transition = TransitionKind::ALL
        .into_iter()
        .find(|kind| scanner.accept(kind.name()))
        .ok_or_else(|| scanner.fail("unknown transition mode"))?;
    scanner.expect("]")?;

    Ok((
        frame,
        KeyedPose {
            mode,
            local_value: Vector3::new(x, y, z),
            transition,
        },
    ))
}

/// Read track entries until the next token is not `[`.
pub fn decode_track(scanner: &mut Scanner<'_>) -> Result<Track, TrackError> {
    let mut track = Track::new();
    while scanner.accept("[") {
        let (frame, pose) = read_entry(scanner)?;
        if track.is_keyframe(frame) {
            return Err(scanner.fail(format!("duplicate frame {frame}")));
        }
        track.add_keyframe(frame, pose);
    }
    log::debug!("decoded track with {} keyframes", track.len());
    Ok(track)
}

/// Encode a shot's three tracks.
pub fn encode_shot(shot: &Shot) -> Result<String, TrackError> {
    Ok(format!(
        "Position: {}, LookAt: {}, UpVec: {}",
        encode_track(&shot.position)?,
        encode_track(&shot.look_at)?,
        encode_track(&shot.up)?
    ))
}

/// Decode a shot; the scanner must be fully consumed afterwards.
pub fn decode_shot(scanner: &mut Scanner<'_>) -> Result<Shot, TrackError> {
    scanner.expect("Position")?;
    scanner.expect(":")?;
    let position = decode_track(scanner)?;

    scanner.expect(",")?;
    scanner.expect("LookAt")?;
    scanner.expect(":")?;
    let look_at = decode_track(scanner)?;

    scanner.expect(",")?;
    scanner.expect("UpVec")?;
    scanner.expect(":")?;
    let up = decode_track(scanner)?;

    scanner.finish()?;
    Ok(Shot::new(position, look_at, up))
}

impl FromStr for Track {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scanner = Scanner::new(s);
        let track = decode_track(&mut scanner)?;
        scanner.finish()?;
        Ok(track)
    }
}

impl FromStr for Shot {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_shot(&mut Scanner::new(s))
    }
}
