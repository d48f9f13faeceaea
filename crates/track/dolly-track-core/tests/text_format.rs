use dolly_track_core::{
    decode_track, encode_shot, encode_track, KeyedPose, ReferenceId, Scanner, Shot, Track,
    TrackError, TransitionKind,
};
use nalgebra::Vector3;

#[test]
fn decode_then_encode_is_stable() {
    let text = "[-3:Unlocked::<0.1,-2.75,1e0>:Linear] ";
    // exponents are not part of the grammar
    assert!(text.parse::<Track>().is_err());

    let text = "[-3:Unlocked::<0.1,-2.75,100>:Linear] [12:Locked:9007199254740993:<-0,NaN,0.3333333333333333>:Spline] ";
    let track: Track = text.parse().unwrap();
    assert_eq!(encode_track(&track).unwrap(), text);
}

#[test]
fn encode_then_decode_preserves_poses() {
    let mut track = Track::new();
    track.add_keyframe(
        i32::MIN,
        KeyedPose::unlocked(Vector3::new(1.0 / 3.0, -1e-7, 123456.789), TransitionKind::Cosine),
    );
    track.add_keyframe(
        0,
        KeyedPose::locked(ReferenceId(-1), Vector3::new(0.1, 0.2, 0.3), TransitionKind::Constant),
    );
    track.add_keyframe(
        i32::MAX,
        KeyedPose::unlocked(Vector3::new(f64::MAX, f64::MIN_POSITIVE, -0.0), TransitionKind::Spline),
    );

    let encoded = encode_track(&track).unwrap();
    let mut scanner = Scanner::new(&encoded);
    let decoded = decode_track(&mut scanner).unwrap();
    scanner.finish().unwrap();
    assert_eq!(decoded, track);
}

#[test]
fn only_nan_of_the_non_finite_values_is_written() {
    let mut track = Track::new();
    track.add_keyframe(
        1,
        KeyedPose::unlocked(Vector3::new(f64::NAN, 0.0, 0.0), TransitionKind::Linear),
    );
    let text = encode_track(&track).unwrap();
    let back: Track = text.parse().unwrap();
    assert!(back.get(1).unwrap().local_value.x.is_nan());

    for bad in [f64::INFINITY, f64::NEG_INFINITY] {
        track.add_keyframe(2, KeyedPose::unlocked(Vector3::new(0.0, 0.0, bad), TransitionKind::Spline));
        assert_eq!(
            encode_track(&track),
            Err(TrackError::Unencodable { frame: 2, value: bad })
        );
    }
    // the text the encoder would have produced is not readable either
    assert!("[2:Unlocked::<0,0,inf>:Spline] ".parse::<Track>().is_err());
}

#[test]
fn decode_stops_at_first_non_entry() {
    let mut scanner = Scanner::new("[1:Unlocked::<1,1,1>:Linear] , rest");
    let track = decode_track(&mut scanner).unwrap();
    assert_eq!(track.len(), 1);
    assert_eq!(scanner.rest().trim_start(), ", rest");
}

#[test]
fn shot_decoding_is_all_or_nothing() {
    let good = "Position: [0:Unlocked::<0,0,0>:Linear] , LookAt: , UpVec: [0:Unlocked::<0,1,0>:Spline] ";
    let shot: Shot = good.parse().unwrap();
    assert_eq!(shot.position.len(), 1);
    assert!(shot.look_at.is_empty());
    assert_eq!(encode_shot(&shot).unwrap(), good);

    for bad in [
        "Position: [0:Unlocked::<0,0,0>:Linear] , LookAt: ",
        "Position: , LookAt: , UpVec: [0:Unlocked::<0,1,0>:Spline",
        "LookAt: , Position: , UpVec: ",
        "Position: , LookAt: , UpVec: \textra",
    ] {
        assert!(bad.parse::<Shot>().is_err(), "{bad:?}");
    }
}

#[test]
fn parse_errors_carry_bounded_context() {
    let long_tail = format!("[1:Unlocked::<0,0,0>:Linear] {}", "x".repeat(100));
    match long_tail.parse::<Track>() {
        Err(TrackError::Parse { message, context }) => {
            assert_eq!(message, "Parsing ended, but text was left over");
            assert_eq!(context, "x".repeat(32));
        }
        other => panic!("unexpected {other:?}"),
    }
}
