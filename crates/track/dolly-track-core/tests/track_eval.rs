use approx::assert_relative_eq;
use dolly_track_core::{
    interp::functions::{catmull_rom, cosine, linear},
    CompositeTrack, Config, Frame, KeyedPose, NoReferences, ReferenceId, ReferenceTable, Track,
    TrackError, TrackSource, TransitionKind, WorldTransform,
};
use nalgebra::Vector3;

fn mk_track(keys: &[(Frame, [f64; 3], TransitionKind)]) -> Track {
    keys.iter()
        .map(|(frame, v, kind)| (*frame, KeyedPose::unlocked(Vector3::new(v[0], v[1], v[2]), *kind)))
        .collect()
}

#[test]
fn keyframes_are_hit_exactly_for_every_kind() {
    for kind in TransitionKind::ALL {
        let track = mk_track(&[
            (-20, [3.0, -1.0, 2.0], kind),
            (0, [0.0, 4.0, 0.5], kind),
            (7, [8.0, 8.0, -8.0], kind),
            (40, [1.0, 0.0, 1.0], kind),
        ]);
        for (frame, pose) in track.iter() {
            assert_eq!(
                track.evaluate(frame, false, &NoReferences).unwrap(),
                pose.local_value,
                "{kind:?} at {frame}"
            );
        }
    }
}

#[test]
fn linear_then_spline_interpolates_straight() {
    let track = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Linear),
        (10, [10.0, 0.0, 0.0], TransitionKind::Spline),
    ]);
    let at5 = track.evaluate(5, false, &NoReferences).unwrap();
    assert_relative_eq!(at5, Vector3::new(5.0, 0.0, 0.0), epsilon = 1e-9);
}

#[test]
fn arriving_transition_decides_the_segment() {
    // the constant key at 0 does not hold: the segment arrives at a Linear key
    let track = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Constant),
        (10, [10.0, 0.0, 0.0], TransitionKind::Linear),
    ]);
    assert_relative_eq!(
        track.evaluate(5, false, &NoReferences).unwrap(),
        Vector3::new(5.0, 0.0, 0.0),
        epsilon = 1e-12
    );

    let holding = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Linear),
        (10, [10.0, 0.0, 0.0], TransitionKind::Constant),
    ]);
    assert_eq!(holding.evaluate(9, false, &NoReferences).unwrap(), Vector3::zeros());
    assert_eq!(
        holding.evaluate(10, false, &NoReferences).unwrap(),
        Vector3::new(10.0, 0.0, 0.0)
    );
}

#[test]
fn cosine_segment_eases_between_linear_bounds() {
    let from = Vector3::new(0.0, 0.0, 0.0);
    let to = Vector3::new(0.0, -30.0, 0.0);
    let track = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Linear),
        (30, [0.0, -30.0, 0.0], TransitionKind::Cosine),
    ]);
    for frame in 1..30 {
        let t = f64::from(frame) / 30.0;
        let got = track.evaluate(frame, false, &NoReferences).unwrap();
        assert_relative_eq!(got, cosine(&from, &to, t), epsilon = 1e-12);
        assert!(got.y < 0.0 && got.y > -30.0);
    }
    assert_relative_eq!(
        track.evaluate(15, false, &NoReferences).unwrap(),
        linear(&from, &to, 0.5),
        epsilon = 1e-12
    );
}

#[test]
fn frames_outside_the_keyed_range_hold_the_ends() {
    let track = mk_track(&[
        (10, [1.0, 1.0, 1.0], TransitionKind::Spline),
        (20, [2.0, 2.0, 2.0], TransitionKind::Spline),
    ]);
    assert_eq!(track.evaluate(-500, false, &NoReferences).unwrap(), Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(track.evaluate(Frame::MAX, false, &NoReferences).unwrap(), Vector3::new(2.0, 2.0, 2.0));
    assert_eq!(
        Track::new().evaluate(0, false, &NoReferences),
        Err(TrackError::EmptyTrack)
    );
}

#[test]
fn spline_stays_continuous_across_keys() {
    let track = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Linear),
        (20, [10.0, 5.0, 0.0], TransitionKind::Spline),
        (40, [20.0, -5.0, 2.0], TransitionKind::Spline),
        (60, [30.0, 0.0, 0.0], TransitionKind::Spline),
    ]);
    let mut previous = track.evaluate(0, false, &NoReferences).unwrap();
    for frame in 1..=60 {
        let current = track.evaluate(frame, false, &NoReferences).unwrap();
        assert!((current - previous).norm() < 3.0, "jump at {frame}");
        previous = current;
    }
}

#[test]
fn linear_neighbour_is_mirrored_through_the_segment() {
    let track = mk_track(&[
        (-10, [-10.0, 5.0, 0.0], TransitionKind::Linear),
        (0, [0.0, 0.0, 0.0], TransitionKind::Spline),
        (10, [10.0, 0.0, 0.0], TransitionKind::Spline),
    ]);
    let got = track.evaluate(5, false, &NoReferences).unwrap();

    // P0' = P2 - (P1 - P0) * 2 = (-10, 10, 0); the missing right side mirrors onto P1.
    let by_hand = catmull_rom(
        [
            Vector3::new(-10.0, 10.0, 0.0),
            Vector3::zeros(),
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::zeros(),
        ],
        [-10.0, 0.0, 10.0, 20.0],
        false,
        false,
        5.0,
        0.6,
    );
    assert_relative_eq!(got, by_hand, epsilon = 1e-12);
    assert_relative_eq!(
        got,
        Vector3::new(6.182765473302339, -0.5197999199608927, 0.0),
        epsilon = 1e-9
    );
}

#[test]
fn spline_shape_follows_config() {
    let track = mk_track(&[
        (-10, [-10.0, 0.0, 0.0], TransitionKind::Spline),
        (0, [0.0, 0.0, 0.0], TransitionKind::Spline),
        (10, [10.0, 6.0, 0.0], TransitionKind::Spline),
        (20, [20.0, 0.0, 0.0], TransitionKind::Spline),
    ]);
    let default = track.evaluate(4, false, &NoReferences).unwrap();
    let loose = Config {
        spline_tension: 0.9,
        ..Config::default()
    };
    let other = track.evaluate_with(&loose, 4, false, &NoReferences).unwrap();
    assert!((default - other).norm() > 1e-6);
    // keys are still interpolated
    assert_eq!(
        track.evaluate_with(&loose, 10, false, &NoReferences).unwrap(),
        Vector3::new(10.0, 6.0, 0.0)
    );
}

#[test]
fn locked_keys_move_with_their_reference() {
    let crane = ReferenceId(42);
    let mut track = Track::new();
    track.add_keyframe(0, KeyedPose::locked(crane, Vector3::zeros(), TransitionKind::Linear));
    track.add_keyframe(10, KeyedPose::locked(crane, Vector3::new(0.0, 0.0, 10.0), TransitionKind::Linear));

    let mut table = ReferenceTable::new();
    table.upsert(crane, WorldTransform::from_translation(Vector3::new(5.0, 5.0, 0.0)));
    assert_relative_eq!(
        track.evaluate(5, false, &table).unwrap(),
        Vector3::new(5.0, 5.0, 5.0),
        epsilon = 1e-12
    );

    let resolver = |id: ReferenceId| (id == crane).then(WorldTransform::identity);
    assert_relative_eq!(
        track.evaluate(5, false, &resolver).unwrap(),
        Vector3::new(0.0, 0.0, 5.0),
        epsilon = 1e-12
    );
    assert_eq!(
        track.evaluate(5, false, &NoReferences),
        Err(TrackError::ReferenceNotFound { id: 42 })
    );
}

#[test]
fn composite_keeps_look_at_one_unit_away() {
    let position = mk_track(&[
        (0, [0.0, 0.0, 0.0], TransitionKind::Linear),
        (100, [100.0, 0.0, 0.0], TransitionKind::Cosine),
    ]);
    let look_at = mk_track(&[
        (0, [0.0, 100.0, 0.0], TransitionKind::Linear),
        (50, [200.0, 0.0, 0.0], TransitionKind::Spline),
    ]);
    let composite = CompositeTrack::new(&position, &look_at);
    for frame in (0..=100).step_by(10) {
        let p = position.evaluate(frame, false, &NoReferences).unwrap();
        let l = look_at.evaluate(frame, false, &NoReferences).unwrap();
        let c = composite.evaluate(frame, false, &NoReferences).unwrap();
        assert_relative_eq!((c - p).norm(), 1.0, epsilon = 1e-9);
        assert_relative_eq!((c - p).normalize(), (l - p).normalize(), epsilon = 1e-9);
    }
}
