//! Interpolation helpers:
//! - constant (hold left)
//! - linear (component-wise blend)
//! - cosine (linear blend with eased factor)
//! - catmull_rom (non-uniform Catmull-Rom through the middle two of four points)

use std::f64::consts::PI;

use nalgebra::Vector3;

/// Knot distance exponent used when no configuration is supplied.
pub const DEFAULT_TENSION: f64 = 0.6;

/// Step interpolation: the segment holds its left value.
#[inline]
pub fn constant(from: &Vector3<f64>, _to: &Vector3<f64>, _t: f64) -> Vector3<f64> {
    *from
}

#[inline]
pub fn linear(from: &Vector3<f64>, to: &Vector3<f64>, t: f64) -> Vector3<f64> {
    from * (1.0 - t) + to * t
}

/// Linear blend with a half-cosine ease in and out.
#[inline]
pub fn cosine(from: &Vector3<f64>, to: &Vector3<f64>, t: f64) -> Vector3<f64> {
    linear(from, to, 0.5 - 0.5 * (t * PI).cos())
}

/// Four control points and their frames around the segment `points[1] -> points[2]`.
///
/// `left_linear`/`right_linear` mark an outer control point whose own segment
/// is a straight run; the curve then mirrors the inner segment instead of
/// bending towards that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplineSegment {
    pub points: [Vector3<f64>; 4],
    pub frames: [f64; 4],
    pub left_linear: bool,
    pub right_linear: bool,
}

impl SplineSegment {
    pub fn sample(&self, frame: f64) -> Vector3<f64> {
        self.sample_with_tension(frame, DEFAULT_TENSION)
    }

    pub fn sample_with_tension(&self, frame: f64, tension: f64) -> Vector3<f64> {
        catmull_rom(
            self.points,
            self.frames,
            self.left_linear,
            self.right_linear,
            frame,
            tension,
        )
    }
}

/// Catmull-Rom spline between `p[1]` and `p[2]`, evaluated at `f` in `[f[1], f[2]]`.
///
/// Knots come from the distance between consecutive points in (x, y, z, frame)
/// space raised to `tension`, so spatially long or temporally slow stretches
/// get proportionally more parameter range. Uses vector length rather than
/// per-component distance to stay independent of orientation.
pub fn catmull_rom(
    p: [Vector3<f64>; 4],
    f: [f64; 4],
    left_linear: bool,
    right_linear: bool,
    at: f64,
    tension: f64,
) -> Vector3<f64> {
    let [mut p0, p1, p2, mut p3] = p;
    let [mut f0, f1, f2, mut f3] = f;

    // The tangent at P1 is parallel to P0-P2; place P0 so it continues P0-P1.
    if left_linear {
        f0 = f1 - (f2 - f1);
        let fac = (f2 - f0) / (f1 - f0);
        p0 = p2 - (p1 - p0) * fac;
    }
    if right_linear {
        f3 = f2 - (f1 - f2);
        let fac = (f3 - f1) / (f3 - f2);
        p3 = p1 - (p2 - p3) * fac;
    }

    let gap = |a: &Vector3<f64>, b: &Vector3<f64>, fa: f64, fb: f64| -> f64 {
        ((b - a).norm_squared() + (fb - fa) * (fb - fa))
            .sqrt()
            .powf(tension)
    };
    let t0 = 0.0;
    let t1 = t0 + gap(&p0, &p1, f0, f1);
    let t2 = t1 + gap(&p1, &p2, f1, f2);
    let t3 = t2 + gap(&p2, &p3, f2, f3);

    let t = t1 + (t2 - t1) * ((at - f1) / (f2 - f1));

    let a1 = p0 * ((t1 - t) / (t1 - t0)) + p1 * ((t - t0) / (t1 - t0));
    let a2 = p1 * ((t2 - t) / (t2 - t1)) + p2 * ((t - t1) / (t2 - t1));
    let a3 = p2 * ((t3 - t) / (t3 - t2)) + p3 * ((t - t2) / (t3 - t2));

    let b1 = a1 * ((t2 - t) / (t2 - t0)) + a2 * ((t - t0) / (t2 - t0));
    let b2 = a2 * ((t3 - t) / (t3 - t1)) + a3 * ((t - t1) / (t3 - t1));

    b1 * ((t2 - t) / (t2 - t1)) + b2 * ((t - t1) / (t2 - t1))
}

/// Spline with the default tension.
#[inline]
pub fn spline(
    p: [Vector3<f64>; 4],
    f: [f64; 4],
    left_linear: bool,
    right_linear: bool,
    at: f64,
) -> Vector3<f64> {
    catmull_rom(p, f, left_linear, right_linear, at, DEFAULT_TENSION)
}
