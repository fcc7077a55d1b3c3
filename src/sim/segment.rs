//! Segment intersection tests
//!
//! Segments are written parametrically as `p + r·f` for `f ∈ [0, 1]`.
//! Two segments `p + r·f` and `q + s·g` meet where
//!
//! ```text
//! f = (q − p) × s / (r × s)
//! g = (q − p) × r / (r × s)
//! ```
//!
//! and both parameters land in `[0, 1]`. Parallel or degenerate pairs
//! (`|r × s| ≤ SMALL_NUMBER`) never intersect.

use glam::Vec2;

use crate::consts::SMALL_NUMBER;
use crate::cross;

/// A segment as start point plus start-to-end vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub origin: Vec2,
    pub delta: Vec2,
}

impl Segment {
    pub fn new(origin: Vec2, delta: Vec2) -> Self {
        Self { origin, delta }
    }

    pub fn between(a: Vec2, b: Vec2) -> Self {
        Self::new(a, b - a)
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.origin + self.delta
    }

    /// Static test against another segment
    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self.origin, self.delta, other.origin, other.delta)
    }

    /// Swept test: each segment moves at its own velocity during `[0, dt]`
    pub fn intersects_moving(&self, vel: Vec2, other: &Segment, other_vel: Vec2, dt: f32) -> bool {
        moving_segments_intersect(
            self.origin,
            self.delta,
            vel,
            other.origin,
            other.delta,
            other_vel,
            dt,
        )
    }
}

/// Static segment/segment intersection
pub fn segments_intersect(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> bool {
    let det = cross(r, s);
    if det.abs() <= SMALL_NUMBER {
        return false;
    }

    let diff = q - p;
    let f = cross(diff, s / det);
    let g = cross(diff, r / det);
    (0.0..=1.0).contains(&f) && (0.0..=1.0).contains(&g)
}

/// Swept segment/segment intersection over `t ∈ [0, dt]`
///
/// Segment A starts at `p` and moves at `vp`, segment B starts at `q` and
/// moves at `vq`. Only the relative motion `v = vq − vp` matters, which makes
/// both parameters linear in `t`:
///
/// ```text
/// f(t) = (q − p) × s / det + (v × s / det)·t
/// g(t) = (q − p) × r / det + (v × r / det)·t
/// ```
///
/// Each of `0 ≤ f(t) ≤ 1` and `0 ≤ g(t) ≤ 1` is solved for an interval of
/// `t`; the segments touch during the frame iff those intervals and
/// `[0, dt]` overlap.
pub fn moving_segments_intersect(
    p: Vec2,
    r: Vec2,
    vp: Vec2,
    q: Vec2,
    s: Vec2,
    vq: Vec2,
    dt: f32,
) -> bool {
    let det = cross(r, s);
    if det.abs() <= SMALL_NUMBER {
        return false;
    }

    let v = vq - vp;
    let diff = q - p;

    let (lo_s, hi_s) = parameter_window(diff, v, s / det, dt);
    let (lo_r, hi_r) = parameter_window(diff, v, r / det, dt);

    let lo = lo_s.max(lo_r).max(0.0);
    let hi = hi_s.min(hi_r).min(dt);
    lo <= hi
}

/// Interval of `t` for which `0 ≤ slope·t + base ≤ 1`
///
/// A flat parameter (|slope| below [`SMALL_NUMBER`]) either holds for the
/// whole frame or never.
fn parameter_window(diff: Vec2, v: Vec2, dir_over_det: Vec2, dt: f32) -> (f32, f32) {
    let base = cross(diff, dir_over_det);
    let slope = cross(v, dir_over_det);

    if slope.abs() < SMALL_NUMBER {
        return if (0.0..=1.0).contains(&base) {
            (0.0, dt)
        } else {
            (dt + 1.0, -1.0)
        };
    }

    let lo = -base / slope;
    let hi = (1.0 - base) / slope;
    if slope < 0.0 { (hi, lo) } else { (lo, hi) }
}
