//! Cutting a large asteroid in two
//!
//! The cut runs from the vertex nearest the impact to the vertex halfway
//! around the ring. Both halves keep the two cut vertices, so a ring of `n`
//! vertices yields halves whose sizes add up to `n + 2`. The halves drift
//! apart along the normal of the cut line.

use glam::Vec2;

/// Result of cutting a polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Local-space vertex rings. `halves[0]` receives `-impulse` and
    /// `halves[1]` receives `+impulse`.
    pub halves: [Vec<Vec2>; 2],
    /// Separation velocity along the cut normal
    pub impulse: Vec2,
    /// Ring indices of the two cut vertices, lower index first
    pub cut: (usize, usize),
}

/// Cut a polygon ring near `hit`
///
/// `local` and `world` are the same ring in local and world space; the
/// nearest vertex is picked in world space while the halves are built
/// from local vertices so they can reuse the parent's transform.
///
/// Panics if the ring has fewer than two vertices or the two views differ
/// in length.
pub fn split_polygon(local: &[Vec2], world: &[Vec2], hit: Vec2, blast: f32) -> Split {
    let n = local.len();
    assert!(n >= 2, "cannot split a ring of {n} vertices");
    assert_eq!(n, world.len(), "local and world rings differ in length");

    let mut nearest = 0;
    let mut best = f32::INFINITY;
    for (i, v) in world.iter().enumerate() {
        let d = v.distance_squared(hit);
        if d < best {
            best = d;
            nearest = i;
        }
    }
    let opposite = (nearest + n / 2) % n;

    let div = world[nearest] - world[opposite];
    let impulse = Vec2::new(div.y, -div.x).normalize_or_zero() * blast;

    let swapped = nearest > opposite;
    let (lo, hi) = if swapped {
        (opposite, nearest)
    } else {
        (nearest, opposite)
    };

    // Walk lo..=hi for one half and hi..n, 0..=lo for the other, so each
    // ring starts and ends on the cut
    let inner: Vec<Vec2> = local[lo..=hi].to_vec();
    let outer: Vec<Vec2> = local[hi..].iter().chain(&local[..=lo]).copied().collect();

    let halves = if swapped {
        [outer, inner]
    } else {
        [inner, outer]
    };

    Split {
        halves,
        impulse,
        cut: (lo, hi),
    }
}
