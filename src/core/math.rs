//! Degree-based angle helpers over `glam::Vec2`. Angles are in degrees
//! throughout; 0 points along +x and 90 along +y.
pub use glam::Vec2;

/// Unit vector pointing along `deg`.
#[inline]
pub fn dir_from_degrees(deg: f32) -> Vec2 {
    Vec2::from_angle(deg.to_radians())
}

/// Direction of `v` in degrees, in (-180, 180].
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// `v` rotated by `deg` degrees.
#[inline]
pub fn rotate_degrees(v: Vec2, deg: f32) -> Vec2 {
    Vec2::from_angle(deg.to_radians()).rotate(v)
}

/// Wraps an angle into [0, 360).
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed angle turning `from` onto `to`, in (-180, 180].
///
/// A raw difference of +359 reports as -1.
pub fn signed_angle_between(from: Vec2, to: Vec2) -> f32 {
    let mut diff = heading_of(to) - heading_of(from);
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}
