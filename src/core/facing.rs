//! Eight-way facing of an actor as seen by the viewer.
use crate::core::math::{Vec2, signed_angle_between};

/// Compass label of the side of the actor the viewer sees.
///
/// `South` means the actor faces the viewer; `North` means the viewer is
/// behind it. Positive relative angles run S -> SE -> E -> NE -> N.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    South,
    SouthEast,
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::South,
        Facing::SouthEast,
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
    ];

    /// Buckets a relative angle in degrees into one of eight 45 degree
    /// sectors centred on the compass directions. Boundaries belong to the
    /// sector on their positive side (22.5 -> SouthEast, -22.5 -> South).
    pub fn from_relative_angle(deg: f32) -> Facing {
        let shifted = (deg + 22.5 + 360.0).rem_euclid(360.0);
        let bucket = (shifted / 45.0).floor() as usize;
        Facing::ALL[bucket.min(7)]
    }

    /// Facing for an actor looking along `orientation`, seen from `viewer`.
    pub fn for_viewer(actor_pos: Vec2, orientation: Vec2, viewer: Vec2) -> Facing {
        let to_viewer = viewer - actor_pos;
        Facing::from_relative_angle(signed_angle_between(orientation, to_viewer))
    }

    /// Clip-name suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Facing::South => "s",
            Facing::SouthEast => "se",
            Facing::East => "e",
            Facing::NorthEast => "ne",
            Facing::North => "n",
            Facing::NorthWest => "nw",
            Facing::West => "w",
            Facing::SouthWest => "sw",
        }
    }
}
