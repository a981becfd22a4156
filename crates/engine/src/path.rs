//! The fixed route enemies travel, expressed in percentage coordinates.
//!
//! The path is a closed table of legs; each leg is a coordinate predicate
//! plus a unit velocity. `progress` folds a position into a single scalar
//! (cumulative distance along the route) used only for targeting tie-breaks.

/// Where enemies enter the field.
pub const SPAWN: (f32, f32) = (0.0, 0.0);

/// An enemy whose x reaches this has left the field.
pub const END_X: f32 = 100.0;

const SQRT_2: f32 = std::f32::consts::SQRT_2;
const DIAG: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Unit velocity of one leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    DiagDown,
    Down,
    Right,
    DiagUp,
}

impl Heading {
    fn velocity(self) -> (f32, f32) {
        match self {
            Heading::DiagDown => (DIAG, DIAG),
            Heading::Down => (0.0, 1.0),
            Heading::Right => (1.0, 0.0),
            Heading::DiagUp => (DIAG, -DIAG),
        }
    }
}

struct Leg {
    heading: Heading,
    /// Cumulative route length at the leg's start; makes `progress`
    /// comparable across legs.
    offset: f32,
    /// Leg-start coordinate on the axis the leg travels along.
    origin: f32,
}

// Route: (0,0) diagonally to (20,20), down to (20,60), right to (50,60),
// down to (50,85), right to (70,85), diagonally up to (85,70), then right
// off the field at x=100.
const LEGS: [Leg; 7] = [
    Leg { heading: Heading::DiagDown, offset: 0.0, origin: 0.0 },
    Leg { heading: Heading::Down, offset: 28.284, origin: 20.0 },
    Leg { heading: Heading::Right, offset: 68.284, origin: 20.0 },
    Leg { heading: Heading::Down, offset: 98.284, origin: 60.0 },
    Leg { heading: Heading::Right, offset: 123.284, origin: 50.0 },
    Leg { heading: Heading::DiagUp, offset: 143.284, origin: 70.0 },
    Leg { heading: Heading::Right, offset: 164.497, origin: 85.0 },
];

/// First-match leg selection; predicates are ordered so every reachable
/// position lands on exactly one leg.
fn active_leg(x: f32, y: f32) -> usize {
    if x < 20.0 {
        0
    } else if x < 50.0 && y < 60.0 {
        1
    } else if x < 50.0 {
        2
    } else if x < 70.0 && y < 85.0 {
        3
    } else if x < 70.0 {
        4
    } else if x < 85.0 {
        5
    } else {
        6
    }
}

/// Move a position `distance` units along its active leg.
/// Returns the new position and whether the path end was passed.
pub fn advance(x: f32, y: f32, distance: f32) -> ((f32, f32), bool) {
    let leg = &LEGS[active_leg(x, y)];
    let (dx, dy) = leg.heading.velocity();
    let nx = x + dx * distance;
    let ny = y + dy * distance;
    ((nx, ny), nx >= END_X)
}

/// Scalar distance travelled along the route. Monotonically increasing as
/// an enemy walks the path; never used for movement itself.
pub fn progress(x: f32, y: f32) -> f32 {
    let leg = &LEGS[active_leg(x, y)];
    let local = match leg.heading {
        Heading::DiagDown | Heading::DiagUp => (x - leg.origin) * SQRT_2,
        Heading::Down => y - leg.origin,
        Heading::Right => x - leg.origin,
    };
    leg.offset + local
}
