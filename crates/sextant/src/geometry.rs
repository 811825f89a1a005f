//! Geometric primitives: circles, distances, bearings and offset points.
//!
//! Everything that takes part in navigation is a circle. Ships, planets and
//! synthetic probe points all implement [`Marker`], so the corridor builder and
//! scanner never need to know what kind of entity they are looking at.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identity of a marker within a turn.
///
/// Keys let the scanner skip the mover and destination when they are also
/// members of the obstacle index. Synthetic points carry no key.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerKey(u64);

impl MarkerKey {
    /// Creates a key from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkerKey({:#x})", self.0)
    }
}

/// Anything that has a position and a radius.
pub trait Marker {
    /// Center of the circle.
    fn position(&self) -> DVec2;

    /// Radius of the circle (non-negative, may be zero).
    fn radius(&self) -> f64;

    /// Identity used to exclude this marker from obstacle scans.
    fn key(&self) -> Option<MarkerKey> {
        None
    }
}

impl<M: Marker + ?Sized> Marker for &M {
    fn position(&self) -> DVec2 {
        (**self).position()
    }

    fn radius(&self) -> f64 {
        (**self).radius()
    }

    fn key(&self) -> Option<MarkerKey> {
        (**self).key()
    }
}

/// A plain circle, optionally tagged with the key of the entity it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Center
    pub position: DVec2,
    /// Radius
    pub radius: f64,
    /// Identity of the entity this circle describes, if any
    #[serde(default)]
    pub key: Option<MarkerKey>,
}

impl Location {
    /// Create an anonymous circle.
    #[must_use]
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            radius,
            key: None,
        }
    }

    /// Create a zero-radius point.
    #[must_use]
    pub fn point(position: DVec2) -> Self {
        Self {
            position,
            radius: 0.0,
            key: None,
        }
    }

    /// Snapshot any marker into a value.
    #[must_use]
    pub fn of(marker: &impl Marker) -> Self {
        Self {
            position: marker.position(),
            radius: marker.radius(),
            key: marker.key(),
        }
    }

    /// Attach an identity.
    #[must_use]
    pub fn with_key(mut self, key: MarkerKey) -> Self {
        self.key = Some(key);
        self
    }
}

impl Marker for Location {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn key(&self) -> Option<MarkerKey> {
        self.key
    }
}

/// Side of a path, as seen from the point of view looking along its bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Rotate the bearing by -90°
    Left,
    /// Rotate the bearing by +90°
    Right,
}

impl Side {
    /// Sign multiplier applied to the perpendicular rotation.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Euclidean center-to-center distance.
#[must_use]
pub fn distance(a: &impl Marker, b: &impl Marker) -> f64 {
    a.position().distance(b.position())
}

/// Clearance between the two circles; negative when they overlap.
#[must_use]
pub fn edge_distance(a: &impl Marker, b: &impl Marker) -> f64 {
    distance(a, b) - a.radius() - b.radius()
}

/// Angle in radians from `from` toward `to`.
///
/// Coincident points have no direction; the bearing is defined as 0.
#[must_use]
pub fn bearing(from: &impl Marker, to: &impl Marker) -> f64 {
    let delta = to.position() - from.position();
    if delta == DVec2::ZERO {
        return 0.0;
    }
    delta.y.atan2(delta.x)
}

/// Radians to degrees.
#[must_use]
pub fn degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Round to the nearest whole degree (halves away from zero) and wrap into `[0, 360)`.
///
/// ```
/// use sextant::bounded_degrees;
///
/// assert_eq!(bounded_degrees(-10.0), 350);
/// assert_eq!(bounded_degrees(0.5), 1);
/// assert_eq!(bounded_degrees(180.5), 181);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bounded_degrees(degrees: f64) -> u16 {
    if !degrees.is_finite() {
        return 0;
    }
    let rounded = degrees.round() as i64;
    rounded.rem_euclid(360) as u16
}

/// Unit vector for an angle in radians.
fn heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Point beside `target`, perpendicular to the line from `from` to `target`.
///
/// The offset is `target.radius() + buffer`, rotated a quarter turn to `side`.
/// Both axes use the same rotated angle.
#[must_use]
pub fn perpendicular_location(
    buffer: f64,
    side: Side,
    target: &impl Marker,
    from: &impl Marker,
) -> Location {
    let angle = bearing(from, target) + side.sign() * FRAC_PI_2;
    let offset = target.radius() + buffer;
    Location::point(target.position() + heading(angle) * offset)
}

/// Point on the segment from `target` toward `from`, `buffer` beyond the target's edge.
///
/// Used to aim at the ring around a planet rather than its center.
#[must_use]
pub fn approach_location(buffer: f64, target: &impl Marker, from: &impl Marker) -> Location {
    let angle = bearing(target, from);
    let offset = target.radius() + buffer;
    Location::point(target.position() + heading(angle) * offset)
}
