//! Corridor construction.
//!
//! A corridor is the rectangle swept by a mover travelling to its destination.
//! The front edge sits across the mover, widened by the mover's radius plus a
//! buffer; the back edge sits across the destination, widened by the
//! destination's radius only. Corners are stored in winding order:
//! front-left, front-right, back-right, back-left.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{bearing, Marker};
use crate::Bounds;

/// Four-cornered safety polygon between a mover and a destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    corners: [DVec2; 4],
}

impl Corridor {
    /// Index of the front-left corner.
    pub const FRONT_LEFT: usize = 0;
    /// Index of the front-right corner.
    pub const FRONT_RIGHT: usize = 1;
    /// Index of the back-right corner.
    pub const BACK_RIGHT: usize = 2;
    /// Index of the back-left corner.
    pub const BACK_LEFT: usize = 3;

    /// Build the corridor from `mover` to `destination`.
    ///
    /// When the two centers coincide there is no direction to sweep along and
    /// the corridor collapses onto the mover's center (see [`Self::is_degenerate`]).
    #[must_use]
    pub fn between(mover: &impl Marker, destination: &impl Marker, buffer: f64) -> Self {
        let from = mover.position();
        let to = destination.position();
        if from == to {
            return Self { corners: [from; 4] };
        }

        let forward = bearing(mover, destination);
        let reverse = bearing(destination, mover);
        let front = mover.radius() + buffer.max(0.0);
        let back = destination.radius();

        Self {
            corners: [
                from + heading(forward - FRAC_PI_2) * front,
                from + heading(forward + FRAC_PI_2) * front,
                to + heading(reverse - FRAC_PI_2) * back,
                to + heading(reverse + FRAC_PI_2) * back,
            ],
        }
    }

    /// Corners in winding order.
    #[must_use]
    pub fn vertices(&self) -> &[DVec2; 4] {
        &self.corners
    }

    /// Fewer than three distinct corners: a point or a line, which encloses nothing.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let mut distinct: Vec<DVec2> = Vec::with_capacity(4);
        for corner in self.corners {
            if !distinct.contains(&corner) {
                distinct.push(corner);
            }
        }
        distinct.len() < 3
    }

    /// Axis-aligned bounds of the corners.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let [a, b, c, d] = self.corners;
        Bounds::from_min_max(a.min(b).min(c).min(d), a.max(b).max(c).max(d))
    }

    /// Edges as `(start, end)` pairs, starting with the closing edge back-left → front-left.
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let last = self.corners[self.corners.len() - 1];
        std::iter::once(last)
            .chain(self.corners.iter().copied())
            .zip(self.corners.iter().copied())
    }
}

fn heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}
