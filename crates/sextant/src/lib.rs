//! # Sextant
//!
//! Collision-aware navigation for circular entities on a 2D plane.
//!
//! Every entity (ship, planet, synthetic probe point) is a circle exposed through
//! the [`Marker`] trait. Navigation answers one question per call: is the straight
//! path from a mover to its destination obstructed, and if so, where should the
//! mover head instead?
//!
//! - **Geometry**: distances, bearings, angle normalization, offset points
//! - **Corridor**: the swept safety rectangle between mover and destination
//! - **Scanner**: per-turn obstacle index and corridor intrusion tests
//! - **Planner**: grid waypoint search and bounded deflection
//!
//! ## Quick Start
//!
//! ```rust
//! use sextant::{Location, NavConfig, NavigationDecision, Navigator, ObstacleIndex};
//!
//! let index = ObstacleIndex::from_markers([Location::new(50.0, 0.0, 10.0)]);
//! let config = NavConfig::default();
//! let navigator = Navigator::new(&index, &config);
//!
//! let mover = Location::new(0.0, 0.0, 1.0);
//! let destination = Location::new(100.0, 0.0, 1.0);
//!
//! let plan = navigator.plan_grid(&mover, &destination);
//! assert!(matches!(plan.decision, NavigationDecision::Waypoint(_)));
//! ```
//!
//! The core never fails: degenerate inputs resolve to "not blocked", the
//! original destination, or [`NavigationDecision::NoOp`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod corridor;
pub mod geometry;
pub mod planner;
pub mod scanner;

// Re-exports for convenience
pub use corridor::Corridor;
pub use geometry::{
    approach_location, bearing, bounded_degrees, degrees, distance, edge_distance,
    perpendicular_location, Location, Marker, MarkerKey, Side,
};
pub use planner::{NavConfig, NavigationDecision, Navigator, Plan};
pub use scanner::{in_polygon, in_triangle, Intrusion, ObstacleIndex, DEFAULT_PROBE_EPSILON};

use glam::DVec2;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: DVec2,
    /// Maximum corner
    pub max: DVec2,
}

impl Bounds {
    /// Create bounds from min/max corners.
    #[must_use]
    pub fn from_min_max(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Get the center of the bounds.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the bounds.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Grow every side by `margin`.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(margin),
            max: self.max + DVec2::splat(margin),
        }
    }

    /// Pad the narrower axis symmetrically so both axes share the larger extent.
    #[must_use]
    pub fn squared(&self) -> Self {
        let size = self.size();
        let side = size.x.max(size.y);
        let half = DVec2::splat(side * 0.5);
        let center = self.center();
        let mut out = *self;
        if size.x < side {
            out.min.x = center.x - half.x;
            out.max.x = center.x + half.x;
        }
        if size.y < side {
            out.min.y = center.y - half.y;
            out.max.y = center.y + half.y;
        }
        out
    }

    /// Check if a point is inside the bounds (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
