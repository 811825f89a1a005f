//! Obstacle scanning.
//!
//! The [`ObstacleIndex`] holds every circle in play for one turn. It is built
//! once and shared by reference across all navigation calls of that turn.
//!
//! A candidate intrudes into a corridor when any of these hold, checked in order:
//!
//! 1. **Broad phase** (reject only): its center lies outside the corridor's
//!    bounding box grown by its own radius.
//! 2. **Vertex**: it has a radius and a corridor corner lies within it.
//! 3. **Interior**: its center lies inside the corridor polygon.
//! 4. **Edge crossing**: the projection of its center onto an edge line (or
//!    one of two points nudged by a small epsilon around it) lies within its
//!    radius and inside the polygon.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::corridor::Corridor;
use crate::geometry::{Location, Marker, MarkerKey};

/// Offset applied to edge probes to bracket rounding error.
pub const DEFAULT_PROBE_EPSILON: f64 = 0.0001;

/// How a candidate was found to intrude into a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrusion {
    /// A corridor corner lies within the candidate's radius.
    Vertex,
    /// The candidate's center lies inside the corridor.
    Interior,
    /// The candidate's circle crosses a corridor edge.
    EdgeCrossing,
}

/// All circles in play for the current turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleIndex {
    obstacles: Vec<Location>,
    probe_epsilon: f64,
}

impl ObstacleIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            probe_epsilon: DEFAULT_PROBE_EPSILON,
        }
    }

    /// Build an index from any collection of markers.
    pub fn from_markers<M: Marker>(markers: impl IntoIterator<Item = M>) -> Self {
        let mut index = Self::new();
        index.extend(markers);
        index
    }

    /// Override the edge-probe epsilon.
    #[must_use]
    pub fn with_probe_epsilon(mut self, epsilon: f64) -> Self {
        self.probe_epsilon = epsilon.abs();
        self
    }

    /// Offset applied to each edge projection when probing for edge crossings.
    #[must_use]
    pub fn probe_epsilon(&self) -> f64 {
        self.probe_epsilon
    }

    /// Add one marker.
    pub fn push(&mut self, marker: &impl Marker) {
        self.obstacles.push(Location::of(marker));
    }

    /// Add many markers.
    pub fn extend<M: Marker>(&mut self, markers: impl IntoIterator<Item = M>) {
        self.obstacles
            .extend(markers.into_iter().map(|m| Location::of(&m)));
    }

    /// Number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// True when the index holds no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Iterate over the stored circles.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.obstacles.iter()
    }

    /// True when any obstacle, other than those keyed in `exclude`, intrudes into `corridor`.
    #[must_use]
    pub fn is_blocked(&self, corridor: &Corridor, exclude: &[MarkerKey]) -> bool {
        self.first_intrusion(corridor, exclude).is_some()
    }

    /// First intruding obstacle in index order, with the way it intrudes.
    #[must_use]
    pub fn first_intrusion(
        &self,
        corridor: &Corridor,
        exclude: &[MarkerKey],
    ) -> Option<(&Location, Intrusion)> {
        if corridor.is_degenerate() {
            return None;
        }

        let bounds = corridor.bounds();
        self.obstacles
            .iter()
            .filter(|o| o.key.map_or(true, |k| !exclude.contains(&k)))
            .filter(|o| bounds.expand(o.radius).contains(o.position))
            .find_map(|o| {
                let found = self.intrusion(corridor, o)?;
                trace!(position = ?o.position, radius = o.radius, ?found, "corridor intrusion");
                Some((o, found))
            })
    }

    /// Classify how `candidate` intrudes into `corridor`, skipping the broad phase.
    #[must_use]
    pub fn intrusion(&self, corridor: &Corridor, candidate: &impl Marker) -> Option<Intrusion> {
        let vertices = corridor.vertices();
        let center = candidate.position();
        let radius = candidate.radius();

        if radius > 0.0 && vertices.iter().any(|v| v.distance(center) <= radius) {
            return Some(Intrusion::Vertex);
        }

        if in_polygon(center, vertices) {
            return Some(Intrusion::Interior);
        }

        let nudge = DVec2::splat(self.probe_epsilon);
        for (start, end) in corridor.edges() {
            let direction = end - start;
            let length_squared = direction.length_squared();
            if length_squared == 0.0 {
                continue;
            }

            let t = (center - start).dot(direction) / length_squared;
            let projected = start + direction * t;

            let crosses = [projected, projected + nudge, projected - nudge]
                .into_iter()
                .any(|probe| probe.distance(center) <= radius && in_polygon(probe, vertices));
            if crosses {
                return Some(Intrusion::EdgeCrossing);
            }
        }

        None
    }
}

impl Default for ObstacleIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Barycentric weights of `p` in triangle `abc`, or `None` when the triangle has no area.
fn barycentric(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> Option<(f64, f64, f64)> {
    let p = p - a;
    let b = b - a;
    let c = c - a;

    let d = b.x * c.y - c.x * b.y;
    if d == 0.0 {
        return None;
    }

    let wa = (p.x * (b.y - c.y) + p.y * (c.x - b.x) + b.x * c.y - c.x * b.y) / d;
    let wb = (p.x * c.y - p.y * c.x) / d;
    let wc = (p.y * b.x - p.x * b.y) / d;
    Some((wa, wb, wc))
}

fn unit(w: f64) -> bool {
    (0.0..=1.0).contains(&w)
}

/// True when `p` lies inside or on the edges of triangle `abc`.
#[must_use]
pub fn in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    barycentric(p, a, b, c).is_some_and(|(wa, wb, wc)| unit(wa) && unit(wb) && unit(wc))
}

/// Point-in-polygon by fan triangulation from the first vertex.
///
/// Counts the fan triangles containing `p`; an odd count means inside. The
/// diagonal shared by two consecutive triangles belongs to the earlier one, so
/// points on it are counted once. Polygons with fewer than three vertices
/// contain nothing.
#[must_use]
pub fn in_polygon(p: DVec2, vertices: &[DVec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let anchor = vertices[0];
    let mut previous = vertices[1];
    let mut count = 0u32;

    for (k, &current) in vertices.iter().enumerate().skip(2) {
        if let Some((wa, wb, wc)) = barycentric(p, anchor, previous, current) {
            let owns_diagonal = k == 2 || wc > 0.0;
            if unit(wa) && unit(wb) && unit(wc) && owns_diagonal {
                count += 1;
            }
        }
        previous = current;
    }

    count % 2 == 1
}
