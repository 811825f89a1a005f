//! Navigation planning.
//!
//! A [`Navigator`] borrows the turn's [`ObstacleIndex`] and answers, per mover,
//! where to head. Two heuristics are offered:
//!
//! - [`Navigator::plan_grid`]: when the direct path is blocked, sample a 6×6
//!   grid over the box between mover and destination and keep the clear
//!   waypoint with the shortest two-leg route.
//! - [`Navigator::plan_deflection`]: when the path is blocked, push the target
//!   sideways by a random amount and retry from the new point, up to a fixed
//!   number of attempts.
//!
//! Neither guarantees a collision-free or shortest route. Both finish within a
//! fixed number of corridor scans, reported in [`Plan::scans`].

use std::ops::RangeInclusive;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::corridor::Corridor;
use crate::geometry::{distance, perpendicular_location, Location, Marker, MarkerKey, Side};
use crate::scanner::ObstacleIndex;
use crate::Bounds;

/// Tuning for the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Extra clearance added to the mover's radius at the front of each corridor
    pub corridor_buffer: f64,
    /// Equal steps per axis for the grid search (steps + 1 samples per axis)
    pub grid_steps: u32,
    /// Sideways push applied per deflection, drawn uniformly
    pub deflection_range: RangeInclusive<u32>,
    /// Maximum deflection attempts before giving up
    pub max_deflections: u32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            corridor_buffer: 1.0,
            grid_steps: 5,
            deflection_range: 17..=40,
            max_deflections: 256,
        }
    }
}

/// Where a mover should head this turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NavigationDecision {
    /// The path to the destination is clear (or no alternative was found).
    DirectCourse(Location),
    /// Head for an intermediate point instead.
    Waypoint(Location),
    /// Stay put.
    NoOp,
}

impl NavigationDecision {
    /// The point to steer toward, if any.
    #[must_use]
    pub fn target(&self) -> Option<&Location> {
        match self {
            Self::DirectCourse(target) | Self::Waypoint(target) => Some(target),
            Self::NoOp => None,
        }
    }
}

/// A decision plus the number of corridor scans it took.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// The decision
    pub decision: NavigationDecision,
    /// Corridor scans performed
    pub scans: u32,
}

/// Planner bound to one turn's obstacles.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    index: &'a ObstacleIndex,
    config: &'a NavConfig,
}

impl<'a> Navigator<'a> {
    /// Create a navigator over `index`.
    #[must_use]
    pub fn new(index: &'a ObstacleIndex, config: &'a NavConfig) -> Self {
        Self { index, config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &NavConfig {
        self.config
    }

    /// True when nothing but `from` and `to` themselves intrudes into the corridor between them.
    #[must_use]
    pub fn is_clear(&self, from: &impl Marker, to: &impl Marker) -> bool {
        let corridor = Corridor::between(from, to, self.config.corridor_buffer);
        let exclude: Vec<MarkerKey> = from.key().into_iter().chain(to.key()).collect();
        !self.index.is_blocked(&corridor, &exclude)
    }

    /// Direct course when clear, otherwise the best clear grid waypoint.
    ///
    /// The grid covers the box between mover and destination. When that box is
    /// narrower than the corridor on either axis it is padded into a square.
    /// Grid points are scanned x-major, ascending, and only a strictly shorter
    /// route replaces the current best, so ties go to the first point found.
    /// When no grid point is clear the destination is returned unchanged.
    #[must_use]
    pub fn plan_grid(&self, mover: &impl Marker, destination: &impl Marker) -> Plan {
        let target = Location::of(destination);
        let mut scans = 1;
        if self.is_clear(mover, destination) {
            return Plan {
                decision: NavigationDecision::DirectCourse(target),
                scans,
            };
        }

        let between = Bounds::from_min_max(
            mover.position().min(destination.position()),
            mover.position().max(destination.position()),
        );
        // A box thinner than the corridor has no lateral room to sample.
        let width = 2.0 * (mover.radius() + self.config.corridor_buffer);
        let area = if between.size().min_element() < width {
            between.squared()
        } else {
            between
        };
        let steps = self.config.grid_steps.max(1);
        let step = area.size() / f64::from(steps);

        let mut best: Option<(f64, Location)> = None;
        for i in 0..=steps {
            for j in 0..=steps {
                let point = Location::point(
                    area.min + DVec2::new(step.x * f64::from(i), step.y * f64::from(j)),
                );

                scans += 1;
                if !self.is_clear(mover, &point) {
                    continue;
                }
                scans += 1;
                if !self.is_clear(&point, destination) {
                    continue;
                }

                let route = distance(mover, &point) + distance(&point, destination);
                if best.map_or(true, |(shortest, _)| route < shortest) {
                    best = Some((route, point));
                }
            }
        }

        let decision = match best {
            Some((route, point)) => {
                debug!(?point.position, route, scans, "grid waypoint");
                NavigationDecision::Waypoint(point)
            }
            None => {
                warn!(scans, "no clear grid waypoint, keeping destination");
                NavigationDecision::DirectCourse(target)
            }
        };
        Plan { decision, scans }
    }

    /// Deflect the target sideways until the path clears or attempts run out.
    ///
    /// Each attempt scans the corridor from `mover` to the current target. On a
    /// block, a push from `deflection_range` and a side are drawn from `rng`,
    /// and the target moves perpendicular to the mover's line of sight. The
    /// next attempt aims at that new point, so deflections compound.
    pub fn plan_deflection<R: Rng + ?Sized>(
        &self,
        mover: &impl Marker,
        destination: &impl Marker,
        rng: &mut R,
    ) -> Plan {
        let mut target = Location::of(destination);
        let (low, high) = (
            *self.config.deflection_range.start(),
            *self.config.deflection_range.end(),
        );

        for attempt in 0..self.config.max_deflections {
            if self.is_clear(mover, &target) {
                let decision = if attempt == 0 {
                    NavigationDecision::DirectCourse(target)
                } else {
                    debug!(?target.position, attempt, "deflected waypoint");
                    NavigationDecision::Waypoint(target)
                };
                return Plan {
                    decision,
                    scans: attempt + 1,
                };
            }

            let push = f64::from(rng.gen_range(low.min(high)..=high.max(low)));
            let side = if rng.gen::<bool>() {
                Side::Right
            } else {
                Side::Left
            };
            target = perpendicular_location(push, side, &target, mover);
        }

        warn!(attempts = self.config.max_deflections, "deflection exhausted");
        Plan {
            decision: NavigationDecision::NoOp,
            scans: self.config.max_deflections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn blocked_scenario() -> (Location, Location, ObstacleIndex) {
        let mover = Location::new(0.0, 0.0, 1.0);
        let dest = Location::new(100.0, 0.0, 1.0);
        let index = ObstacleIndex::from_markers([Location::new(50.0, 0.0, 10.0)]);
        (mover, dest, index)
    }

    #[test]
    fn test_clear_path_is_direct() {
        let index = ObstacleIndex::from_markers([Location::new(50.0, 40.0, 5.0)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let mover = Location::new(0.0, 0.0, 1.0);
        let dest = Location::new(100.0, 0.0, 1.0);
        let plan = nav.plan_grid(&mover, &dest);
        assert_eq!(plan.decision, NavigationDecision::DirectCourse(dest));
        assert_eq!(plan.scans, 1);
    }

    #[test]
    fn test_grid_routes_around_obstacle() {
        let (mover, dest, index) = blocked_scenario();
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let plan = nav.plan_grid(&mover, &dest);
        let NavigationDecision::Waypoint(point) = plan.decision else {
            panic!("expected waypoint, got {:?}", plan.decision);
        };
        assert!(point.position.y.abs() > 11.0, "waypoint {point:?} hugs the obstacle");
        assert!(nav.is_clear(&mover, &point));
        assert!(nav.is_clear(&point, &dest));
        assert!(plan.scans <= 1 + 2 * 36);
    }

    #[test]
    fn test_grid_tie_goes_to_first_in_scan_order() {
        let (mover, dest, index) = blocked_scenario();
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let first = nav.plan_grid(&mover, &dest);
        let second = nav.plan_grid(&mover, &dest);
        assert_eq!(first, second);

        // (40, -30) and (40, 30) are mirror images; the negative row is scanned first.
        let point = first.decision.target().unwrap().position;
        assert_eq!(point, DVec2::new(40.0, -30.0));
    }

    #[test]
    fn test_grid_keeps_wide_box_unpadded() {
        // The box is 100 x 10, wider than the corridor on both axes.
        let mover = Location::new(0.0, 0.0, 0.5);
        let dest = Location::new(100.0, 10.0, 0.5);
        let index = ObstacleIndex::from_markers([Location::new(50.0, 5.0, 3.0)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let plan = nav.plan_grid(&mover, &dest);
        let NavigationDecision::Waypoint(point) = plan.decision else {
            panic!("expected waypoint, got {:?}", plan.decision);
        };
        let between = Bounds::from_min_max(DVec2::ZERO, DVec2::new(100.0, 10.0));
        assert!(between.contains(point.position), "waypoint {point:?} outside the box");
    }

    #[test]
    fn test_grid_without_clear_point_keeps_destination() {
        let mover = Location::new(0.0, 0.0, 1.0);
        let dest = Location::new(100.0, 0.0, 1.0);
        // Wall far larger than the sampled box.
        let index = ObstacleIndex::from_markers([Location::new(50.0, 0.0, 200.0)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let plan = nav.plan_grid(&mover, &dest);
        assert_eq!(plan.decision, NavigationDecision::DirectCourse(dest));
        assert_eq!(plan.scans, 1 + 36);
    }

    #[test]
    fn test_coincident_mover_and_destination_is_direct() {
        let here = Location::new(10.0, 10.0, 0.5);
        let index = ObstacleIndex::from_markers([Location::new(10.0, 10.0, 30.0)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        assert!(nav.is_clear(&here, &here));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let plan = nav.plan_deflection(&here, &here, &mut rng);
        assert!(matches!(plan.decision, NavigationDecision::DirectCourse(_)));
    }

    #[test]
    fn test_deflection_direct_when_clear() {
        let index = ObstacleIndex::new();
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mover = Location::new(0.0, 0.0, 0.5);
        let dest = Location::new(30.0, 30.0, 0.0);
        let plan = nav.plan_deflection(&mover, &dest, &mut rng);
        assert_eq!(plan.decision, NavigationDecision::DirectCourse(dest));
        assert_eq!(plan.scans, 1);
    }

    #[test]
    fn test_deflection_finds_waypoint_around_obstacle() {
        let (mover, dest, index) = blocked_scenario();
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let plan = nav.plan_deflection(&mover, &dest, &mut rng);
        let NavigationDecision::Waypoint(point) = plan.decision else {
            panic!("expected waypoint, got {:?}", plan.decision);
        };
        assert!(nav.is_clear(&mover, &point));
        assert!(plan.scans > 1);
    }

    #[test]
    fn test_deflections_compound_from_latest_target() {
        // Always draws the low end of the push range and the left side.
        let mut rng = StepRng::new(0, 0);
        let mover = Location::new(0.0, 0.0, 0.5);
        let dest = Location::new(100.0, 0.0, 0.0);
        // Covers the destination and the first 17-unit push, not the second.
        let index = ObstacleIndex::from_markers([Location::new(100.0, -8.0, 12.0)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let first = perpendicular_location(17.0, Side::Left, &dest, &mover);
        let second = perpendicular_location(17.0, Side::Left, &first, &mover);
        assert!(!nav.is_clear(&mover, &dest));
        assert!(!nav.is_clear(&mover, &first));
        assert!(nav.is_clear(&mover, &second));

        let plan = nav.plan_deflection(&mover, &dest, &mut rng);
        assert_eq!(plan.decision, NavigationDecision::Waypoint(second));
        assert_eq!(plan.scans, 3);
        // Two stacked pushes land farther out than any single one could.
        assert!(distance(&second, &dest) > 17.0 + dest.radius);
    }

    #[test]
    fn test_deflection_is_reproducible_with_same_seed() {
        let (mover, dest, index) = blocked_scenario();
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        let a = nav.plan_deflection(&mover, &dest, &mut ChaCha8Rng::seed_from_u64(99));
        let b = nav.plan_deflection(&mover, &dest, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deflection_gives_up_when_enclosed() {
        let mover = Location::new(0.0, 0.0, 0.5);
        let dest = Location::new(20.0, 0.0, 0.0);
        // Every corridor from the mover starts inside this obstacle.
        let index = ObstacleIndex::from_markers([Location::new(1.0, 0.0, 1.0e6)]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let plan = nav.plan_deflection(&mover, &dest, &mut rng);
        assert_eq!(plan.decision, NavigationDecision::NoOp);
        assert_eq!(plan.scans, 256);
    }

    #[test]
    fn test_deflection_respects_configured_bound() {
        let mover = Location::new(0.0, 0.0, 0.5);
        let dest = Location::new(20.0, 0.0, 0.0);
        let index = ObstacleIndex::from_markers([Location::new(1.0, 0.0, 1.0e6)]);
        let config = NavConfig {
            max_deflections: 8,
            ..NavConfig::default()
        };
        let nav = Navigator::new(&index, &config);

        let plan = nav.plan_deflection(&mover, &dest, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(plan.decision, NavigationDecision::NoOp);
        assert_eq!(plan.scans, 8);
    }

    #[test]
    fn test_keyed_endpoints_do_not_block_themselves() {
        let mover = Location::new(0.0, 0.0, 0.5).with_key(MarkerKey::new(1));
        let dest = Location::new(40.0, 0.0, 5.0).with_key(MarkerKey::new(2));
        let index = ObstacleIndex::from_markers([mover, dest]);
        let config = NavConfig::default();
        let nav = Navigator::new(&index, &config);

        assert!(nav.is_clear(&mover, &dest));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = NavConfig {
            corridor_buffer: 0.5,
            grid_steps: 4,
            deflection_range: 20..=30,
            max_deflections: 64,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: NavConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid_steps, 4);
        assert_eq!(back.deflection_range, 20..=30);
        assert_eq!(back.max_deflections, 64);
    }

    #[test]
    fn test_config_fills_missing_fields_with_defaults() {
        let config: NavConfig = serde_json::from_str(r#"{"grid_steps": 3}"#).unwrap();
        assert_eq!(config.grid_steps, 3);
        assert_eq!(config.max_deflections, 256);
        assert_eq!(config.deflection_range, 17..=40);
    }

    proptest! {
        /// Property: deflection always returns within the attempt bound
        #[test]
        fn prop_deflection_terminates(
            seed in any::<u64>(),
            ox in -60.0f64..60.0,
            oy in -60.0f64..60.0,
            radius in 1.0f64..40.0,
            dx in -100.0f64..100.0,
            dy in -100.0f64..100.0,
        ) {
            let mover = Location::new(0.0, 0.0, 0.5);
            let dest = Location::new(dx, dy, 0.0);
            let ring: Vec<Location> = (0..8)
                .map(|k| {
                    let angle = f64::from(k) * std::f64::consts::FRAC_PI_4;
                    Location::new(dx + angle.cos() * 6.0, dy + angle.sin() * 6.0, 3.0)
                })
                .chain(std::iter::once(Location::new(ox, oy, radius)))
                .collect();
            let index = ObstacleIndex::from_markers(ring);
            let config = NavConfig::default();
            let nav = Navigator::new(&index, &config);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let plan = nav.plan_deflection(&mover, &dest, &mut rng);
            prop_assert!(plan.scans >= 1 && plan.scans <= 256);
            if plan.decision == NavigationDecision::NoOp {
                prop_assert_eq!(plan.scans, 256);
            }
        }

        /// Property: grid search stays within 1 + 2 * 36 scans and any waypoint is clear
        #[test]
        fn prop_grid_bounded_and_clear(
            ox in 10.0f64..90.0,
            oy in -20.0f64..20.0,
            radius in 1.0f64..15.0,
            dy in -50.0f64..50.0,
        ) {
            let mover = Location::new(0.0, 0.0, 0.5);
            let dest = Location::new(100.0, dy, 0.5);
            let index = ObstacleIndex::from_markers([Location::new(ox, oy, radius)]);
            let config = NavConfig::default();
            let nav = Navigator::new(&index, &config);

            let plan = nav.plan_grid(&mover, &dest);
            prop_assert!(plan.scans <= 73);
            if let NavigationDecision::Waypoint(point) = plan.decision {
                prop_assert!(nav.is_clear(&mover, &point));
                prop_assert!(nav.is_clear(&point, &dest));
            }
        }

        /// Property: an obstacle entirely outside the expanded corridor box never blocks
        #[test]
        fn prop_outside_box_never_blocks(
            dx in 10.0f64..200.0,
            dy in -200.0f64..200.0,
            radius in 0.5f64..20.0,
            offset in 1.0f64..100.0,
        ) {
            let mover = Location::new(0.0, 0.0, 1.0);
            let dest = Location::new(dx, dy, 1.0);
            let config = NavConfig::default();
            let corridor = Corridor::between(&mover, &dest, config.corridor_buffer);
            let bounds = corridor.bounds();
            let outside = Location::new(bounds.max.x + radius + offset, bounds.center().y, radius);
            let index = ObstacleIndex::from_markers([outside]);
            let nav = Navigator::new(&index, &config);
            prop_assert!(nav.is_clear(&mover, &dest));
        }

        /// Property: identical endpoints are never blocked
        #[test]
        fn prop_coincident_never_blocked(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            r in 0.0f64..5.0,
            radius in 0.5f64..100.0,
        ) {
            let here = Location::new(x, y, r);
            let index = ObstacleIndex::from_markers([Location::new(x + 1.0, y, radius)]);
            let config = NavConfig::default();
            let nav = Navigator::new(&index, &config);
            prop_assert!(nav.is_clear(&here, &here));
        }
    }
}
