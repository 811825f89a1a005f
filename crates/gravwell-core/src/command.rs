//! Commands sent back to the engine.
//!
//! Wire format, one command per ship, joined by single spaces:
//!
//! | Command | Text |
//! |---------|------|
//! | Thrust  | `t <ship> <speed> <angle>` |
//! | Dock    | `d <ship> <planet>` |
//! | Undock  | `u <ship>` |
//! | No-op   | nothing |

use std::fmt;

use serde::{Deserialize, Serialize};
use sextant::{bearing, bounded_degrees, degrees, distance, Marker, NavigationDecision};

use crate::entity::{EntityId, Ship};

/// Top thrust speed.
pub const MAX_SPEED: u8 = 7;

/// Thrust speed when closer than [`SLOW_DISTANCE`].
pub const SLOW_SPEED: u8 = 3;

/// Distance under which ships slow down.
pub const SLOW_DISTANCE: f64 = 10.0;

/// Margin kept between ship and target surfaces when thrusting.
const STOP_MARGIN: f64 = 0.1;

/// One ship's order for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move at `speed` toward `angle` degrees.
    Thrust {
        /// Ship id
        ship: EntityId,
        /// Speed in `0..=7`
        speed: u8,
        /// Whole degrees in `[0, 360)`
        angle: u16,
    },
    /// Dock at a planet.
    Dock {
        /// Ship id
        ship: EntityId,
        /// Planet id
        planet: EntityId,
    },
    /// Leave the planet.
    Undock {
        /// Ship id
        ship: EntityId,
    },
    /// Do nothing.
    NoOp,
}

impl Command {
    /// Thrust from `ship` toward `target`, stopping short of its surface.
    ///
    /// Speed is 7, or 3 within 10 units, capped so the ship stops 0.1 short of
    /// the target's edge. The result is clamped to `0..=7` and truncated.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn thrust_toward(ship: &Ship, target: &impl Marker) -> Self {
        let dist = distance(ship, target);
        let cruise = if dist < SLOW_DISTANCE {
            SLOW_SPEED
        } else {
            MAX_SPEED
        };
        let stopping = dist - ship.radius() - target.radius() - STOP_MARGIN;
        let speed = f64::from(cruise)
            .min(stopping)
            .clamp(0.0, f64::from(MAX_SPEED));

        Self::Thrust {
            ship: ship.id,
            speed: speed as u8,
            angle: bounded_degrees(degrees(bearing(ship, target))),
        }
    }

    /// Turn a navigation decision into a thrust (or a no-op).
    #[must_use]
    pub fn follow(ship: &Ship, decision: &NavigationDecision) -> Self {
        decision
            .target()
            .map_or(Self::NoOp, |target| Self::thrust_toward(ship, target))
    }

    /// True for [`Command::NoOp`].
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrust { ship, speed, angle } => write!(f, "t {ship} {speed} {angle}"),
            Self::Dock { ship, planet } => write!(f, "d {ship} {planet}"),
            Self::Undock { ship } => write!(f, "u {ship}"),
            Self::NoOp => Ok(()),
        }
    }
}

/// All commands for one turn, rendered as a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandBatch {
    commands: Vec<Command>,
}

impl CommandBatch {
    /// Empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Commands in order, no-ops included.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of commands, no-ops included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when the batch has no commands at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands that actually produce text.
    #[must_use]
    pub fn active(&self) -> usize {
        self.commands.iter().filter(|c| !c.is_noop()).count()
    }
}

impl FromIterator<Command> for CommandBatch {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for CommandBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for command in self.commands.iter().filter(|c| !c.is_noop()) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
            first = false;
        }
        Ok(())
    }
}
