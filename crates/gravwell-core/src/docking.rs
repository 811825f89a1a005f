//! Docking rights.
//!
//! A ship may dock at a planet when all three hold:
//! - **proximity**: its center is within `ship.r + planet.r + 4` of the planet's
//! - **permission**: the planet is unowned or owned by the ship's owner
//! - **port**: the planet has a free docking spot
//!
//! Failures are advisory. Strategies read the fault set to decide whether to
//! approach the planet, try the next one, or attack.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use sextant::{distance, Marker};
use thiserror::Error;

use crate::command::Command;
use crate::entity::{EntityId, Planet, Ship};

/// Extra reach beyond touching surfaces within which docking is allowed.
pub const DOCK_RADIUS: f64 = 4.0;

bitflags! {
    /// Reasons a docking attempt is refused. Several can hold at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DockingFaults: u8 {
        /// Too far from the planet
        const NO_PROXIMITY = 1 << 0;
        /// Planet owned by another player
        const NO_PERMISSION = 1 << 1;
        /// No free docking spot
        const NO_PORT = 1 << 2;
    }
}

impl fmt::Display for DockingFaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<&str> = [
            (Self::NO_PROXIMITY, "no proximity"),
            (Self::NO_PERMISSION, "no permission"),
            (Self::NO_PORT, "no available port"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, reason)| reason)
        .collect();

        if reasons.is_empty() {
            f.write_str("unknown")
        } else {
            f.write_str(&reasons.join(", "))
        }
    }
}

/// A refused docking attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot dock: {faults}")]
pub struct DockingError {
    /// Ship that tried to dock
    pub ship: EntityId,
    /// Planet it tried to dock at
    pub planet: EntityId,
    /// Why it was refused
    pub faults: DockingFaults,
}

impl DockingError {
    /// Out of reach of the planet.
    #[must_use]
    pub fn no_proximity(&self) -> bool {
        self.faults.contains(DockingFaults::NO_PROXIMITY)
    }

    /// Planet belongs to someone else.
    #[must_use]
    pub fn no_permission(&self) -> bool {
        self.faults.contains(DockingFaults::NO_PERMISSION)
    }

    /// Planet is full.
    #[must_use]
    pub fn no_port(&self) -> bool {
        self.faults.contains(DockingFaults::NO_PORT)
    }
}

/// Every rule `ship` currently breaks for `planet`; empty when docking is allowed.
#[must_use]
pub fn docking_faults(ship: &Ship, planet: &Planet) -> DockingFaults {
    let mut faults = DockingFaults::empty();
    if distance(ship, planet) > ship.radius() + planet.radius() + DOCK_RADIUS {
        faults |= DockingFaults::NO_PROXIMITY;
    }
    if !planet.welcomes(ship.owner) {
        faults |= DockingFaults::NO_PERMISSION;
    }
    if !planet.has_free_spot() {
        faults |= DockingFaults::NO_PORT;
    }
    faults
}

/// A dock command, or the reasons one would be refused.
///
/// # Errors
///
/// Returns a [`DockingError`] carrying every fault that applies.
pub fn check_docking(ship: &Ship, planet: &Planet) -> Result<Command, DockingError> {
    let faults = docking_faults(ship, planet);
    if faults.is_empty() {
        Ok(Command::Dock {
            ship: ship.id,
            planet: planet.id,
        })
    } else {
        Err(DockingError {
            ship: ship.id,
            planet: planet.id,
            faults,
        })
    }
}
