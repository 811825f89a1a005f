//! Entities on the board.
//!
//! - [`EntityId`]: identifier of a ship or planet, as assigned by the engine
//! - [`PlayerId`]: identifier of a player
//! - [`Ship`]: a movable circle of radius [`Ship::RADIUS`] owned by one player
//! - [`Planet`]: a stationary circle with docking spots
//!
//! Ship and planet ids are allocated independently by the engine, so the same
//! number can name both a ship and a planet. [`EntityId::ship_key`] and
//! [`EntityId::planet_key`] map them into disjoint [`MarkerKey`] ranges.
//!
//! # Example
//!
//! ```
//! use gravwell_core::entity::EntityId;
//!
//! let id = EntityId::new(7);
//! assert_ne!(id.ship_key(), id.planet_key());
//! ```

mod planet;
mod ship;

use std::fmt;

use serde::{Deserialize, Serialize};
use sextant::MarkerKey;

use crate::error::{ProtocolError, Result};

pub use planet::Planet;
pub use ship::Ship;

const PLANET_KEY_BIT: u64 = 1 << 63;

/// Identifier of a ship or planet.
///
/// Ordered by numeric value; fleet output is sorted by ship id.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Scanner identity when this id names a ship.
    #[must_use]
    pub const fn ship_key(self) -> MarkerKey {
        MarkerKey::new(self.0 & !PLANET_KEY_BIT)
    }

    /// Scanner identity when this id names a planet.
    #[must_use]
    pub const fn planet_key(self) -> MarkerKey {
        MarkerKey::new(self.0 | PLANET_KEY_BIT)
    }

    /// Same parity as `other`.
    #[must_use]
    pub const fn same_parity(self, other: Self) -> bool {
        self.0 % 2 == other.0 % 2
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Identifier of a player. Players are numbered 0, 1, 2, ... in snapshot order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new `PlayerId`.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into per-player tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a ship is in the docking cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockingStatus {
    /// Free to move
    #[default]
    Undocked,
    /// Docking in progress
    Docking,
    /// Docked and producing
    Docked,
    /// Undocking in progress
    Undocking,
}

impl DockingStatus {
    /// Decode the wire value (0..=3).
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DockingStatus`] for any other value.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::Undocked),
            1 => Ok(Self::Docking),
            2 => Ok(Self::Docked),
            3 => Ok(Self::Undocking),
            other => Err(ProtocolError::DockingStatus(other)),
        }
    }

    /// Wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Undocked => 0,
            Self::Docking => 1,
            Self::Docked => 2,
            Self::Undocking => 3,
        }
    }
}

impl fmt::Display for DockingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undocked => write!(f, "Undocked"),
            Self::Docking => write!(f, "Docking"),
            Self::Docked => write!(f, "Docked"),
            Self::Undocking => write!(f, "Undocking"),
        }
    }
}
