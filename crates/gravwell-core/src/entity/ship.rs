use glam::DVec2;
use serde::{Deserialize, Serialize};
use sextant::{Marker, MarkerKey};

use super::{DockingStatus, EntityId, PlayerId};
use crate::error::Result;
use crate::tokens::Tokens;

/// A ship as reported in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Engine-assigned id
    pub id: EntityId,
    /// Owning player
    pub owner: PlayerId,
    /// Center
    pub position: DVec2,
    /// Hit points
    pub health: f64,
    /// Velocity reported by the engine
    pub velocity: DVec2,
    /// Docking cycle state
    pub docking_status: DockingStatus,
    /// Planet the ship is docking at, docked to or leaving
    pub docked_planet: Option<EntityId>,
    /// Docking progress reported by the engine
    pub docking_progress: f64,
    /// Weapon cooldown reported by the engine
    pub cooldown: f64,
}

impl Ship {
    /// Every ship is a circle of this radius.
    pub const RADIUS: f64 = 0.5;

    /// An undocked ship at rest with full defaults, mostly for tests and tools.
    #[must_use]
    pub fn at(id: EntityId, owner: PlayerId, position: DVec2) -> Self {
        Self {
            id,
            owner,
            position,
            health: 255.0,
            velocity: DVec2::ZERO,
            docking_status: DockingStatus::Undocked,
            docked_planet: None,
            docking_progress: 0.0,
            cooldown: 0.0,
        }
    }

    /// True when the ship can take movement or docking orders.
    #[must_use]
    pub fn is_undocked(&self) -> bool {
        self.docking_status == DockingStatus::Undocked
    }

    /// Read one ship record:
    /// `id x y health vel_x vel_y docking_status docked_planet docking_progress cooldown`.
    pub(crate) fn parse(owner: PlayerId, tokens: &mut Tokens<'_>) -> Result<Self> {
        let id = EntityId::new(tokens.next_int("ship id")?);
        let x = tokens.next_float("ship x")?;
        let y = tokens.next_float("ship y")?;
        let health = tokens.next_float("ship health")?;
        let vel_x = tokens.next_float("ship velocity x")?;
        let vel_y = tokens.next_float("ship velocity y")?;
        let docking_status = DockingStatus::from_code(tokens.next_int("docking status")?)?;
        let planet: u64 = tokens.next_int("docked planet")?;
        let docking_progress = tokens.next_float("docking progress")?;
        let cooldown = tokens.next_float("weapon cooldown")?;

        Ok(Self {
            id,
            owner,
            position: DVec2::new(x, y),
            health,
            velocity: DVec2::new(vel_x, vel_y),
            docking_status,
            docked_planet: (docking_status != DockingStatus::Undocked)
                .then_some(EntityId::new(planet)),
            docking_progress,
            cooldown,
        })
    }
}

impl Marker for Ship {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        Self::RADIUS
    }

    fn key(&self) -> Option<MarkerKey> {
        Some(self.id.ship_key())
    }
}
