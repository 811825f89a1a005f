use glam::DVec2;
use serde::{Deserialize, Serialize};
use sextant::{Marker, MarkerKey};

use super::{EntityId, PlayerId};
use crate::error::{ProtocolError, Result};
use crate::tokens::Tokens;

/// A planet as reported in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Engine-assigned id
    pub id: EntityId,
    /// Center
    pub position: DVec2,
    /// Hit points
    pub health: f64,
    /// Radius
    pub radius: f64,
    /// Total docking spots
    pub docking_spots: u32,
    /// Production per turn
    pub production: f64,
    /// Production left
    pub remaining_production: f64,
    /// Owner, `None` when unowned
    pub owner: Option<PlayerId>,
    /// Ships currently docked
    pub docked_ships: Vec<EntityId>,
}

impl Planet {
    /// An unowned planet with no docked ships, mostly for tests and tools.
    #[must_use]
    pub fn at(id: EntityId, position: DVec2, radius: f64, docking_spots: u32) -> Self {
        Self {
            id,
            position,
            health: 1000.0,
            radius,
            docking_spots,
            production: 0.0,
            remaining_production: 0.0,
            owner: None,
            docked_ships: Vec::new(),
        }
    }

    /// Set the owner.
    #[must_use]
    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the docked ships.
    #[must_use]
    pub fn with_docked(mut self, ships: impl IntoIterator<Item = EntityId>) -> Self {
        self.docked_ships = ships.into_iter().collect();
        self
    }

    /// True when some player owns the planet.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Unowned, or owned by `player`.
    #[must_use]
    pub fn welcomes(&self, player: PlayerId) -> bool {
        self.owner.map_or(true, |owner| owner == player)
    }

    /// Docking spots not taken.
    #[must_use]
    pub fn free_spots(&self) -> usize {
        (self.docking_spots as usize).saturating_sub(self.docked_ships.len())
    }

    /// At least one docking spot free.
    #[must_use]
    pub fn has_free_spot(&self) -> bool {
        self.free_spots() > 0
    }

    /// Read one planet record:
    /// `id x y health radius docking_spots production remaining_production owned owner docked_count <ids…>`.
    pub(crate) fn parse(tokens: &mut Tokens<'_>) -> Result<Self> {
        let id = EntityId::new(tokens.next_int("planet id")?);
        let x = tokens.next_float("planet x")?;
        let y = tokens.next_float("planet y")?;
        let health = tokens.next_float("planet health")?;
        let radius = tokens.next_float("planet radius")?;
        let docking_spots = tokens.next_int("docking spots")?;
        let production = tokens.next_float("production")?;
        let remaining_production = tokens.next_float("remaining production")?;
        let owned: u8 = tokens.next_int("owned flag")?;
        // Unowned planets may carry any owner value, including negative ones.
        let owner_position = tokens.position();
        let owner: i64 = tokens.next_int("planet owner")?;
        let docked_count: usize = tokens.next_int("docked ship count")?;

        let owner = if owned == 0 {
            None
        } else {
            let id = u32::try_from(owner).map_err(|_| ProtocolError::BadInteger {
                token: owner.to_string(),
                expected: "planet owner",
                position: owner_position,
            })?;
            Some(PlayerId::new(id))
        };

        let docked_ships = (0..docked_count)
            .map(|_| tokens.next_int("docked ship id").map(EntityId::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id,
            position: DVec2::new(x, y),
            health,
            radius,
            docking_spots,
            production,
            remaining_production,
            owner,
            docked_ships,
        })
    }
}

impl Marker for Planet {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn key(&self) -> Option<MarkerKey> {
        Some(self.id.planet_key())
    }
}
