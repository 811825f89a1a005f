//! One turn's snapshot of the game.
//!
//! A [`Board`] is parsed from a single snapshot line and is read-only from then
//! on. Parsing also builds the turn's [`ObstacleIndex`] (every planet and every
//! ship), which all navigation calls that turn share by reference.
//!
//! # Snapshot layout
//!
//! ```text
//! <players>
//!   per player: <player_id> <ship_count> <ship>*
//!     ship:   id x y health vel_x vel_y docking_status docked_planet docking_progress cooldown
//! <planet_count> <planet>*
//!     planet: id x y health radius docking_spots production remaining_production
//!             owned owner docked_count <docked ship id>*
//! ```
//!
//! # Example
//!
//! ```
//! use gravwell_core::board::Board;
//! use gravwell_core::entity::PlayerId;
//!
//! let line = "1 0 1 3 10 10 255 0 0 0 0 0 0 1 0 40 10 1000 5 2 1 100 0 0 0";
//! let board = Board::parse(240, 160, line).unwrap();
//!
//! assert_eq!(board.player_count(), 1);
//! assert_eq!(board.ships(PlayerId::new(0)).len(), 1);
//! assert_eq!(board.planets().len(), 1);
//! assert_eq!(board.obstacles().len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use sextant::{edge_distance, Marker, ObstacleIndex};
use tracing::warn;

use crate::entity::{EntityId, Planet, PlayerId, Ship};
use crate::error::{ProtocolError, Result};
use crate::tokens::Tokens;

/// Game state for one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    /// Ships per player, indexed by player id.
    fleets: Vec<Vec<Ship>>,
    planets: Vec<Planet>,
    obstacles: ObstacleIndex,
}

impl Board {
    /// Build a board from already-parsed entities.
    ///
    /// `fleets[i]` holds the ships of player `i`.
    #[must_use]
    pub fn new(width: u32, height: u32, fleets: Vec<Vec<Ship>>, planets: Vec<Planet>) -> Self {
        let mut obstacles = ObstacleIndex::new();
        obstacles.extend(planets.iter());
        obstacles.extend(fleets.iter().flatten());

        Self {
            width,
            height,
            fleets,
            planets,
            obstacles,
        }
    }

    /// Parse a snapshot line.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] when a token is missing or malformed, when
    /// player blocks are out of order, or when a docking status is unknown.
    pub fn parse(width: u32, height: u32, line: &str) -> Result<Self> {
        let mut tokens = Tokens::new(line);

        let players: usize = tokens.next_int("player count")?;
        let mut fleets = Vec::with_capacity(players);
        for expected in 0..players {
            let found: i64 = tokens.next_int("player id")?;
            if usize::try_from(found).ok() != Some(expected) {
                return Err(ProtocolError::PlayerOrder { expected, found });
            }
            let owner = PlayerId::new(u32::try_from(expected).map_err(|_| {
                ProtocolError::PlayerOrder { expected, found }
            })?);

            let count: usize = tokens.next_int("ship count")?;
            let ships = (0..count)
                .map(|_| Ship::parse(owner, &mut tokens))
                .collect::<Result<Vec<_>>>()?;
            fleets.push(ships);
        }

        let planet_count: usize = tokens.next_int("planet count")?;
        let planets = (0..planet_count)
            .map(|_| Planet::parse(&mut tokens))
            .collect::<Result<Vec<_>>>()?;

        let trailing = tokens.remaining();
        if trailing > 0 {
            warn!(trailing, "ignoring trailing snapshot tokens");
        }

        Ok(Self::new(width, height, fleets, planets))
    }

    /// Map width and height.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of players in the snapshot.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.fleets.len()
    }

    /// Ships of one player; empty for an unknown player.
    #[must_use]
    pub fn ships(&self, player: PlayerId) -> &[Ship] {
        self.fleets.get(player.index()).map_or(&[], Vec::as_slice)
    }

    /// Every ship on the board, player by player.
    pub fn all_ships(&self) -> impl Iterator<Item = &Ship> {
        self.fleets.iter().flatten()
    }

    /// Look up a ship by id.
    #[must_use]
    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.all_ships().find(|ship| ship.id == id)
    }

    /// All planets in snapshot order.
    #[must_use]
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Look up a planet by id.
    #[must_use]
    pub fn planet(&self, id: EntityId) -> Option<&Planet> {
        self.planets.iter().find(|planet| planet.id == id)
    }

    /// Every planet and every ship, as navigation obstacles.
    #[must_use]
    pub fn obstacles(&self) -> &ObstacleIndex {
        &self.obstacles
    }

    /// Planets ordered nearest-first by edge distance from `from`.
    ///
    /// The sort is stable, so equally distant planets keep snapshot order.
    #[must_use]
    pub fn planets_by_proximity(&self, from: &impl Marker) -> Vec<&Planet> {
        let mut planets: Vec<(f64, &Planet)> = self
            .planets
            .iter()
            .map(|planet| (edge_distance(from, planet), planet))
            .collect();
        planets.sort_by(|a, b| a.0.total_cmp(&b.0));
        planets.into_iter().map(|(_, planet)| planet).collect()
    }

    /// True when the board has at least one planet and every planet is owned.
    #[must_use]
    pub fn all_planets_owned(&self) -> bool {
        !self.planets.is_empty() && self.planets.iter().all(Planet::is_owned)
    }
}
