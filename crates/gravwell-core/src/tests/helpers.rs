//! Test helpers for building boards and turn contexts.
//!
//! This module provides factory functions that make writing strategy, fleet
//! and session tests more ergonomic and consistent.

use std::fmt::Write as _;

use glam::DVec2;
use sextant::{NavConfig, Navigator};

use crate::board::Board;
use crate::entity::{DockingStatus, EntityId, Planet, PlayerId, Ship};
use crate::strategy::TurnContext;

// =============================================================================
// Board Builder
// =============================================================================

/// Fluent builder for hand-placed boards.
///
/// Player ids are `u32` and entity ids `u64` so call sites stay short.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    width: u32,
    height: u32,
    fleets: Vec<Vec<Ship>>,
    planets: Vec<Planet>,
}

impl BoardBuilder {
    /// Empty 240×160 board with one (shipless) player.
    pub fn new() -> Self {
        Self {
            width: 240,
            height: 160,
            fleets: vec![Vec::new()],
            planets: Vec::new(),
        }
    }

    /// Make sure at least `count` players exist.
    pub fn players(mut self, count: usize) -> Self {
        if self.fleets.len() < count {
            self.fleets.resize_with(count, Vec::new);
        }
        self
    }

    /// Add an unowned planet.
    pub fn planet(mut self, id: u64, position: DVec2, radius: f64, spots: u32) -> Self {
        self.planets
            .push(Planet::at(EntityId::new(id), position, radius, spots));
        self
    }

    /// Add an owned planet with the given docked ships.
    pub fn planet_owned(
        mut self,
        id: u64,
        position: DVec2,
        radius: f64,
        spots: u32,
        owner: u32,
        docked: &[u64],
    ) -> Self {
        let planet = Planet::at(EntityId::new(id), position, radius, spots)
            .owned_by(PlayerId::new(owner))
            .with_docked(docked.iter().copied().map(EntityId::new));
        self.planets.push(planet);
        self.players(owner as usize + 1)
    }

    /// Add an undocked ship.
    pub fn ship(self, player: u32, id: u64, position: DVec2) -> Self {
        let ship = Ship::at(EntityId::new(id), PlayerId::new(player), position);
        self.push_ship(ship)
    }

    /// Add a ship docked at `planet`.
    pub fn docked_ship(self, player: u32, id: u64, position: DVec2, planet: u64) -> Self {
        let mut ship = Ship::at(EntityId::new(id), PlayerId::new(player), position);
        ship.docking_status = DockingStatus::Docked;
        ship.docked_planet = Some(EntityId::new(planet));
        self.push_ship(ship)
    }

    /// Finish the board.
    pub fn build(self) -> Board {
        Board::new(self.width, self.height, self.fleets, self.planets)
    }

    fn push_ship(self, ship: Ship) -> Self {
        let index = ship.owner.index();
        let mut builder = self.players(index + 1);
        builder.fleets[index].push(ship);
        builder
    }
}

// =============================================================================
// Turn Context
// =============================================================================

/// Turn-1 context for `player` over `board`.
pub fn context<'a>(board: &'a Board, nav: &'a NavConfig, player: u32) -> TurnContext<'a> {
    TurnContext {
        board,
        player: PlayerId::new(player),
        turn: 1,
        navigator: Navigator::new(board.obstacles(), nav),
    }
}

// =============================================================================
// Snapshot Rendering
// =============================================================================

/// Render a board back into the engine's snapshot line.
pub fn render_snapshot(board: &Board) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", board.player_count());

    for player in 0..board.player_count() {
        let player = PlayerId::new(u32::try_from(player).unwrap());
        let ships = board.ships(player);
        let _ = write!(out, " {player} {}", ships.len());
        for ship in ships {
            let _ = write!(
                out,
                " {} {} {} {} {} {} {} {} {} {}",
                ship.id,
                ship.position.x,
                ship.position.y,
                ship.health,
                ship.velocity.x,
                ship.velocity.y,
                ship.docking_status.code(),
                ship.docked_planet.map_or(0, EntityId::as_u64),
                ship.docking_progress,
                ship.cooldown,
            );
        }
    }

    let _ = write!(out, " {}", board.planets().len());
    for planet in board.planets() {
        let _ = write!(
            out,
            " {} {} {} {} {} {} {} {} {} {} {}",
            planet.id,
            planet.position.x,
            planet.position.y,
            planet.health,
            planet.radius,
            planet.docking_spots,
            planet.production,
            planet.remaining_production,
            u8::from(planet.owner.is_some()),
            planet.owner.map_or(0, PlayerId::as_u32),
            planet.docked_ships.len(),
        );
        for docked in &planet.docked_ships {
            let _ = write!(out, " {docked}");
        }
    }

    out
}

/// Full engine input: handshake header, initial snapshot, then one line per turn.
pub fn engine_input(player: u32, initial: &Board, turns: &[Board]) -> String {
    let (width, height) = initial.dimensions();
    let mut out = format!("{player}\n{width} {height}\n{}\n", render_snapshot(initial));
    for board in turns {
        out.push_str(&render_snapshot(board));
        out.push('\n');
    }
    out
}

/// A crowded two-player board: a ring of planets around the origin and ships
/// for both players spread between them.
pub fn crowded_board() -> Board {
    let mut builder = BoardBuilder::new().players(2);
    for i in 0..8u32 {
        let angle = f64::from(i) * std::f64::consts::FRAC_PI_4;
        let position = DVec2::new(120.0, 80.0) + DVec2::new(angle.cos(), angle.sin()) * 50.0;
        builder = builder.planet(u64::from(i), position, 4.0 + f64::from(i % 3), 3);
    }
    for i in 0..12u32 {
        let x = 40.0 + f64::from(i % 4) * 8.0;
        let y = 60.0 + f64::from(i / 4) * 8.0;
        builder = builder.ship(0, u64::from(i), DVec2::new(x, y));
    }
    for i in 0..6u32 {
        let x = 200.0 - f64::from(i % 3) * 8.0;
        let y = 90.0 + f64::from(i / 3) * 8.0;
        builder = builder.ship(1, 100 + u64::from(i), DVec2::new(x, y));
    }
    builder.build()
}
