use rand::RngCore;
use sextant::approach_location;
use tracing::debug;

use super::{grid_toward, Strategy, TurnContext};
use crate::command::Command;
use crate::docking::check_docking;
use crate::entity::Ship;

/// Spreads the fleet over welcoming planets.
///
/// Each undocked ship takes the nearest planet that is unowned or ours, has a
/// free spot, and shares the ship's id parity (so neighbouring ships split
/// up). It docks when in reach, otherwise flies to the planet's approach point
/// using the grid search.
#[derive(Debug, Clone)]
pub struct Settler {
    buffer: f64,
}

impl Settler {
    /// Settler that stops `buffer` outside the planet's surface.
    #[must_use]
    pub fn new(buffer: f64) -> Self {
        Self { buffer }
    }
}

impl Strategy for Settler {
    fn name(&self) -> &'static str {
        "settler"
    }

    fn command(&self, ctx: &TurnContext<'_>, ship: &Ship, _rng: &mut dyn RngCore) -> Command {
        if !ship.is_undocked() {
            return Command::NoOp;
        }

        let target = ctx.board.planets_by_proximity(ship).into_iter().find(|planet| {
            planet.welcomes(ctx.player)
                && planet.has_free_spot()
                && planet.id.same_parity(ship.id)
        });

        let Some(planet) = target else {
            debug!(ship = %ship.id, "no planet to settle");
            return Command::NoOp;
        };

        match check_docking(ship, planet) {
            Ok(dock) => dock,
            Err(refused) => {
                debug!(ship = %ship.id, planet = %planet.id, %refused, "approaching");
                let approach = approach_location(self.buffer, planet, ship);
                grid_toward(ctx, ship, &approach)
            }
        }
    }
}
