use rand::RngCore;
use sextant::approach_location;
use tracing::debug;

use super::{deflect_toward, Strategy, TurnContext};
use crate::command::Command;
use crate::docking::check_docking;
use crate::entity::Ship;

/// Rushes the nearest planet it is allowed to dock at.
///
/// Planets that refuse permission or have no free spot are skipped. The first
/// remaining planet is docked at when in reach, otherwise approached with
/// bounded deflection.
#[derive(Debug, Clone)]
pub struct Lemming {
    buffer: f64,
}

impl Lemming {
    /// Lemming that aims `buffer` outside the planet's surface.
    #[must_use]
    pub fn new(buffer: f64) -> Self {
        Self { buffer }
    }
}

impl Strategy for Lemming {
    fn name(&self) -> &'static str {
        "lemming"
    }

    fn command(&self, ctx: &TurnContext<'_>, ship: &Ship, rng: &mut dyn RngCore) -> Command {
        if !ship.is_undocked() {
            return Command::NoOp;
        }

        for planet in ctx.board.planets_by_proximity(ship) {
            let refused = match check_docking(ship, planet) {
                Ok(dock) => return dock,
                Err(refused) => refused,
            };
            if refused.no_permission() || refused.no_port() {
                continue;
            }

            debug!(ship = %ship.id, planet = %planet.id, "approaching");
            let approach = approach_location(self.buffer, planet, ship);
            return deflect_toward(ctx, ship, &approach, rng);
        }

        Command::NoOp
    }
}
