use rand::{Rng, RngCore};
use sextant::approach_location;
use tracing::debug;

use super::{deflect_toward, Strategy, TurnContext};
use crate::command::Command;
use crate::docking::check_docking;
use crate::entity::{Planet, Ship};

/// Settles like [`Lemming`](super::Lemming) until every planet is owned, then raids.
///
/// While striking, only planets that refuse permission are considered: out of
/// reach, the ship approaches the planet; in reach, it flies at a random ship
/// of the planet's owner.
#[derive(Debug, Clone)]
pub struct Hyena {
    buffer: f64,
}

impl Hyena {
    /// Hyena that aims `buffer` outside a planet's surface when approaching.
    #[must_use]
    pub fn new(buffer: f64) -> Self {
        Self { buffer }
    }

    fn strike(
        ctx: &TurnContext<'_>,
        ship: &Ship,
        planet: &Planet,
        rng: &mut dyn RngCore,
    ) -> Option<Command> {
        let owner = planet.owner?;
        let prey = ctx.board.ships(owner);
        if prey.is_empty() {
            return None;
        }
        let victim = &prey[rng.gen_range(0..prey.len())];
        debug!(ship = %ship.id, victim = %victim.id, planet = %planet.id, "striking");
        Some(deflect_toward(ctx, ship, victim, rng))
    }
}

impl Strategy for Hyena {
    fn name(&self) -> &'static str {
        "hyena"
    }

    fn command(&self, ctx: &TurnContext<'_>, ship: &Ship, rng: &mut dyn RngCore) -> Command {
        if !ship.is_undocked() {
            return Command::NoOp;
        }

        let striking = ctx.board.all_planets_owned();

        for planet in ctx.board.planets_by_proximity(ship) {
            let refused = match check_docking(ship, planet) {
                Ok(dock) => return dock,
                Err(refused) => refused,
            };

            if striking {
                if !refused.no_permission() {
                    continue;
                }
            } else if refused.no_permission() || refused.no_port() {
                continue;
            }

            if refused.no_proximity() {
                let approach = approach_location(self.buffer, planet, ship);
                return deflect_toward(ctx, ship, &approach, rng);
            }

            if let Some(command) = Self::strike(ctx, ship, planet, rng) {
                return command;
            }
        }

        Command::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{context, BoardBuilder};
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_settles_while_planets_remain() {
        let board = BoardBuilder::new()
            .planet(0, DVec2::new(6.0, 0.0), 2.0, 2)
            .planet_owned(1, DVec2::new(-6.0, 0.0), 2.0, 2, 1, &[])
            .ship(0, 4, DVec2::ZERO)
            .ship(1, 5, DVec2::new(-60.0, -60.0))
            .build();
        let nav = Default::default();
        let ctx = context(&board, &nav, 0);
        let ship = &board.ships(ctx.player)[0];

        let command = Hyena::new(2.0).command(&ctx, ship, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(command.to_string(), "d 4 0");
    }

    #[test]
    fn test_strikes_owner_ship_when_all_owned() {
        // Planet 0 is ours, planet 1 belongs to player 1 and is in reach.
        let board = BoardBuilder::new()
            .planet_owned(0, DVec2::new(30.0, 30.0), 2.0, 2, 0, &[])
            .planet_owned(1, DVec2::new(6.0, 0.0), 2.0, 2, 1, &[])
            .ship(0, 4, DVec2::ZERO)
            .ship(1, 5, DVec2::new(0.0, 50.0))
            .build();
        let nav = Default::default();
        let ctx = context(&board, &nav, 0);
        let ship = &board.ships(ctx.player)[0];

        let command = Hyena::new(2.0).command(&ctx, ship, &mut ChaCha8Rng::seed_from_u64(5));
        let Command::Thrust { ship: id, angle, speed } = command else {
            panic!("expected thrust, got {command:?}");
        };
        assert_eq!(id.as_u64(), 4);
        assert_eq!(angle, 90);
        assert_eq!(speed, 7);
    }

    #[test]
    fn test_approaches_distant_enemy_planet_when_striking() {
        let board = BoardBuilder::new()
            .planet_owned(1, DVec2::new(40.0, 0.0), 5.0, 2, 1, &[])
            .ship(0, 4, DVec2::ZERO)
            .ship(1, 5, DVec2::new(0.0, 80.0))
            .build();
        let nav = Default::default();
        let ctx = context(&board, &nav, 0);
        let ship = &board.ships(ctx.player)[0];

        let command = Hyena::new(2.0).command(&ctx, ship, &mut ChaCha8Rng::seed_from_u64(5));
        let Command::Thrust { angle, .. } = command else {
            panic!("expected thrust, got {command:?}");
        };
        assert_eq!(angle, 0);
    }

    #[test]
    fn test_owner_without_ships_is_skipped() {
        let board = BoardBuilder::new()
            .planet_owned(1, DVec2::new(6.0, 0.0), 2.0, 2, 1, &[])
            .ship(0, 4, DVec2::ZERO)
            .players(2)
            .build();
        let nav = Default::default();
        let ctx = context(&board, &nav, 0);
        let ship = &board.ships(ctx.player)[0];

        let command = Hyena::new(2.0).command(&ctx, ship, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(command, Command::NoOp);
    }
}
