//! Fleet strategies.
//!
//! A [`Strategy`] decides one [`Command`] per own ship per turn. Strategies
//! read an immutable [`TurnContext`] and draw randomness only from the RNG they
//! are handed, so they can run for many ships in parallel and still produce the
//! same commands for the same seed.
//!
//! | Strategy | Target choice | Navigation |
//! |----------|---------------|------------|
//! | [`Settler`] | nearest welcoming planet with a free spot and matching id parity | grid search |
//! | [`Lemming`] | nearest planet it may dock at | deflection |
//! | [`Hyena`] | like Lemming, then raids enemy ships once every planet is owned | deflection |

mod hyena;
mod lemming;
mod settler;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sextant::{Marker, Navigator};
use tracing::debug;

use crate::board::Board;
use crate::command::Command;
use crate::entity::{PlayerId, Ship};

pub use hyena::Hyena;
pub use lemming::Lemming;
pub use settler::Settler;

/// Read-only state shared by every ship decision in one turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// The turn's snapshot
    pub board: &'a Board,
    /// Player the fleet plays for
    pub player: PlayerId,
    /// Turn number, starting at 1
    pub turn: u64,
    /// Planner over the board's obstacles
    pub navigator: Navigator<'a>,
}

/// Decides what one ship does this turn.
///
/// Implementations must be `Send + Sync`; the fleet runs them across threads.
pub trait Strategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Command for `ship`, which belongs to `ctx.player`.
    fn command(&self, ctx: &TurnContext<'_>, ship: &Ship, rng: &mut dyn RngCore) -> Command;
}

/// Which built-in strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// See [`Settler`]
    #[default]
    Settler,
    /// See [`Lemming`]
    Lemming,
    /// See [`Hyena`]
    Hyena,
}

impl StrategyKind {
    /// Every built-in strategy.
    pub const ALL: [Self; 3] = [Self::Settler, Self::Lemming, Self::Hyena];

    /// Instantiate with the given buffers.
    ///
    /// `settle_buffer` applies to [`Settler`], `approach_buffer` to the others.
    #[must_use]
    pub fn build(self, settle_buffer: f64, approach_buffer: f64) -> Box<dyn Strategy> {
        match self {
            Self::Settler => Box::new(Settler::new(settle_buffer)),
            Self::Lemming => Box::new(Lemming::new(approach_buffer)),
            Self::Hyena => Box::new(Hyena::new(approach_buffer)),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settler => "settler",
            Self::Lemming => "lemming",
            Self::Hyena => "hyena",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy {0:?} (expected settler, lemming or hyena)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Head for `target` using bounded deflection.
fn deflect_toward(
    ctx: &TurnContext<'_>,
    ship: &Ship,
    target: &impl Marker,
    rng: &mut dyn RngCore,
) -> Command {
    let plan = ctx.navigator.plan_deflection(ship, target, rng);
    debug!(
        turn = ctx.turn,
        ship = %ship.id,
        decision = ?plan.decision,
        scans = plan.scans,
        "deflection plan"
    );
    Command::follow(ship, &plan.decision)
}

/// Head for `target` using the grid search.
fn grid_toward(ctx: &TurnContext<'_>, ship: &Ship, target: &impl Marker) -> Command {
    let plan = ctx.navigator.plan_grid(ship, target);
    debug!(
        turn = ctx.turn,
        ship = %ship.id,
        decision = ?plan.decision,
        scans = plan.scans,
        "grid plan"
    );
    Command::follow(ship, &plan.decision)
}
