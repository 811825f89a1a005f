//! Fleet commander: one strategy applied to every own ship, in parallel.
//!
//! # Determinism
//!
//! Each ship gets its own [`ChaCha8Rng`] seeded from a hash of
//! (fleet seed, turn, ship id). Decisions run on the rayon pool and are then
//! sorted by ship id, so the command line for a turn depends only on the seed
//! and the snapshot, never on thread scheduling.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sextant::{NavConfig, Navigator};
use tracing::debug;

use crate::board::Board;
use crate::command::{Command, CommandBatch};
use crate::entity::{EntityId, PlayerId};
use crate::strategy::{Strategy, StrategyKind, TurnContext};

/// Fleet tuning, loadable from JSON.
///
/// # Example
///
/// ```
/// use gravwell_core::fleet::FleetConfig;
/// use gravwell_core::strategy::StrategyKind;
///
/// let config: FleetConfig = serde_json::from_str(r#"{ "strategy": "hyena", "seed": 7 }"#).unwrap();
/// assert_eq!(config.strategy, StrategyKind::Hyena);
/// assert_eq!(config.settle_buffer, 3.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Strategy to run
    pub strategy: StrategyKind,
    /// Master seed for per-ship randomness
    pub seed: u64,
    /// Distance outside a planet's surface the settler aims for
    pub settle_buffer: f64,
    /// Distance outside a planet's surface the lemming and hyena aim for
    pub approach_buffer: f64,
    /// Planner tuning
    pub nav: NavConfig,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            seed: 0,
            settle_buffer: 3.0,
            approach_buffer: 2.0,
            nav: NavConfig::default(),
        }
    }
}

/// Issues one command per own ship each turn.
pub struct Fleet {
    player: PlayerId,
    config: FleetConfig,
    strategy: Box<dyn Strategy>,
}

impl fmt::Debug for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fleet")
            .field("player", &self.player)
            .field("strategy", &self.strategy.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Fleet {
    /// Fleet running the strategy named in `config`.
    #[must_use]
    pub fn new(player: PlayerId, config: FleetConfig) -> Self {
        let strategy = config
            .strategy
            .build(config.settle_buffer, config.approach_buffer);
        Self::with_strategy(player, config, strategy)
    }

    /// Fleet running a custom strategy. `config.strategy` is ignored.
    #[must_use]
    pub fn with_strategy(player: PlayerId, config: FleetConfig, strategy: Box<dyn Strategy>) -> Self {
        Self {
            player,
            config,
            strategy,
        }
    }

    /// Player this fleet commands.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Name of the running strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Commands for every ship of this fleet's player, in ship-id order.
    #[must_use]
    pub fn commands(&self, board: &Board, turn: u64) -> CommandBatch {
        let ctx = TurnContext {
            board,
            player: self.player,
            turn,
            navigator: Navigator::new(board.obstacles(), &self.config.nav),
        };

        let mut decided: Vec<(EntityId, Command)> = board
            .ships(self.player)
            .par_iter()
            .map(|ship| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.ship_seed(turn, ship.id));
                let command = self.strategy.command(&ctx, ship, &mut rng);
                debug!(turn, ship = %ship.id, %command, "decided");
                (ship.id, command)
            })
            .collect();

        decided.sort_by_key(|(id, _)| *id);
        decided.into_iter().map(|(_, command)| command).collect()
    }

    /// Deterministic per-ship seed.
    fn ship_seed(&self, turn: u64, ship: EntityId) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.config.seed.hash(&mut hasher);
        turn.hash(&mut hasher);
        ship.hash(&mut hasher);
        hasher.finish()
    }
}
