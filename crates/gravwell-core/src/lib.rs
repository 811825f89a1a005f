//! # Gravwell Core
//!
//! Game model and turn loop for the Gravwell fleet bot.
//!
//! Each turn the engine sends a snapshot of every ship and planet; the bot
//! answers with one command per own ship. Navigation is delegated to
//! [`sextant`], which this crate re-exports.
//!
//! - **Entities**: ships and planets, both navigation markers
//! - **Board**: one parsed snapshot plus the turn's obstacle index
//! - **Commands**: thrust, dock, undock and their wire format
//! - **Docking**: proximity, permission and port rules
//! - **Strategies**: settler, lemming, hyena
//! - **Fleet**: per-ship decisions in parallel, deterministic per seed
//! - **Session**: handshake and turn loop over any reader/writer pair
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use std::sync::atomic::AtomicBool;
//!
//! use gravwell_core::fleet::{Fleet, FleetConfig};
//! use gravwell_core::session::{Session, SessionEnd};
//!
//! let snapshot = "1 0 1 0 10 10 255 0 0 0 0 0 0 1 0 40 10 1000 5 2 1 100 0 0 0";
//! let input = format!("0\n240 160\n{snapshot}\n{snapshot}\n");
//!
//! let mut session = Session::handshake(Cursor::new(input), Vec::new(), "Gravwell").unwrap();
//! let fleet = Fleet::new(session.player(), FleetConfig::default());
//! let end = session.run(&fleet, &AtomicBool::new(false)).unwrap();
//!
//! assert_eq!(end, SessionEnd::EndOfInput);
//! let sent = String::from_utf8(session.into_writer()).unwrap();
//! assert_eq!(sent.lines().next(), Some("Gravwell"));
//! assert!(sent.lines().nth(1).unwrap().starts_with("t 0 "));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export sextant for navigation types
pub use sextant;

pub mod board;
pub mod command;
pub mod docking;
pub mod entity;
pub mod error;
pub mod fleet;
pub mod session;
pub mod strategy;

mod tokens;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use command::{Command, CommandBatch};
pub use docking::{check_docking, DockingError, DockingFaults};
pub use entity::{DockingStatus, EntityId, Planet, PlayerId, Ship};
pub use error::{ProtocolError, Result};
pub use fleet::{Fleet, FleetConfig};
pub use session::{Session, SessionEnd};
pub use strategy::{Strategy, StrategyKind, TurnContext};
