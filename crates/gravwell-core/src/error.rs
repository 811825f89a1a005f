//! Error types for snapshot parsing and the session loop.

use thiserror::Error;

/// Failure to read or understand the game engine's input.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The line ended before a required token.
    #[error("missing token at position {position}: expected {expected}")]
    MissingToken {
        /// What the parser was looking for
        expected: &'static str,
        /// Zero-based token index
        position: usize,
    },

    /// A token that should be an integer is not.
    #[error("bad integer {token:?} at position {position} ({expected})")]
    BadInteger {
        /// Offending token
        token: String,
        /// What the parser was looking for
        expected: &'static str,
        /// Zero-based token index
        position: usize,
    },

    /// A token that should be a real number is not.
    #[error("bad number {token:?} at position {position} ({expected})")]
    BadFloat {
        /// Offending token
        token: String,
        /// What the parser was looking for
        expected: &'static str,
        /// Zero-based token index
        position: usize,
    },

    /// Player blocks must appear as 0, 1, 2, ...
    #[error("player order mismatch: expected player {expected}, found {found}")]
    PlayerOrder {
        /// Index of the block being read
        expected: usize,
        /// Id carried by the block
        found: i64,
    },

    /// Docking status outside 0..=3.
    #[error("bad docking status {0}")]
    DockingStatus(i64),

    /// Input ended during the handshake.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// Reading from or writing to the engine failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for fallible game-model operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
