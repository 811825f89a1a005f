//! Line protocol with the game engine.
//!
//! # Handshake
//!
//! 1. engine → bot: own player id
//! 2. engine → bot: `width height`
//! 3. engine → bot: initial snapshot
//! 4. bot → engine: bot name
//!
//! Then every turn the engine sends one snapshot line and the bot answers with
//! one command line. The loop ends cleanly at end of input or when the stop
//! flag is raised between turns.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::board::Board;
use crate::command::CommandBatch;
use crate::entity::PlayerId;
use crate::error::{ProtocolError, Result};
use crate::fleet::Fleet;
use crate::tokens::Tokens;

/// Why [`Session::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The engine closed its output.
    EndOfInput,
    /// The stop flag was raised.
    Stopped,
}

/// A connected bot: handshake done, ready to play turns.
#[derive(Debug)]
pub struct Session<R, W> {
    reader: R,
    writer: W,
    player: PlayerId,
    width: u32,
    height: u32,
    initial: Board,
    turn: u64,
    line: String,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Read the handshake and announce `name`.
    ///
    /// # Errors
    ///
    /// Fails if the input ends early, a header line is malformed, the initial
    /// snapshot does not parse, or the name cannot be written.
    pub fn handshake(reader: R, writer: W, name: &str) -> Result<Self> {
        let mut session = Self {
            reader,
            writer,
            player: PlayerId::new(0),
            width: 0,
            height: 0,
            initial: Board::new(0, 0, Vec::new(), Vec::new()),
            turn: 0,
            line: String::new(),
        };

        let header = session.require_line("player id")?;
        session.player = PlayerId::new(Tokens::new(&header).next_int("player id")?);

        let header = session.require_line("map dimensions")?;
        let mut tokens = Tokens::new(&header);
        session.width = tokens.next_int("map width")?;
        session.height = tokens.next_int("map height")?;

        let snapshot = session.require_line("initial snapshot")?;
        session.initial = Board::parse(session.width, session.height, &snapshot)?;

        session.send_line(name)?;
        info!(
            player = %session.player,
            width = session.width,
            height = session.height,
            players = session.initial.player_count(),
            "handshake complete"
        );
        Ok(session)
    }

    /// Our player id.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Map width and height.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Snapshot sent during the handshake.
    #[must_use]
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    /// Turns played so far.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Read the next snapshot, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors or a malformed snapshot.
    pub fn next_board(&mut self) -> Result<Option<Board>> {
        match self.read_line()? {
            Some(line) => Ok(Some(Board::parse(self.width, self.height, &line)?)),
            None => Ok(None),
        }
    }

    /// Write one turn's command line.
    ///
    /// # Errors
    ///
    /// Fails when the engine's input cannot be written.
    pub fn send(&mut self, batch: &CommandBatch) -> Result<()> {
        self.send_line(&batch.to_string())
    }

    /// Play turns until end of input or until `stop` is raised.
    ///
    /// # Errors
    ///
    /// Stops at the first protocol or I/O error.
    pub fn run(&mut self, fleet: &Fleet, stop: &AtomicBool) -> Result<SessionEnd> {
        loop {
            if stop.load(Ordering::SeqCst) {
                info!(turns = self.turn, "stop requested");
                return Ok(SessionEnd::Stopped);
            }

            let Some(board) = self.next_board()? else {
                info!(turns = self.turn, "engine closed input");
                return Ok(SessionEnd::EndOfInput);
            };

            self.turn += 1;
            let batch = fleet.commands(&board, self.turn);
            info!(
                turn = self.turn,
                ships = board.ships(self.player).len(),
                active = batch.active(),
                "turn"
            );
            debug!(turn = self.turn, line = %batch, "sending");
            self.send(&batch)?;
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn require_line(&mut self, what: &'static str) -> Result<String> {
        self.read_line()?.ok_or(ProtocolError::UnexpectedEof(what))
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<R, W> Session<R, W> {
    /// Give back the writer, e.g. to inspect what was sent.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
