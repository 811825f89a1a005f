//! Whitespace token cursor over one snapshot line.

use std::str::{FromStr, SplitWhitespace};

use crate::error::{ProtocolError, Result};

pub(crate) struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self {
            inner: line.split_whitespace(),
            position: 0,
        }
    }

    pub(crate) fn next_str(&mut self, expected: &'static str) -> Result<&'a str> {
        let position = self.position;
        let token = self
            .inner
            .next()
            .ok_or(ProtocolError::MissingToken { expected, position })?;
        self.position += 1;
        Ok(token)
    }

    pub(crate) fn next_int<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        let position = self.position;
        let token = self.next_str(expected)?;
        token.parse().map_err(|_| ProtocolError::BadInteger {
            token: token.to_string(),
            expected,
            position,
        })
    }

    pub(crate) fn next_float(&mut self, expected: &'static str) -> Result<f64> {
        let position = self.position;
        let token = self.next_str(expected)?;
        token.parse().map_err(|_| ProtocolError::BadFloat {
            token: token.to_string(),
            expected,
            position,
        })
    }

    /// Index of the next token.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Tokens left unread.
    pub(crate) fn remaining(&self) -> usize {
        self.inner.clone().count()
    }
}
