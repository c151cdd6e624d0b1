//! Per-game table of move-quality labels, keyed by move number and side.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// Move-quality category as labelled by the review page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Inaccuracy,
    Mistake,
    Blunder,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Inaccuracy, Severity::Mistake, Severity::Blunder];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Inaccuracy => "Inaccuracy",
            Severity::Mistake => "Mistake",
            Severity::Blunder => "Blunder",
        }
    }

    /// The inline comment written after a flagged move, e.g. `{Blunder}`.
    pub fn comment(self) -> String {
        format!("{{{}}}", self.as_str())
    }

    /// Parse an inline severity comment produced by [`Severity::comment`].
    pub fn from_comment(token: &str) -> Option<Self> {
        let inner = token.strip_prefix('{')?.strip_suffix('}')?;
        inner.parse().ok()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Inaccuracy" => Ok(Severity::Inaccuracy),
            "Mistake" => Ok(Severity::Mistake),
            "Blunder" => Ok(Severity::Blunder),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// One flagged move as found on the review page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub side: Side,
    pub move_text: String,
    pub severity: Severity,
    /// Glyph printed after the move on the review page: `?`, `??` or `?!`.
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ErrorKey {
    pub move_number: u32,
    pub side: Side,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<ErrorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black: Option<ErrorRecord>,
}

impl MoveErrors {
    pub fn get(&self, side: Side) -> Option<&ErrorRecord> {
        match side {
            Side::White => self.white.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }

    fn slot(&mut self, side: Side) -> &mut Option<ErrorRecord> {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

/// Move number -> at most one record per side.
///
/// Built once per game; a later insert for an existing key replaces the earlier
/// record and the key is remembered in [`ErrorTable::overwritten`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTable {
    moves: BTreeMap<u32, MoveErrors>,
    #[serde(skip)]
    overwritten: Vec<ErrorKey>,
}

impl ErrorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under `move_number` and the record's side.
    /// Returns the record it replaced, if any.
    pub fn insert(&mut self, move_number: u32, record: ErrorRecord) -> Option<ErrorRecord> {
        let side = record.side;
        let previous = self
            .moves
            .entry(move_number)
            .or_default()
            .slot(side)
            .replace(record);
        if previous.is_some() {
            self.overwritten.push(ErrorKey { move_number, side });
        }
        previous
    }

    pub fn get(&self, move_number: u32, side: Side) -> Option<&ErrorRecord> {
        self.moves.get(&move_number)?.get(side)
    }

    /// Number of flagged moves across both sides.
    pub fn len(&self) -> usize {
        self.moves
            .values()
            .map(|m| m.white.is_some() as usize + m.black.is_some() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys that were matched more than once, in the order the repeats were seen.
    pub fn overwritten(&self) -> &[ErrorKey] {
        &self.overwritten
    }

    /// Compact JSON rendering used for debug logging.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.moves).unwrap_or_default()
    }
}
