//! Value types for the access context.
//!
//! Raw strings from the engine are parsed into these types once, at the
//! boundary, so the registry only ever sees validated identities, canonical
//! locations, and well-formed PINs.

use std::fmt;
use std::sync::LazyLock;

use doorward_core::error::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exactly four ASCII digits. `\d` would also admit non-ASCII digits.
static PIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("PIN pattern is a valid regex"));

/// Identity of a player, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Parses a player identity token.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentity` if `raw` is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|e| DomainError::InvalidIdentity(format!("{raw:?}: {e}")))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A block coordinate in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',').map(|part| part.trim().parse::<i32>());
        let pos = Self {
            x: parts.next()?.ok()?,
            y: parts.next()?.ok()?,
            z: parts.next()?.ok()?,
        };
        parts.next().is_none().then_some(pos)
    }
}

/// Canonical key of a controlled door.
///
/// Coordinates written as `x,y,z` collapse to a single `Block` key however
/// they are spaced. Any other non-empty text is an opaque `Named` key,
/// compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Location {
    /// A block coordinate.
    Block(BlockPos),
    /// An opaque, non-coordinate key.
    Named(String),
}

impl Location {
    /// Parses a location key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` if `raw` is empty.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidLocation(
                "location must not be empty".to_owned(),
            ));
        }
        // Only coordinates are canonicalised; named keys are kept verbatim.
        Ok(BlockPos::parse(raw.trim()).map_or_else(|| Self::Named(raw.to_owned()), Self::Block))
    }
}

impl From<BlockPos> for Location {
    fn from(pos: BlockPos) -> Self {
        Self::Block(pos)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(pos) => write!(f, "{},{},{}", pos.x, pos.y, pos.z),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

/// A four-digit door PIN.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validates a PIN candidate. No trimming or normalisation is applied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFormat` unless `candidate` is exactly four
    /// ASCII digits.
    pub fn parse(candidate: &str) -> Result<Self, DomainError> {
        if PIN_PATTERN.is_match(candidate) {
            Ok(Self(candidate.to_owned()))
        } else {
            Err(DomainError::InvalidFormat)
        }
    }

    /// Builds a PIN from a number, zero-padded. Only the last four digits
    /// are kept.
    #[must_use]
    pub fn from_number(n: u32) -> Self {
        Self(format!("{:04}", n % 10_000))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Outcome of a player touching a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The door was unbound; the player now owns it.
    BoundAsOwner,
    /// The player owns the door; it opens.
    Granted,
    /// The player is not the owner and is challenged for a PIN.
    DeniedNeedsPin,
}
