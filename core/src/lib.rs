#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart client.
//!
//! This crate defines the vocabulary that connects the protocol adapter, the
//! immutable match configuration, and decision routines. The adapter decodes
//! the engine's stream into [`TurnState`] snapshots, a decision routine reads
//! a snapshot and records its choices in a [`Session`], and the adapter then
//! drains the session back onto the wire. Nothing in here performs I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

mod session;

pub use session::Session;

/// Location of a single map cell expressed as column (`x`) and row (`y`).
///
/// Coordinates are signed so that decision routines can reason about cells
/// just outside the map without wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Identifier of an attacker, assigned by the engine or chosen for a new spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a defender, assigned once when the map is scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DefenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit type code resolved against an attribute catalog. Zero marks an empty map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeCode(u32);

impl TypeCode {
    /// Type code stored in map cells that hold no defender.
    pub const EMPTY: TypeCode = TypeCode(0);

    /// Creates a new type code wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying code.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the code marks an empty map cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side a unit fights for. Selects the catalog its type code resolves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Units spawned by this client at the map border.
    Attacker,
    /// Units placed on the map by the engine before the first turn.
    Defender,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attacker => write!(f, "attacker"),
            Self::Defender => write!(f, "defender"),
        }
    }
}

/// Static attributes shared by every unit of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    hp: u32,
    range: u32,
    attack_power: u32,
    speed: u32,
    price: u32,
}

impl Attributes {
    /// Creates an attribute record in wire order.
    #[must_use]
    pub const fn new(hp: u32, range: u32, attack_power: u32, speed: u32, price: u32) -> Self {
        Self {
            hp,
            range,
            attack_power,
            speed,
            price,
        }
    }

    /// Hit points a fresh unit of this type starts with.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Attack range measured in cells.
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Damage dealt per attack.
    #[must_use]
    pub const fn attack_power(&self) -> u32 {
        self.attack_power
    }

    /// Movement speed in cells per turn.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Coins required to spawn one unit of this type.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.price
    }
}

/// Immutable snapshot of one attacker for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attacker {
    /// Identifier unique within the turn's active attackers.
    pub id: AttackerId,
    /// Current hit points.
    pub hp: u32,
    /// Type code resolving in the attacker catalog.
    pub kind: TypeCode,
    /// Cell occupied by the attacker.
    pub position: Position,
}

/// Immutable snapshot of one defender for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defender {
    /// Identifier assigned when the map was scanned.
    pub id: DefenderId,
    /// Current hit points.
    pub hp: u32,
    /// Type code resolving in the defender catalog.
    pub kind: TypeCode,
    /// Cell occupied by the defender.
    pub position: Position,
}

/// Dimensions of the map, fixed for the whole match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapDimensions {
    rows: u32,
    columns: u32,
}

impl MapDimensions {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows (extent along `y`).
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns (extent along `x`).
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the position lies inside the map.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.y() >= 0
            && i64::from(position.x()) < i64::from(self.columns)
            && i64::from(position.y()) < i64::from(self.rows)
    }

    /// Row-major index of the position, if it lies inside the map.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Read-only snapshot of the match for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    attackers: Vec<Attacker>,
    defenders: Vec<Defender>,
    coins_left: u32,
    turn: u32,
}

impl TurnState {
    /// Creates a snapshot from decoded entity lists.
    #[must_use]
    pub fn new(attackers: Vec<Attacker>, defenders: Vec<Defender>, coins_left: u32, turn: u32) -> Self {
        Self {
            attackers,
            defenders,
            coins_left,
            turn,
        }
    }

    /// Builds the synthetic turn 0 that precedes the first engine turn.
    #[must_use]
    pub fn pre_turn(defenders: Vec<Defender>, coin_cap: u32) -> Self {
        Self::new(Vec::new(), defenders, coin_cap, 0)
    }

    /// Attackers active this turn, in wire order.
    #[must_use]
    pub fn attackers(&self) -> &[Attacker] {
        &self.attackers
    }

    /// Defenders still standing this turn, in wire order.
    #[must_use]
    pub fn defenders(&self) -> &[Defender] {
        &self.defenders
    }

    /// Coins available for spawning.
    #[must_use]
    pub const fn coins_left(&self) -> u32 {
        self.coins_left
    }

    /// Turn number, 0 for the pre-turn.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Looks up an active attacker by identifier.
    #[must_use]
    pub fn attacker(&self, id: AttackerId) -> Option<&Attacker> {
        self.attackers.iter().find(|attacker| attacker.id == id)
    }

    /// Looks up an active defender by identifier.
    #[must_use]
    pub fn defender(&self, id: DefenderId) -> Option<&Defender> {
        self.defenders.iter().find(|defender| defender.id == id)
    }
}

/// Malformed or truncated engine input. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolFormatError {
    /// The stream ended before the named field could be read.
    #[error("input ended while reading {field}")]
    Truncated {
        /// Field that was expected next.
        field: &'static str,
    },
    /// A token could not be parsed as the integer the field requires.
    #[error("expected an integer for {field}, found `{token}`")]
    InvalidInteger {
        /// Field being decoded.
        field: &'static str,
        /// Offending token.
        token: String,
    },
    /// The map grid does not hold exactly rows*columns cells.
    #[error("map grid holds {actual} cells, expected {expected}")]
    GridSize {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count that was supplied.
        actual: usize,
    },
    /// Reading from the underlying stream failed.
    #[error("failed to read engine input")]
    Io(#[from] std::io::Error),
}

/// A type code with no catalog entry, signalling a client/engine version mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {role} type code {code}")]
pub struct UnknownTypeError {
    /// Catalog the lookup was made in.
    pub role: Role,
    /// Code that failed to resolve.
    pub code: TypeCode,
}

#[cfg(test)]
mod tests {
    use super::{MapDimensions, Position, Role, TypeCode, UnknownTypeError};

    #[test]
    fn distance_matches_pythagoras() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, 5);
        assert!((origin.distance_to(destination) - 5.0).abs() < f64::EPSILON);
        assert!((destination.distance_to(origin) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_handles_extreme_coordinates() {
        let left = Position::new(i32::MIN, 0);
        let right = Position::new(i32::MAX, 0);
        let expected = (i64::from(i32::MAX) - i64::from(i32::MIN)) as f64;
        assert!((left.distance_to(right) - expected).abs() < 1.0);
    }

    #[test]
    fn positions_compare_by_value() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        assert!(seen.insert(Position::new(2, 3)));
        assert!(!seen.insert(Position::new(2, 3)));
    }

    #[test]
    fn dimensions_index_row_major() {
        let dimensions = MapDimensions::new(2, 3);
        assert_eq!(dimensions.index(Position::new(0, 0)), Some(0));
        assert_eq!(dimensions.index(Position::new(2, 0)), Some(2));
        assert_eq!(dimensions.index(Position::new(0, 1)), Some(3));
        assert_eq!(dimensions.index(Position::new(3, 0)), None);
        assert_eq!(dimensions.index(Position::new(-1, 0)), None);
        assert_eq!(dimensions.cell_count(), 6);
    }

    #[test]
    fn unknown_type_error_names_role_and_code() {
        let error = UnknownTypeError {
            role: Role::Defender,
            code: TypeCode::new(7),
        };
        assert_eq!(error.to_string(), "unknown defender type code 7");
    }

    #[test]
    fn position_serializes_as_named_fields() {
        let json = serde_json::to_string(&Position::new(3, -1)).expect("serialize");
        assert_eq!(json, r#"{"x":3,"y":-1}"#);
    }
}
