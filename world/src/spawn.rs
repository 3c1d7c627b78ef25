//! Border-only spawn rules for attackers.

use std::collections::BTreeSet;

use rampart_core::{MapDimensions, Position};

/// Reports whether an attacker may enter the map at `position`.
///
/// Valid cells lie inside the map and on its outer ring.
#[must_use]
pub fn is_valid_spawn_position(position: Position, dimensions: MapDimensions) -> bool {
    if !dimensions.contains(position) {
        return false;
    }

    let last_column = i64::from(dimensions.columns()) - 1;
    let last_row = i64::from(dimensions.rows()) - 1;
    let x = i64::from(position.x());
    let y = i64::from(position.y());

    x == 0 || y == 0 || x == last_column || y == last_row
}

/// Enumerates every border cell of the map.
///
/// Left and right columns and top and bottom rows are generated separately;
/// the set collapses the shared corners.
#[must_use]
pub fn all_valid_spawn_positions(dimensions: MapDimensions) -> BTreeSet<Position> {
    let mut positions = BTreeSet::new();
    let (Ok(columns), Ok(rows)) = (
        i32::try_from(dimensions.columns()),
        i32::try_from(dimensions.rows()),
    ) else {
        return positions;
    };
    if columns == 0 || rows == 0 {
        return positions;
    }

    for y in 0..rows {
        let _ = positions.insert(Position::new(0, y));
        let _ = positions.insert(Position::new(columns - 1, y));
    }
    for x in 0..columns {
        let _ = positions.insert(Position::new(x, 0));
        let _ = positions.insert(Position::new(x, rows - 1));
    }
    positions
}

/// Spawn rules for one match, with the border perimeter computed once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRules {
    dimensions: MapDimensions,
    ordered: Vec<Position>,
    positions: BTreeSet<Position>,
}

impl SpawnRules {
    /// Computes the rules for a map of the given dimensions.
    #[must_use]
    pub fn new(dimensions: MapDimensions) -> Self {
        let positions = all_valid_spawn_positions(dimensions);
        Self {
            dimensions,
            ordered: positions.iter().copied().collect(),
            positions,
        }
    }

    /// Reports whether an attacker may enter the map at `position`.
    #[must_use]
    pub fn is_valid(&self, position: Position) -> bool {
        is_valid_spawn_position(position, self.dimensions)
    }

    /// Every valid spawn cell.
    #[must_use]
    pub fn positions(&self) -> &BTreeSet<Position> {
        &self.positions
    }

    /// Every valid spawn cell as an indexable slice, in the set's order.
    #[must_use]
    pub fn ordered(&self) -> &[Position] {
        &self.ordered
    }

    /// Number of valid spawn cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Reports whether the map offers no spawn cell at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
