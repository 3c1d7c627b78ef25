//! Static map grid announced in the match preamble.

use rampart_core::{
    Defender, DefenderId, MapDimensions, Position, ProtocolFormatError, TypeCode, UnknownTypeError,
};

use crate::catalog::AttributeCatalog;

/// Grid of defender type codes stored row-major, `0` marking an empty cell.
///
/// The engine emits the grid one row after another, so the `k`-th cell on the
/// wire is the cell at column `k % columns`, row `k / columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldMap {
    dimensions: MapDimensions,
    cells: Vec<TypeCode>,
}

impl WorldMap {
    /// Wraps a row-major cell vector, rejecting it unless it holds exactly rows*columns cells.
    pub fn new(dimensions: MapDimensions, cells: Vec<TypeCode>) -> Result<Self, ProtocolFormatError> {
        let expected = dimensions.cell_count();
        if cells.len() != expected {
            return Err(ProtocolFormatError::GridSize {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { dimensions, cells })
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Type code stored at `position`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<TypeCode> {
        self.dimensions
            .index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Creates the initial defenders, one per non-empty cell, scanning row-major.
    ///
    /// Identifiers are assigned sequentially from zero in scan order and stay
    /// valid for the whole match.
    pub fn spawn_defenders(
        &self,
        catalog: &AttributeCatalog,
    ) -> Result<Vec<Defender>, UnknownTypeError> {
        let mut defenders = Vec::new();
        let mut next_id = 0;
        for (position, kind) in self.occupied_cells() {
            let attributes = catalog.lookup(kind)?;
            defenders.push(Defender {
                id: DefenderId::new(next_id),
                hp: attributes.hp(),
                kind,
                position,
            });
            next_id += 1;
        }
        Ok(defenders)
    }

    fn occupied_cells(&self) -> impl Iterator<Item = (Position, TypeCode)> + '_ {
        let columns = self.dimensions.columns().max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| !kind.is_empty())
            .map(move |(index, kind)| {
                let x = (index % columns) as i32;
                let y = (index / columns) as i32;
                (Position::new(x, y), *kind)
            })
    }
}
