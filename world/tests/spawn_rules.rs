use proptest::prelude::*;
use rampart_core::{MapDimensions, Position};
use rampart_world::{all_valid_spawn_positions, is_valid_spawn_position, SpawnRules};

proptest! {
    #[test]
    fn perimeter_size_matches_formula(rows in 2u32..40, columns in 2u32..40) {
        let positions = all_valid_spawn_positions(MapDimensions::new(rows, columns));
        let expected = (2 * rows + 2 * columns - 4) as usize;
        prop_assert_eq!(positions.len(), expected);
    }

    #[test]
    fn predicate_agrees_with_enumeration(
        rows in 0u32..12,
        columns in 0u32..12,
        x in -3i32..15,
        y in -3i32..15,
    ) {
        let dimensions = MapDimensions::new(rows, columns);
        let position = Position::new(x, y);
        prop_assert_eq!(
            is_valid_spawn_position(position, dimensions),
            all_valid_spawn_positions(dimensions).contains(&position)
        );
    }

    #[test]
    fn cached_rules_match_free_functions(rows in 0u32..12, columns in 0u32..12) {
        let dimensions = MapDimensions::new(rows, columns);
        let rules = SpawnRules::new(dimensions);
        prop_assert_eq!(rules.positions(), &all_valid_spawn_positions(dimensions));
        for position in rules.ordered() {
            prop_assert!(rules.is_valid(*position));
        }
    }
}

#[test]
fn every_perimeter_cell_touches_an_edge() {
    let dimensions = MapDimensions::new(5, 7);
    for position in all_valid_spawn_positions(dimensions) {
        let on_edge = position.x() == 0
            || position.y() == 0
            || position.x() == 6
            || position.y() == 4;
        assert!(on_edge, "{position} is not on the border");
    }
}
