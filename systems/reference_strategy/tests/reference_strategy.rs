use std::collections::HashSet;

use rampart_core::{
    Attacker, AttackerId, Attributes, DefenderId, MapDimensions, Position, Role, Session,
    TurnState, TypeCode,
};
use rampart_system_reference_strategy::{Config, ReferenceStrategy};
use rampart_world::{AttributeCatalog, MatchConfig, Strategy, WorldMap};

fn config() -> MatchConfig {
    let attackers = AttributeCatalog::from_records(
        Role::Attacker,
        vec![
            Attributes::new(10, 2, 3, 1, 5),
            Attributes::new(30, 1, 8, 1, 20),
            Attributes::new(15, 4, 2, 2, 8),
        ],
    );
    let defenders =
        AttributeCatalog::from_records(Role::Defender, vec![Attributes::new(20, 0, 4, 0, 0)]);
    let mut cells = vec![TypeCode::EMPTY; 25];
    cells[6] = TypeCode::new(1);
    cells[18] = TypeCode::new(1);
    let map = WorldMap::new(MapDimensions::new(5, 5), cells).expect("grid");
    MatchConfig::new(3, 100, attackers, defenders, map).expect("config")
}

fn decide(strategy: &mut ReferenceStrategy, config: &MatchConfig, turn: &TurnState) -> Session {
    let mut session = Session::new();
    strategy.decide(config, turn, &mut session);
    session
}

#[test]
fn spawns_every_affordable_type_on_distinct_border_cells() {
    let config = config();
    let mut strategy = ReferenceStrategy::new(Config::new(7));
    let session = decide(&mut strategy, &config, &config.pre_turn());

    let spawns: Vec<_> = session.spawns().collect();
    let ids: Vec<u32> = spawns.iter().map(|(id, _)| id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let cells: HashSet<Position> = spawns.iter().map(|(_, position)| *position).collect();
    assert_eq!(cells.len(), 3, "spawn cells must be distinct");
    for cell in cells {
        assert!(config.spawn_rules().is_valid(cell), "{cell} is not a border cell");
    }
}

#[test]
fn skips_types_over_budget() {
    let config = config();
    let turn = TurnState::new(Vec::new(), config.initial_defenders().to_vec(), 14, 1);
    let mut strategy = ReferenceStrategy::default();
    let session = decide(&mut strategy, &config, &turn);

    let ids: Vec<u32> = session.spawns().map(|(id, _)| id.get()).collect();
    assert_eq!(ids, vec![1, 3], "type 2 costs 20 and type 3 fits in the 9 left");
    assert!(session
        .log_contents()
        .contains("type 2 costs 20 but only 9 coins remain"));
}

#[test]
fn holds_spawns_once_no_defender_stands() {
    let config = config();
    let turn = TurnState::new(Vec::new(), Vec::new(), 100, 2);
    let mut strategy = ReferenceStrategy::default();
    let session = decide(&mut strategy, &config, &turn);

    assert_eq!(session.spawns().len(), 0);
    assert_eq!(session.log_contents(), "TURN 2 LOGS:");
}

#[test]
fn targets_nearest_defender() {
    let config = config();
    let attackers = vec![
        Attacker {
            id: AttackerId::new(11),
            hp: 10,
            kind: TypeCode::new(1),
            position: Position::new(0, 0),
        },
        Attacker {
            id: AttackerId::new(12),
            hp: 10,
            kind: TypeCode::new(1),
            position: Position::new(4, 4),
        },
    ];
    let turn = TurnState::new(attackers, config.initial_defenders().to_vec(), 0, 1);
    let mut strategy = ReferenceStrategy::default();
    let session = decide(&mut strategy, &config, &turn);

    let targets: Vec<_> = session.targets().collect();
    assert_eq!(
        targets,
        vec![
            (AttackerId::new(11), DefenderId::new(0)),
            (AttackerId::new(12), DefenderId::new(1)),
        ]
    );
}

#[test]
fn identical_seeds_replay_identically() {
    let config = config();
    let mut first = ReferenceStrategy::new(Config::new(0x1234_5678));
    let mut second = ReferenceStrategy::new(Config::new(0x1234_5678));

    for _ in 0..4 {
        let left = decide(&mut first, &config, &config.pre_turn());
        let right = decide(&mut second, &config, &config.pre_turn());
        assert_eq!(
            left.spawns().collect::<Vec<_>>(),
            right.spawns().collect::<Vec<_>>()
        );
        assert_eq!(left.log_contents(), right.log_contents());
    }
}
