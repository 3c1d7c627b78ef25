#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic reference decision routine for the Rampart client.
//!
//! Each turn it spawns one attacker of every affordable type on distinct
//! border cells picked by a seeded generator, and sends every active attacker
//! after its nearest defender.

use rampart_core::{Attacker, AttackerId, Defender, Position, Session, TurnState};
use rampart_world::{MatchConfig, Strategy};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;
const DEFAULT_SEED: u64 = 0x4d59_5df4_d0f3_3173;

/// Configuration parameters required to construct the reference strategy.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided generator seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Sample decision routine shipped with the client.
///
/// Spawns are keyed by attacker type code, so at most one unit of each type
/// enters per turn.
#[derive(Debug)]
pub struct ReferenceStrategy {
    rng_state: u64,
}

impl ReferenceStrategy {
    /// Creates a new strategy using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_state: config.rng_seed,
        }
    }

    fn spawn_attackers(&mut self, config: &MatchConfig, turn: &TurnState, session: &mut Session) {
        let cells = config.spawn_rules().ordered();
        if cells.is_empty() {
            return;
        }

        let mut budget = turn.coins_left();
        for (code, attributes) in config.attackers().iter() {
            if attributes.price() > budget {
                session.log(format!(
                    "type {code} costs {} but only {budget} coins remain",
                    attributes.price()
                ));
                continue;
            }

            let Some(position) = self.select_cell(cells, session) else {
                break;
            };
            session.record_spawn(AttackerId::new(code.get()), position);
            session.log(format!(
                "({},{}) to be spawned at Position({},{})",
                attributes.hp(),
                attributes.attack_power(),
                position.x(),
                position.y()
            ));
            budget -= attributes.price();
        }
    }

    fn select_cell(&mut self, cells: &[Position], session: &Session) -> Option<Position> {
        let start = (self.advance_rng() % cells.len() as u64) as usize;
        (0..cells.len())
            .map(|offset| cells[(start + offset) % cells.len()])
            .find(|cell| !session.has_spawned_at(*cell))
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

impl Default for ReferenceStrategy {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Strategy for ReferenceStrategy {
    fn decide(&mut self, config: &MatchConfig, turn: &TurnState, session: &mut Session) {
        session.log(format!("TURN {} LOGS:", turn.turn()));

        if !turn.defenders().is_empty() {
            self.spawn_attackers(config, turn, session);
        }

        for attacker in turn.attackers() {
            if let Some(defender) = nearest_defender(attacker, turn.defenders()) {
                session.record_target(attacker.id, defender.id);
            }
        }

        let spawned: Vec<_> = session.spawns().collect();
        for (id, position) in spawned {
            session.log(format!("Type {id} at Position {position}"));
        }
        log::debug!(
            "reference strategy chose {} spawns and {} targets",
            session.spawns().len(),
            session.targets().len()
        );
    }
}

fn nearest_defender<'a>(attacker: &Attacker, defenders: &'a [Defender]) -> Option<&'a Defender> {
    defenders.iter().min_by(|left, right| {
        let left_distance = attacker.position.distance_to(left.position);
        let right_distance = attacker.position.distance_to(right.position);
        left_distance
            .total_cmp(&right_distance)
            .then(left.id.cmp(&right.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_cell_skips_used_cells() {
        let cells = [Position::new(0, 0), Position::new(0, 1)];
        let mut session = Session::new();
        session.record_spawn(AttackerId::new(1), cells[0]);
        session.record_spawn(AttackerId::new(2), cells[1]);

        let mut strategy = ReferenceStrategy::new(Config::new(1));
        assert_eq!(strategy.select_cell(&cells, &session), None);
    }

    #[test]
    fn nearest_defender_breaks_ties_by_id() {
        let attacker = Attacker {
            id: AttackerId::new(0),
            hp: 1,
            kind: rampart_core::TypeCode::new(1),
            position: Position::new(2, 2),
        };
        let defender = |id, x, y| Defender {
            id: rampart_core::DefenderId::new(id),
            hp: 1,
            kind: rampart_core::TypeCode::new(1),
            position: Position::new(x, y),
        };
        let defenders = [defender(3, 2, 4), defender(1, 2, 0), defender(2, 9, 9)];

        let nearest = nearest_defender(&attacker, &defenders).expect("defender");
        assert_eq!(nearest.id.get(), 1);
    }
}
