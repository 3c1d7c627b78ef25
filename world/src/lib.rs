#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable match configuration for the Rampart client.
//!
//! Everything the engine announces before the first turn (turn count, coin
//! cap, both attribute catalogs and the map) is gathered into a single
//! [`MatchConfig`] built once during initialisation and lent to every
//! component that needs it. Decision routines plug in through [`Strategy`].

mod audit;
mod catalog;
mod map;
mod spawn;

use rampart_core::{Defender, MapDimensions, Session, TurnState, UnknownTypeError};

pub use audit::{audit, Violation};
pub use catalog::AttributeCatalog;
pub use map::WorldMap;
pub use spawn::{all_valid_spawn_positions, is_valid_spawn_position, SpawnRules};

/// Everything fixed for the duration of one match.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    turn_count: u32,
    coin_cap: u32,
    attackers: AttributeCatalog,
    defenders: AttributeCatalog,
    map: WorldMap,
    spawn_rules: SpawnRules,
    initial_defenders: Vec<Defender>,
}

impl MatchConfig {
    /// Assembles the configuration and derives the initial defenders from the map.
    ///
    /// Fails when a map cell names a type missing from the defender catalog.
    pub fn new(
        turn_count: u32,
        coin_cap: u32,
        attackers: AttributeCatalog,
        defenders: AttributeCatalog,
        map: WorldMap,
    ) -> Result<Self, UnknownTypeError> {
        let initial_defenders = map.spawn_defenders(&defenders)?;
        let spawn_rules = SpawnRules::new(map.dimensions());
        log::debug!(
            "map {}x{} holds {} defenders and {} spawn cells",
            map.dimensions().rows(),
            map.dimensions().columns(),
            initial_defenders.len(),
            spawn_rules.len()
        );
        Ok(Self {
            turn_count,
            coin_cap,
            attackers,
            defenders,
            map,
            spawn_rules,
            initial_defenders,
        })
    }

    /// Number of engine turns following the pre-turn.
    #[must_use]
    pub const fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Coins available before anything is spent.
    #[must_use]
    pub const fn coin_cap(&self) -> u32 {
        self.coin_cap
    }

    /// Attribute catalog for attacker types.
    #[must_use]
    pub const fn attackers(&self) -> &AttributeCatalog {
        &self.attackers
    }

    /// Attribute catalog for defender types.
    #[must_use]
    pub const fn defenders(&self) -> &AttributeCatalog {
        &self.defenders
    }

    /// The map grid.
    #[must_use]
    pub const fn map(&self) -> &WorldMap {
        &self.map
    }

    /// Map dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> MapDimensions {
        self.map.dimensions()
    }

    /// Border spawn rules computed for the map.
    #[must_use]
    pub const fn spawn_rules(&self) -> &SpawnRules {
        &self.spawn_rules
    }

    /// Defenders derived from the map, in identifier order.
    #[must_use]
    pub fn initial_defenders(&self) -> &[Defender] {
        &self.initial_defenders
    }

    /// Builds the synthetic turn 0 processed before any engine turn.
    #[must_use]
    pub fn pre_turn(&self) -> TurnState {
        TurnState::pre_turn(self.initial_defenders.clone(), self.coin_cap)
    }
}

/// Decision routine invoked once per turn.
///
/// Implementations read the match configuration and the turn snapshot and
/// record their choices in the session. The session is empty on entry.
pub trait Strategy {
    /// Records this turn's spawns, targets and log lines.
    fn decide(&mut self, config: &MatchConfig, turn: &TurnState, session: &mut Session);
}

impl<F> Strategy for F
where
    F: FnMut(&MatchConfig, &TurnState, &mut Session),
{
    fn decide(&mut self, config: &MatchConfig, turn: &TurnState, session: &mut Session) {
        self(config, turn, session);
    }
}
