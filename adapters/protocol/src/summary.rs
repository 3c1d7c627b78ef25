//! Record of what the client sent over a whole match.

use rampart_core::{AttackerId, DefenderId, Position, Session, TurnState};
use serde::Serialize;

/// Decisions emitted for every processed turn, in turn order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    /// One entry per processed turn, the pre-turn first.
    pub turns: Vec<TurnRecord>,
}

impl MatchSummary {
    /// Number of turns answered, including the pre-turn.
    #[must_use]
    pub fn turns_processed(&self) -> usize {
        self.turns.len()
    }

    /// Total spawns written to the engine.
    #[must_use]
    pub fn spawns_emitted(&self) -> usize {
        self.turns.iter().map(|turn| turn.spawns.len()).sum()
    }

    /// Total targets written to the engine.
    #[must_use]
    pub fn targets_emitted(&self) -> usize {
        self.turns.iter().map(|turn| turn.targets.len()).sum()
    }

    /// Total decisions removed by the session audit.
    #[must_use]
    pub fn violations(&self) -> usize {
        self.turns.iter().map(|turn| turn.dropped).sum()
    }

    pub(crate) fn record(&mut self, turn: &TurnState, session: &Session, dropped: usize) {
        self.turns.push(TurnRecord {
            turn: turn.turn(),
            coins_left: turn.coins_left(),
            spawns: session
                .spawns()
                .map(|(attacker, position)| SpawnRecord { attacker, position })
                .collect(),
            targets: session
                .targets()
                .map(|(attacker, defender)| TargetRecord { attacker, defender })
                .collect(),
            dropped,
        });
    }
}

/// Decisions emitted for one turn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnRecord {
    /// Turn number, 0 for the pre-turn.
    pub turn: u32,
    /// Coins the engine reported for the turn.
    pub coins_left: u32,
    /// Spawns written, in wire order.
    pub spawns: Vec<SpawnRecord>,
    /// Targets written, in wire order.
    pub targets: Vec<TargetRecord>,
    /// Decisions removed by the session audit.
    pub dropped: usize,
}

/// One spawn line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpawnRecord {
    /// Identifier chosen for the new attacker.
    pub attacker: AttackerId,
    /// Border cell it enters at.
    pub position: Position,
}

/// One target line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetRecord {
    /// Attacking unit.
    pub attacker: AttackerId,
    /// Defender it is sent after.
    pub defender: DefenderId,
}
