//! Turn-scoped accumulator for the decisions of one decision call.

use std::collections::{BTreeMap, HashSet};

use crate::{AttackerId, DefenderId, Position};

/// Decisions recorded by a decision routine during a single turn.
///
/// The protocol driver owns one session for the whole match and calls
/// [`Session::clear`] before every decision call, so nothing recorded in one
/// turn leaks into the next. Spawns and targets are kept ordered by attacker
/// identifier, which fixes the order they are written to the engine.
#[derive(Clone, Debug, Default)]
pub struct Session {
    spawns: BTreeMap<AttackerId, Position>,
    targets: BTreeMap<AttackerId, DefenderId>,
    spawned_at: HashSet<Position>,
    log: Vec<String>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a new attacker should enter the map at `position`.
    ///
    /// A second call with the same identifier replaces the earlier position.
    /// Spawning twice on one cell is not rejected here; decision routines are
    /// expected to consult [`Session::has_spawned_at`] first.
    pub fn record_spawn(&mut self, id: AttackerId, position: Position) {
        let _ = self.spawns.insert(id, position);
        let _ = self.spawned_at.insert(position);
    }

    /// Reports whether a spawn was already recorded on `position` this turn.
    #[must_use]
    pub fn has_spawned_at(&self, position: Position) -> bool {
        self.spawned_at.contains(&position)
    }

    /// Directs `attacker` at `defender`, replacing any earlier choice for that attacker.
    pub fn record_target(&mut self, attacker: AttackerId, defender: DefenderId) {
        let _ = self.targets.insert(attacker, defender);
    }

    /// Appends one line to the diagnostic log.
    pub fn log(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }

    /// Returns the diagnostic log with entries joined by newlines.
    #[must_use]
    pub fn log_contents(&self) -> String {
        self.log.join("\n")
    }

    /// Discards the diagnostic log while keeping recorded decisions.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Discards every decision and log entry.
    pub fn clear(&mut self) {
        self.spawns.clear();
        self.targets.clear();
        self.spawned_at.clear();
        self.log.clear();
    }

    /// Recorded spawns in ascending attacker identifier order.
    pub fn spawns(&self) -> impl ExactSizeIterator<Item = (AttackerId, Position)> + '_ {
        self.spawns.iter().map(|(id, position)| (*id, *position))
    }

    /// Recorded targets in ascending attacker identifier order.
    pub fn targets(&self) -> impl ExactSizeIterator<Item = (AttackerId, DefenderId)> + '_ {
        self.targets
            .iter()
            .map(|(attacker, defender)| (*attacker, *defender))
    }

    /// Keeps only the spawns accepted by `keep`, visited in ascending identifier order.
    ///
    /// The set consulted by [`Session::has_spawned_at`] is rebuilt from the
    /// surviving spawns.
    pub fn retain_spawns(&mut self, mut keep: impl FnMut(AttackerId, Position) -> bool) {
        self.spawns.retain(|id, position| keep(*id, *position));
        self.spawned_at = self.spawns.values().copied().collect();
    }

    /// Keeps only the targets accepted by `keep`, visited in ascending attacker order.
    pub fn retain_targets(&mut self, mut keep: impl FnMut(AttackerId, DefenderId) -> bool) {
        self.targets
            .retain(|attacker, defender| keep(*attacker, *defender));
    }
}
