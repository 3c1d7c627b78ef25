//! Upstream checks applied to a session before it is sent to the engine.

use std::collections::HashSet;

use rampart_core::{AttackerId, DefenderId, Position, Session, TurnState};

use crate::MatchConfig;

/// Decision dropped from a session because the engine would penalise or ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The spawn cell is not on the map border.
    #[error("spawn of attacker {attacker} at {position} is not on the map border")]
    SpawnOutsideBorder {
        /// Identifier chosen for the new attacker.
        attacker: AttackerId,
        /// Requested spawn cell.
        position: Position,
    },
    /// Another spawn with a lower identifier already uses the cell this turn.
    #[error("spawn of attacker {attacker} at {position} reuses a cell spawned at this turn")]
    SpawnCellTaken {
        /// Identifier chosen for the new attacker.
        attacker: AttackerId,
        /// Requested spawn cell.
        position: Position,
    },
    /// The targeting attacker is not active this turn.
    #[error("target set for attacker {attacker}, which is not active")]
    UnknownAttacker {
        /// Attacker named by the target.
        attacker: AttackerId,
        /// Defender it was directed at.
        defender: DefenderId,
    },
    /// The targeted defender is not standing this turn.
    #[error("attacker {attacker} targets defender {defender}, which is not standing")]
    UnknownDefender {
        /// Attacker named by the target.
        attacker: AttackerId,
        /// Missing defender.
        defender: DefenderId,
    },
}

/// Removes every decision the engine would reject and reports what was removed.
///
/// Spawns are visited in ascending identifier order, so when two spawns share
/// a cell the lower identifier keeps it.
pub fn audit(config: &MatchConfig, turn: &TurnState, session: &mut Session) -> Vec<Violation> {
    let mut violations = Vec::new();
    let rules = config.spawn_rules();

    let mut claimed = HashSet::new();
    session.retain_spawns(|attacker, position| {
        if !rules.is_valid(position) {
            violations.push(Violation::SpawnOutsideBorder { attacker, position });
            return false;
        }
        if !claimed.insert(position) {
            violations.push(Violation::SpawnCellTaken { attacker, position });
            return false;
        }
        true
    });

    session.retain_targets(|attacker, defender| {
        if turn.attacker(attacker).is_none() {
            violations.push(Violation::UnknownAttacker { attacker, defender });
            return false;
        }
        if turn.defender(defender).is_none() {
            violations.push(Violation::UnknownDefender { attacker, defender });
            return false;
        }
        true
    });

    violations
}
