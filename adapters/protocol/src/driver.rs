//! Turn loop that keeps the client in lockstep with the engine.

use std::io::{self, BufRead, Write};

use rampart_core::{ProtocolFormatError, Session, TurnState, UnknownTypeError};
use rampart_world::{audit, MatchConfig, Strategy};

use crate::{codec, reader::TokenReader, summary::MatchSummary};

/// Position of the driver in the match lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been read yet.
    Uninitialized,
    /// The preamble was read and the match configuration built.
    Initialized,
    /// A turn snapshot is pending a decision.
    ProcessingTurn,
    /// The decisions for the last turn were written.
    Emitted,
    /// Waiting for the next turn snapshot.
    AwaitingTurn,
    /// Every announced turn was answered.
    Terminal,
}

/// Fatal failures that end the match.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The engine stream was malformed or ended early.
    #[error("malformed engine input")]
    Format(#[from] ProtocolFormatError),
    /// The engine referenced a unit type it never announced.
    #[error("engine referenced an unannounced unit type")]
    UnknownType(#[from] UnknownTypeError),
    /// Decisions could not be written to the engine.
    #[error("failed to write decisions to the engine")]
    Emit(#[source] io::Error),
    /// A turn was processed without a configuration or snapshot in place.
    #[error("driver cannot process a turn while {0:?}")]
    OutOfOrder(Phase),
}

/// Behaviour switches for the driver.
#[derive(Clone, Copy, Debug)]
pub struct DriverOptions {
    /// Drop decisions the engine would reject before writing them.
    pub validate: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Protocol driver reading from `R`, answering on `O`, and logging to `D`.
#[derive(Debug)]
pub struct Driver<R, O, D, S> {
    input: TokenReader<R>,
    output: O,
    diagnostics: D,
    strategy: S,
    options: DriverOptions,
    phase: Phase,
    config: Option<MatchConfig>,
    pending: Option<TurnState>,
    last_turn: u32,
    turns_read: u32,
    session: Session,
    summary: MatchSummary,
}

impl<R, O, D, S> Driver<R, O, D, S>
where
    R: BufRead,
    O: Write,
    D: Write,
    S: Strategy,
{
    /// Creates a driver that has not read anything yet.
    pub fn new(input: R, output: O, diagnostics: D, strategy: S, options: DriverOptions) -> Self {
        Self {
            input: TokenReader::new(input),
            output,
            diagnostics,
            strategy,
            options,
            phase: Phase::Uninitialized,
            config: None,
            pending: None,
            last_turn: 0,
            turns_read: 0,
            session: Session::new(),
            summary: MatchSummary::default(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Match configuration, once the preamble has been read.
    #[must_use]
    pub const fn config(&self) -> Option<&MatchConfig> {
        self.config.as_ref()
    }

    /// Decisions emitted so far.
    #[must_use]
    pub const fn summary(&self) -> &MatchSummary {
        &self.summary
    }

    /// Drives the match until every announced turn has been answered.
    pub fn run(&mut self) -> Result<MatchSummary, DriverError> {
        while self.step()? != Phase::Terminal {}
        Ok(self.summary.clone())
    }

    /// Performs a single lifecycle transition and returns the new phase.
    pub fn step(&mut self) -> Result<Phase, DriverError> {
        self.phase = match self.phase {
            Phase::Uninitialized => {
                let config = codec::read_preamble(&mut self.input)?;
                log::info!(
                    "match initialised: {} turns, {} coins, {} attacker types, {} defender types, {} defenders",
                    config.turn_count(),
                    config.coin_cap(),
                    config.attackers().len(),
                    config.defenders().len(),
                    config.initial_defenders().len()
                );
                self.config = Some(config);
                Phase::Initialized
            }
            Phase::Initialized => {
                let config = self.config.as_ref().ok_or(DriverError::OutOfOrder(self.phase))?;
                self.pending = Some(config.pre_turn());
                Phase::ProcessingTurn
            }
            Phase::ProcessingTurn => {
                self.process_turn()?;
                Phase::Emitted
            }
            Phase::Emitted => Phase::AwaitingTurn,
            Phase::AwaitingTurn => {
                let config = self.config.as_ref().ok_or(DriverError::OutOfOrder(self.phase))?;
                if self.turns_read >= config.turn_count() {
                    log::info!("all {} turns answered", self.turns_read);
                    Phase::Terminal
                } else {
                    let turn = codec::parse_turn(&mut self.input, self.last_turn)?;
                    log::debug!(
                        "turn {}: {} attackers, {} defenders, {} coins",
                        turn.turn(),
                        turn.attackers().len(),
                        turn.defenders().len(),
                        turn.coins_left()
                    );
                    self.turns_read += 1;
                    self.pending = Some(turn);
                    Phase::ProcessingTurn
                }
            }
            Phase::Terminal => Phase::Terminal,
        };
        Ok(self.phase)
    }

    fn process_turn(&mut self) -> Result<(), DriverError> {
        let (Some(config), Some(turn)) = (self.config.as_ref(), self.pending.take()) else {
            return Err(DriverError::OutOfOrder(self.phase));
        };

        self.session.clear();
        self.strategy.decide(config, &turn, &mut self.session);

        let mut dropped = 0;
        if self.options.validate {
            for violation in audit(config, &turn, &mut self.session) {
                log::warn!("turn {}: dropped decision: {violation}", turn.turn());
                self.session.log(format!("dropped: {violation}"));
                dropped += 1;
            }
        }

        codec::write_decisions(&mut self.output, &self.session).map_err(DriverError::Emit)?;
        if let Err(error) = codec::write_diagnostics(&mut self.diagnostics, turn.turn(), &self.session) {
            log::warn!("turn {}: diagnostic log not written: {error}", turn.turn());
        }
        log::debug!(
            "turn {}: sent {} spawns and {} targets",
            turn.turn(),
            self.session.spawns().len(),
            self.session.targets().len()
        );

        self.summary.record(&turn, &self.session, dropped);
        self.last_turn = turn.turn();
        Ok(())
    }
}
