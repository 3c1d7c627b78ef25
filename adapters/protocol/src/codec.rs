//! Wire format of the engine protocol.
//!
//! Input is a stream of whitespace-separated integers. The preamble is
//!
//! ```text
//! turnCount coinCap
//! attackerTypeCount [hp range attackPower speed price]*
//! defenderTypeCount [hp range attackPower speed price]*
//! rows cols [typeCode]*(rows*cols)
//! ```
//!
//! and every turn is
//!
//! ```text
//! attackerCount [id hp type x y]* defenderCount [id hp type x y]* coinsLeft
//! ```
//!
//! Each turn is answered with the spawn block and the target block on the
//! primary channel, and a `TURN`/`ENDLOG` framed log on the diagnostic channel.

use std::io::{self, BufRead, Write};

use rampart_core::{
    Attacker, AttackerId, Attributes, Defender, DefenderId, MapDimensions, Position,
    ProtocolFormatError, Role, Session, TurnState, TypeCode,
};
use rampart_world::{AttributeCatalog, MatchConfig, WorldMap};

use crate::{reader::TokenReader, DriverError};

/// Reads the preamble and assembles the match configuration.
pub fn read_preamble<R: BufRead>(reader: &mut TokenReader<R>) -> Result<MatchConfig, DriverError> {
    let turn_count = reader.read_u32("turn count")?;
    let coin_cap = reader.read_u32("coin cap")?;

    let attacker_types = reader.read_count("attacker type count")?;
    let attackers = read_catalog(reader, Role::Attacker, attacker_types)?;
    let defender_types = reader.read_count("defender type count")?;
    let defenders = read_catalog(reader, Role::Defender, defender_types)?;

    let map = read_map(reader)?;
    Ok(MatchConfig::new(turn_count, coin_cap, attackers, defenders, map)?)
}

/// Reads `count` attribute records, assigning type codes from 1.
pub fn read_catalog<R: BufRead>(
    reader: &mut TokenReader<R>,
    role: Role,
    count: usize,
) -> Result<AttributeCatalog, ProtocolFormatError> {
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(read_attributes(reader)?);
    }
    Ok(AttributeCatalog::from_records(role, records))
}

fn read_attributes<R: BufRead>(
    reader: &mut TokenReader<R>,
) -> Result<Attributes, ProtocolFormatError> {
    let hp = reader.read_u32("type hp")?;
    let range = reader.read_u32("type range")?;
    let attack_power = reader.read_u32("type attack power")?;
    let speed = reader.read_u32("type speed")?;
    let price = reader.read_u32("type price")?;
    Ok(Attributes::new(hp, range, attack_power, speed, price))
}

/// Reads the map dimensions followed by its cells, one row after another.
pub fn read_map<R: BufRead>(reader: &mut TokenReader<R>) -> Result<WorldMap, ProtocolFormatError> {
    let rows = reader.read_u32("map rows")?;
    let columns = reader.read_u32("map columns")?;
    let dimensions = MapDimensions::new(rows, columns);

    let mut cells = Vec::new();
    for _ in 0..dimensions.cell_count() {
        cells.push(TypeCode::new(reader.read_u32("map cell")?));
    }
    WorldMap::new(dimensions, cells)
}

/// Reads the snapshot of the turn following `previous_turn`.
///
/// Identifiers and type codes are taken as sent; only the shape is checked.
pub fn parse_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
    previous_turn: u32,
) -> Result<TurnState, ProtocolFormatError> {
    let attacker_count = reader.read_count("attacker count")?;
    let mut attackers = Vec::new();
    for _ in 0..attacker_count {
        let id = AttackerId::new(reader.read_u32("attacker id")?);
        let hp = reader.read_u32("attacker hp")?;
        let kind = TypeCode::new(reader.read_u32("attacker type")?);
        let position = read_position(reader, "attacker x", "attacker y")?;
        attackers.push(Attacker {
            id,
            hp,
            kind,
            position,
        });
    }

    let defender_count = reader.read_count("defender count")?;
    let mut defenders = Vec::new();
    for _ in 0..defender_count {
        let id = DefenderId::new(reader.read_u32("defender id")?);
        let hp = reader.read_u32("defender hp")?;
        let kind = TypeCode::new(reader.read_u32("defender type")?);
        let position = read_position(reader, "defender x", "defender y")?;
        defenders.push(Defender {
            id,
            hp,
            kind,
            position,
        });
    }

    let coins_left = reader.read_u32("coins left")?;
    Ok(TurnState::new(
        attackers,
        defenders,
        coins_left,
        previous_turn.saturating_add(1),
    ))
}

fn read_position<R: BufRead>(
    reader: &mut TokenReader<R>,
    x_field: &'static str,
    y_field: &'static str,
) -> Result<Position, ProtocolFormatError> {
    let x = reader.read_i32(x_field)?;
    let y = reader.read_i32(y_field)?;
    Ok(Position::new(x, y))
}

/// Writes the spawn block and the target block, then flushes.
pub fn write_decisions<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    let spawns = session.spawns();
    writeln!(out, "{}", spawns.len())?;
    for (id, position) in spawns {
        writeln!(out, "{} {} {}", id, position.x(), position.y())?;
    }

    let targets = session.targets();
    writeln!(out, "{}", targets.len())?;
    for (attacker, defender) in targets {
        writeln!(out, "{attacker} {defender}")?;
    }
    out.flush()
}

/// Writes the framed session log for `turn`, then flushes.
pub fn write_diagnostics<W: Write>(out: &mut W, turn: u32, session: &Session) -> io::Result<()> {
    writeln!(out, "TURN {turn}")?;
    writeln!(out, "{}", session.log_contents())?;
    writeln!(out, "ENDLOG")?;
    out.flush()
}
