#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Engine protocol adapter for the Rampart client.
//!
//! The [`Driver`] reads the preamble, answers a synthetic pre-turn, and then
//! answers every engine turn by clearing its session, handing the snapshot to
//! a [`Strategy`](rampart_world::Strategy) and writing the recorded decisions
//! back in protocol order.

pub mod codec;
mod driver;
mod reader;
mod summary;

pub use driver::{Driver, DriverError, DriverOptions, Phase};
pub use reader::TokenReader;
pub use summary::{MatchSummary, SpawnRecord, TargetRecord, TurnRecord};
