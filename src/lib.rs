//! Y90 radioembolization risk score (Y90RS).
//!
//! The scoring core (`scoring`, `recommendations`) is pure: no I/O and no
//! configuration. `intake`, `config` and `output` make up the terminal front end.

pub mod config;
pub mod intake;
pub mod logging;
pub mod output;
pub mod recommendations;
pub mod scoring;
