//! WTFZOMFG execution engine
//!
//! This module provides the runtime:
//! - [`engine`]: Main interpreter with the dispatch loop
//! - [`state`]: The mutable program state threaded through a run
//! - [`ops`]: Cell, pointer, arithmetic and I/O operations
//! - [`loops`], [`jumps`]: Bracket skipping, loop frames and label gotos
//!
//! # Execution Model
//!
//! Labels are collected in a pre-pass. The interpreter then walks the
//! instruction list with an explicit program counter, one instruction per
//! step, until it runs past the end or an unmatched `)` halts it. Runtime
//! problems are recorded on the state and never stop the run.

pub mod constants;
pub mod engine;
pub mod jumps;
pub mod loops;
pub mod ops;
pub mod state;
