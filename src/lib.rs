//! # Introduction
//!
//! An interpreter for WTFZOMFG, a small esoteric language of one-character
//! instructions working on a fixed array of cells through a movable pointer.
//! A run can record a snapshot before every instruction, and the history is
//! then browsed forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Instructions → Interpreter → ProgramState
//! ```
//!
//! 1. [`parser`]: tokenises the source and binds each token to an operation.
//! 2. [`interpreter`]: resolves labels, runs the instructions and records
//!    [`snapshot::Snapshot`]s on request.
//! 3. [`memory`]: the cell array: tagged [`memory::value::Cell`] values.
//! 4. [`terminal`]: the [`terminal::Console`] seam for printing, reading and
//!    the "continue after errors?" prompt.
//! 5. [`pipeline`]: runs the three stages and collects their diagnostics.
//! 6. [`ui`]: ratatui-based inspector; not part of the stable library API.
//!
//! Every stage is fail-soft: problems become [`errors::Diagnostic`]s and the
//! stage carries on with its best-effort next step.
//!
//! ## Example
//!
//! ```
//! use wtfzomfg::pipeline::interpret;
//! use wtfzomfg::terminal::MockTerminal;
//!
//! let mut terminal = MockTerminal::new();
//! let result = interpret("+++ \\", 1, false, &mut terminal);
//! assert_eq!(terminal.output(), "3");
//! assert!(result.state.errors.is_empty());
//! ```

pub mod errors;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod pipeline;
pub mod snapshot;
pub mod terminal;
pub mod ui;
