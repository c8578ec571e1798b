//! WTFZOMFG source code parser
//!
//! This module transforms source text into an executable instruction list:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Operation binding (tokens → instructions)
//! - [`ast`]: Instruction and operation definitions
//!
//! Both stages are fail-soft: they return their best-effort output together
//! with the [`Diagnostic`](crate::errors::Diagnostic)s they collected.

pub mod ast;
pub mod lexer;
pub mod parse;
