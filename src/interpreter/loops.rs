//! Loop and if execution (`(` `)` `{` `}`).
//!
//! Adds `impl Interpreter` methods for the bracketed control operations.
//! Loops use an explicit frame stack instead of recursion: entering a loop
//! pushes the index of its `LoopStart`, the matching `LoopEnd` jumps back to
//! it so the condition is checked again, and the frame is popped when that
//! check fails.
//!
//! Nothing is matched ahead of time. A false condition scans forward,
//! counting nested markers, and stops at the end of the program if the
//! brackets never balance.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::parser::ast::{Instruction, Operation};
use crate::terminal::Console;

/// Index just past the marker closing the one opened before `start`.
///
/// Scans from `start` with depth 1, counting `open` and `close` operations.
/// Returns `instructions.len()` when the markers never balance.
pub(crate) fn skip_to_end(
    instructions: &[Instruction],
    start: usize,
    open: Operation,
    close: Operation,
) -> usize {
    let mut depth = 1usize;
    for (index, instruction) in instructions.iter().enumerate().skip(start) {
        if instruction.operation == open {
            depth += 1;
        } else if instruction.operation == close {
            depth -= 1;
            if depth == 0 {
                return index + 1;
            }
        }
    }
    instructions.len()
}

impl<C: Console> Interpreter<C> {
    pub(crate) fn execute_if_start(&mut self, index: usize) -> ControlFlow {
        if self.state.current_is_nonzero() {
            return ControlFlow::Next;
        }
        let target = skip_to_end(&self.instructions, index + 1, Operation::IfStart, Operation::IfEnd);
        ControlFlow::Jump(target)
    }

    /// Enter the loop body or skip past the matching `LoopEnd`.
    ///
    /// Re-entering through the frame already on top (from its own `LoopEnd`,
    /// or a goto back to the loop) does not push a second frame.
    pub(crate) fn execute_loop_start(&mut self, index: usize) -> ControlFlow {
        if self.state.current_is_nonzero() {
            if self.loop_frames.last() != Some(&index) {
                self.loop_frames.push(index);
            }
            return ControlFlow::Next;
        }

        if self.loop_frames.last() == Some(&index) {
            self.loop_frames.pop();
        }
        let target = skip_to_end(
            &self.instructions,
            index + 1,
            Operation::LoopStart,
            Operation::LoopEnd,
        );
        ControlFlow::Jump(target)
    }

    /// Return to the innermost open loop; with none open the run is over
    pub(crate) fn execute_loop_end(&mut self) -> ControlFlow {
        match self.loop_frames.last() {
            Some(&start) => ControlFlow::Jump(start),
            None => ControlFlow::Halt,
        }
    }
}
