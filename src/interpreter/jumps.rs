//! Label declaration and goto handling (`;` `:` `?` `!`)

use crate::interpreter::constants::ANONYMOUS_LABEL;
use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::loops::skip_to_end;
use crate::parser::ast::{Instruction, Operation};
use crate::terminal::Console;
use rustc_hash::FxHashMap;

/// Map every declared label to the index of its declaration.
///
/// A name declared twice resolves to the later declaration.
pub(crate) fn collect_labels(instructions: &[Instruction]) -> FxHashMap<String, usize> {
    instructions
        .iter()
        .enumerate()
        .filter(|(_, instruction)| instruction.operation == Operation::LabelDeclare)
        .map(|(index, instruction)| {
            let name = instruction.argument().unwrap_or(ANONYMOUS_LABEL);
            (name.to_string(), index)
        })
        .collect()
}

impl<C: Console> Interpreter<C> {
    /// Jump to just after the label's declaration when `condition` holds.
    /// An unknown label falls through to the next instruction.
    pub(crate) fn execute_goto(&mut self, index: usize, condition: bool) -> ControlFlow {
        if !condition {
            return ControlFlow::Next;
        }

        let name = self.instructions[index]
            .argument()
            .unwrap_or(ANONYMOUS_LABEL);
        let Some(&declaration) = self.state.goto_labels.get(name) else {
            return ControlFlow::Next;
        };

        let target = declaration + 1;
        self.close_frames_outside(target);
        ControlFlow::Jump(target)
    }

    /// Pop the frames of loops that do not contain `target`.
    ///
    /// Keeps the frame stack as deep as the loops around the landing point,
    /// however often a goto leaves a loop body.
    fn close_frames_outside(&mut self, target: usize) {
        while let Some(&start) = self.loop_frames.last() {
            let end = skip_to_end(
                &self.instructions,
                start + 1,
                Operation::LoopStart,
                Operation::LoopEnd,
            );
            if start < target && target < end {
                break;
            }
            self.loop_frames.pop();
        }
    }
}
