pub mod arithmetic;
pub mod cell;
pub mod io;
pub mod pointer;

// Operations are `impl ProgramState` methods; the engine dispatches to them
pub use arithmetic::ArithmeticOp;
