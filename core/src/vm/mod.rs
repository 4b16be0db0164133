//! Stack virtual machine subsystem
//!
//! Instruction definitions, the value stack and memory model, and the runner
//! that dispatches a [`Program`] against them.

mod bytecode;
mod config;
mod error;
mod memory;
mod sink;
mod stack;
#[allow(clippy::module_inception)]
mod vm;

pub use bytecode::*;
pub use config::VmConfig;
pub use error::VmError;
pub use memory::{MapMemory, Memory};
pub use sink::{BufferSink, OutputSink, StdoutSink};
pub use stack::Stack;
pub use vm::*;

#[cfg(test)]
mod vm_test;
