//! Stack virtual machine and mnemonic assembler.
//!
//! `vm` holds the value stack, memory, instruction set and the runner that
//! drives them; `asm` turns line-oriented assembly text into a [`vm::Program`]
//! plus the [`asm::Metadata`] declared in its header.

pub mod asm;
pub mod val;
pub mod vm;

pub use asm::{AsmError, Metadata, Parameter, parse_assembly, parse_default, parse_str};
pub use val::{Slot, Value};
pub use vm::{Instruction, MapMemory, Memory, Program, Vm, VmConfig, VmError, run_program};
