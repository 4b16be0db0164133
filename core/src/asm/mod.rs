//! Assembler for the line-oriented mnemonic format.

mod args;
mod embed;
mod error;
mod families;
mod meta;
mod parser;

use serde::Serialize;

use crate::vm::Program;

pub use args::{int_arg, str_arg};
pub use embed::{MAGIC, embed_payload, load_embedded, read_payload};
pub use error::AsmError;
pub use families::{
    ArithParser, ControlParser, DataParser, LogicParser, MnemonicParser, Parsed, StringParser, default_parsers,
};
pub use meta::{Metadata, ParamKind, Parameter, memory_presets, parse_preset};
pub use parser::{parse_assembly, parse_assembly_file, parse_default, parse_str};

#[derive(Serialize)]
struct Dump<'a> {
    params: &'a Metadata,
    program: &'a Program,
}

/// Pretty JSON document with the parameters and instructions of an assembled program.
pub fn dump_json(program: &Program, meta: &Metadata) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Dump { params: meta, program })
}
