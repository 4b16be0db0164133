//! Per-family mnemonic parsers.
//!
//! The assembler tries each parser of its chain in order; the first one that
//! claims a mnemonic decides the outcome for that line.

use crate::vm::Instruction;

use super::{
    AsmError,
    args::{int_arg, str_arg},
};

/// An instruction recognised by a [`MnemonicParser`] together with the number
/// of bytes of the argument text it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub instruction: Instruction,
    pub consumed: usize,
}

/// One link of the parser chain.
///
/// `name` is the lower-cased mnemonic and `rest` the text following it on the
/// line. Returning `Ok(None)` passes the mnemonic on to the next parser; an
/// error means the mnemonic was claimed but its arguments are malformed.
pub trait MnemonicParser {
    /// Short label used in trace output.
    fn family(&self) -> &'static str;

    fn parse(&self, name: &str, rest: &str, line: usize) -> Result<Option<Parsed>, AsmError>;
}

fn bare(instruction: Instruction) -> Result<Option<Parsed>, AsmError> {
    Ok(Some(Parsed {
        instruction,
        consumed: 0,
    }))
}

fn with_int(name: &str, rest: &str, line: usize, build: fn(i64) -> Instruction) -> Result<Option<Parsed>, AsmError> {
    match int_arg(rest, line)? {
        Some((value, consumed)) => Ok(Some(Parsed {
            instruction: build(value),
            consumed,
        })),
        None => Err(AsmError::syntax(line, format!("`{name}` expects an integer argument"))),
    }
}

fn with_str(name: &str, rest: &str, line: usize, build: fn(String) -> Instruction) -> Result<Option<Parsed>, AsmError> {
    match str_arg(rest, line)? {
        Some((value, consumed)) => Ok(Some(Parsed {
            instruction: build(value),
            consumed,
        })),
        None => Err(AsmError::syntax(line, format!("`{name}` expects a quoted string argument"))),
    }
}

/// `lab`, `jmp`, `jnz`, `jez`, `stop`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlParser;

impl MnemonicParser for ControlParser {
    fn family(&self) -> &'static str {
        "control"
    }

    fn parse(&self, name: &str, rest: &str, line: usize) -> Result<Option<Parsed>, AsmError> {
        match name {
            "lab" => with_int(name, rest, line, Instruction::Label),
            "jmp" => with_int(name, rest, line, Instruction::Jump),
            "jnz" => with_int(name, rest, line, Instruction::JumpIfNonZero),
            "jez" => with_int(name, rest, line, Instruction::JumpIfZero),
            "stop" => bare(Instruction::Stop),
            _ => Ok(None),
        }
    }
}

/// `add`, `min`, `div`, `mul`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithParser;

impl MnemonicParser for ArithParser {
    fn family(&self) -> &'static str {
        "arith"
    }

    fn parse(&self, name: &str, _rest: &str, _line: usize) -> Result<Option<Parsed>, AsmError> {
        match name {
            "add" => bare(Instruction::Add),
            "min" => bare(Instruction::Subtract),
            "div" => bare(Instruction::Divide),
            "mul" => bare(Instruction::Multiply),
            _ => Ok(None),
        }
    }
}

/// `eql`, `gtt`, `ltt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogicParser;

impl MnemonicParser for LogicParser {
    fn family(&self) -> &'static str {
        "logic"
    }

    fn parse(&self, name: &str, _rest: &str, _line: usize) -> Result<Option<Parsed>, AsmError> {
        match name {
            "eql" => bare(Instruction::Equal),
            "gtt" => bare(Instruction::GreaterThan),
            "ltt" => bare(Instruction::LessThan),
            _ => Ok(None),
        }
    }
}

/// `psh`, `str`, `stm`, `ldm`, `out`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataParser;

impl MnemonicParser for DataParser {
    fn family(&self) -> &'static str {
        "data"
    }

    fn parse(&self, name: &str, rest: &str, line: usize) -> Result<Option<Parsed>, AsmError> {
        match name {
            "psh" => with_int(name, rest, line, Instruction::PushInt),
            "str" => with_str(name, rest, line, Instruction::PushString),
            "stm" => with_int(name, rest, line, Instruction::StoreMemory),
            "ldm" => with_int(name, rest, line, Instruction::LoadMemory),
            "out" => with_int(name, rest, line, Instruction::Output),
            _ => Ok(None),
        }
    }
}

/// `cat`, `len`, `fmt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringParser;

impl MnemonicParser for StringParser {
    fn family(&self) -> &'static str {
        "string"
    }

    fn parse(&self, name: &str, rest: &str, line: usize) -> Result<Option<Parsed>, AsmError> {
        match name {
            "cat" => bare(Instruction::ConcatString),
            "len" => bare(Instruction::StringLength),
            "fmt" => with_str(name, rest, line, Instruction::FormatString),
            _ => Ok(None),
        }
    }
}

/// The standard chain: control, arithmetic, logic, data movement, strings.
pub fn default_parsers() -> Vec<Box<dyn MnemonicParser>> {
    vec![
        Box::new(ControlParser),
        Box::new(ArithParser),
        Box::new(LogicParser),
        Box::new(DataParser),
        Box::new(StringParser),
    ]
}
