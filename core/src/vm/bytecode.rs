use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::val::quote;

/// The closed instruction set.
///
/// Each variant carries only the scalar it needs: a label id, a memory
/// address, an integer literal, or a string literal/template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Instruction {
    // Control flow
    Label(i64),
    Jump(i64),
    JumpIfNonZero(i64),
    JumpIfZero(i64),
    Stop,
    // Arithmetic
    Add,
    Subtract,
    Divide,
    Multiply,
    // Comparison
    Equal,
    GreaterThan,
    LessThan,
    // Data movement
    PushInt(i64),
    PushString(String),
    StoreMemory(i64),
    LoadMemory(i64),
    Output(i64),
    // Strings
    ConcatString,
    StringLength,
    FormatString(String),
}

impl Instruction {
    /// Assembly mnemonic of this instruction kind.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Label(_) => "lab",
            Instruction::Jump(_) => "jmp",
            Instruction::JumpIfNonZero(_) => "jnz",
            Instruction::JumpIfZero(_) => "jez",
            Instruction::Stop => "stop",
            Instruction::Add => "add",
            Instruction::Subtract => "min",
            Instruction::Divide => "div",
            Instruction::Multiply => "mul",
            Instruction::Equal => "eql",
            Instruction::GreaterThan => "gtt",
            Instruction::LessThan => "ltt",
            Instruction::PushInt(_) => "psh",
            Instruction::PushString(_) => "str",
            Instruction::StoreMemory(_) => "stm",
            Instruction::LoadMemory(_) => "ldm",
            Instruction::Output(_) => "out",
            Instruction::ConcatString => "cat",
            Instruction::StringLength => "len",
            Instruction::FormatString(_) => "fmt",
        }
    }

    #[inline]
    pub fn is_label(&self, id: i64) -> bool {
        matches!(self, Instruction::Label(l) if *l == id)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.mnemonic();
        match self {
            Instruction::Label(n)
            | Instruction::Jump(n)
            | Instruction::JumpIfNonZero(n)
            | Instruction::JumpIfZero(n)
            | Instruction::PushInt(n)
            | Instruction::StoreMemory(n)
            | Instruction::LoadMemory(n)
            | Instruction::Output(n) => write!(f, "{name} {n}"),
            Instruction::PushString(s) | Instruction::FormatString(s) => write!(f, "{name} {}", quote(s)),
            _ => f.write_str(name),
        }
    }
}

/// Ordered instruction sequence. Positions are the jump-addressable unit;
/// execution never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    code: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    #[inline]
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.code.get(pc)
    }

    pub fn push(&mut self, inst: Instruction) {
        self.code.push(inst);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.code.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.code
    }

    /// Index of the first `lab id` in program order.
    pub fn find_label(&self, id: i64) -> Option<usize> {
        self.code.iter().position(|inst| inst.is_label(id))
    }

    /// A new program running `prelude` first, then `self`.
    pub fn with_prelude(&self, prelude: &Program) -> Program {
        let mut code = Vec::with_capacity(prelude.len() + self.len());
        code.extend_from_slice(&prelude.code);
        code.extend_from_slice(&self.code);
        Program { code }
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Instruction {
        &self.code[pc]
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(code: Vec<Instruction>) -> Self {
        Self { code }
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            code: iter.into_iter().collect(),
        }
    }
}

impl Extend<Instruction> for Program {
    fn extend<I: IntoIterator<Item = Instruction>>(&mut self, iter: I) {
        self.code.extend(iter);
    }
}

impl IntoIterator for Program {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.code.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.code.iter()
    }
}

/// One mnemonic per line, suitable for feeding back to the assembler.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    for inst in program {
        out.push_str(&inst.to_string());
        out.push('\n');
    }
    out
}
