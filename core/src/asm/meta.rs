use std::fmt;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    val::Value,
    vm::{Instruction, Memory, Program},
};

use super::{
    AsmError,
    args::{int_arg, str_arg},
};

static PARAM_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*@param\s+([a-zA-Z0-9]+)\s+(-?[0-9]+)\s+(int|string|str)(?:\s+|$)").expect("directive pattern")
});

/// Value kind a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    #[serde(rename = "string")]
    Str,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => f.write_str("int"),
            ParamKind::Str => f.write_str("string"),
        }
    }
}

/// A named value that is written to `address` before the program starts.
///
/// The header supplies the default; callers may override it with [`Parameter::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub address: i64,
    value: Value,
}

impl Parameter {
    pub fn new_int(name: impl Into<String>, address: i64, value: i64) -> Self {
        Self {
            name: name.into(),
            address,
            value: Value::Int(value),
        }
    }

    pub fn new_str(name: impl Into<String>, address: i64, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address,
            value: Value::Str(value.into()),
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self.value {
            Value::Int(_) => ParamKind::Int,
            Value::Str(_) => ParamKind::Str,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the bound value from raw command-line text.
    ///
    /// Integer parameters require a decimal literal; string parameters take
    /// `raw` verbatim. The old value is kept on error.
    pub fn set(&mut self, raw: &str) -> Result<()> {
        self.value = match self.kind() {
            ParamKind::Int => {
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("parameter `{}` expects an integer, got {raw:?}", self.name))?;
                Value::Int(parsed)
            }
            ParamKind::Str => Value::Str(raw.to_string()),
        };
        Ok(())
    }

    /// Instructions that store this parameter's value.
    pub fn store_instructions(&self) -> [Instruction; 2] {
        let push = match &self.value {
            Value::Int(i) => Instruction::PushInt(*i),
            Value::Str(s) => Instruction::PushString(s.clone()),
        };
        [push, Instruction::StoreMemory(self.address)]
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Parameters declared in a program's header, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    pub params: Vec<Parameter>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.name == name)
    }

    /// Set the parameter called `name` from raw text.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        match self.get_mut(name) {
            Some(param) => param.set(raw),
            None => bail!("unknown parameter `{name}`"),
        }
    }

    /// Address-initialisation program: one push and store per parameter.
    pub fn prelude(&self) -> Program {
        self.params.iter().flat_map(Parameter::store_instructions).collect()
    }

    /// Write every parameter straight into `memory`.
    pub fn apply(&self, memory: &mut dyn Memory) {
        for param in &self.params {
            memory.store(param.address, Some(param.value.clone()));
        }
    }
}

/// Parse a `@param` directive from the body of a header comment.
///
/// Comments that are not directives yield `Ok(None)`.
pub(super) fn parse_directive(comment: &str, line: usize) -> Result<Option<Parameter>, AsmError> {
    let Some(caps) = PARAM_DIRECTIVE.captures(comment) else {
        return Ok(None);
    };
    let name = &caps[1];
    let address = caps[2]
        .parse::<i64>()
        .map_err(|_| AsmError::syntax(line, format!("parameter address {} out of range", &caps[2])))?;
    let rest = &comment[caps.get(0).map_or(comment.len(), |m| m.end())..];

    let param = match &caps[3] {
        "int" => match int_arg(rest, line)? {
            Some((value, _)) => Parameter::new_int(name, address, value),
            None => return Err(AsmError::syntax(line, format!("parameter `{name}` expects an int literal"))),
        },
        _ => match str_arg(rest, line)? {
            Some((value, _)) => Parameter::new_str(name, address, value),
            None => return Err(AsmError::syntax(line, format!("parameter `{name}` expects a string literal"))),
        },
    };
    Ok(Some(param))
}

/// Parse a raw `ADDR:INT` memory preset.
pub fn parse_preset(raw: &str) -> Result<(i64, i64)> {
    let Some((addr, value)) = raw.split_once(':') else {
        bail!("memory preset {raw:?} must look like ADDR:VALUE");
    };
    let addr = addr
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid address in memory preset {raw:?}"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid value in memory preset {raw:?}"))?;
    Ok((addr, value))
}

/// Prelude storing each `ADDR:INT` preset, in the order given.
pub fn memory_presets<I, S>(raw: I) -> Result<Program>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut program = Program::new();
    for item in raw {
        let (addr, value) = parse_preset(item.as_ref())?;
        program.push(Instruction::PushInt(value));
        program.push(Instruction::StoreMemory(addr));
    }
    Ok(program)
}
