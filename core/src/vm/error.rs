use std::fmt;

use crate::val::{Slot, slot_type_name};

/// Failure raised while executing an instruction. Any of these aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Pop, peek or drain on an empty stack.
    StackUnderflow,
    /// Operand of the wrong kind for the instruction.
    TypeMismatch { expected: &'static str, found: &'static str },
    DivisionByZero,
    /// Jump target with no matching `lab` in the program.
    UnresolvedLabel(i64),
    /// `fmt` template with a placeholder the formatter does not understand.
    InvalidFormat { template: String, reason: String },
    /// The configured dispatch budget ran out.
    StepLimitExceeded(u64),
}

impl VmError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &Slot) -> Self {
        VmError::TypeMismatch {
            expected,
            found: slot_type_name(found),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VmError::StackUnderflow => "E-VM-STACK-UNDERFLOW",
            VmError::TypeMismatch { .. } => "E-VM-TYPE",
            VmError::DivisionByZero => "E-VM-DIV-ZERO",
            VmError::UnresolvedLabel(_) => "E-VM-LABEL",
            VmError::InvalidFormat { .. } => "E-VM-FORMAT",
            VmError::StepLimitExceeded(_) => "E-VM-STEP-LIMIT",
        }
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::StackUnderflow => write!(f, "stack underflow"),
            VmError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected} from stack, got {found}")
            }
            VmError::DivisionByZero => write!(f, "division by zero"),
            VmError::UnresolvedLabel(label) => write!(f, "jump label not found: {label}"),
            VmError::InvalidFormat { template, reason } => {
                write!(f, "invalid format template \"{template}\": {reason}")
            }
            VmError::StepLimitExceeded(limit) => write!(f, "step limit of {limit} instructions exceeded"),
        }
    }
}

impl std::error::Error for VmError {}
