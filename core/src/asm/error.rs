use std::{fmt, io};

/// Failure while assembling source text. Any of these aborts the whole parse.
#[derive(Debug)]
pub enum AsmError {
    /// No parser in the chain claimed the mnemonic.
    UnknownOpcode { name: String, line: usize },
    /// Malformed argument, directive or trailing input.
    Syntax { message: String, line: usize },
    Io(io::Error),
}

impl AsmError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        AsmError::Syntax {
            message: message.into(),
            line,
        }
    }

    /// 1-based source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AsmError::UnknownOpcode { line, .. } | AsmError::Syntax { line, .. } => Some(*line),
            AsmError::Io(_) => None,
        }
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::UnknownOpcode { name, line } => write!(f, "unknown opcode `{name}` on line {line}"),
            AsmError::Syntax { message, line } => write!(f, "syntax error on line {line}: {message}"),
            AsmError::Io(err) => write!(f, "failed to read assembly: {err}"),
        }
    }
}

impl std::error::Error for AsmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AsmError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AsmError {
    fn from(err: io::Error) -> Self {
        AsmError::Io(err)
    }
}
