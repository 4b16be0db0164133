use once_cell::sync::Lazy;
use regex::Regex;

use crate::val::unquote;

use super::AsmError;

static OP_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([a-zA-Z]+)").expect("opcode pattern"));
static INT_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(-?[0-9]+)").expect("int pattern"));
static STR_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*"([^"\\]*(?:\\.[^"\\]*)*)""#).expect("string pattern"));

/// Lower-cased mnemonic at the start of `line` and the byte length consumed.
pub(super) fn op_name(line: &str) -> Option<(String, usize)> {
    let caps = OP_NAME.captures(line)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str().to_ascii_lowercase();
    Some((name, whole.end()))
}

/// Leading integer literal of `rest`. `Ok(None)` means there is none.
pub fn int_arg(rest: &str, line: usize) -> Result<Option<(i64, usize)>, AsmError> {
    let Some(caps) = INT_ARG.captures(rest) else {
        return Ok(None);
    };
    let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };
    let value = digits
        .as_str()
        .parse::<i64>()
        .map_err(|_| AsmError::syntax(line, format!("integer literal {} out of range", digits.as_str())))?;
    Ok(Some((value, whole.end())))
}

/// Leading double-quoted string literal of `rest`, escapes decoded.
pub fn str_arg(rest: &str, line: usize) -> Result<Option<(String, usize)>, AsmError> {
    let Some(caps) = STR_ARG.captures(rest) else {
        return Ok(None);
    };
    let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };
    let value = unquote(body.as_str()).map_err(|reason| AsmError::syntax(line, reason))?;
    Ok(Some((value, whole.end())))
}

/// Everything after an instruction must be blank or a `;` comment.
pub(super) fn expect_end(tail: &str, line: usize) -> Result<(), AsmError> {
    let tail = tail.trim_start();
    if tail.is_empty() || tail.starts_with(';') {
        Ok(())
    } else {
        Err(AsmError::syntax(line, format!("unexpected trailing input `{tail}`")))
    }
}
