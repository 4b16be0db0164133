//! printf-style rendering for the `fmt` instruction.
//!
//! Placeholders are `%[-0][width]verb` with verbs `d` (int), `x`/`X` (int in
//! hex), `s` (string), `q` (quoted string) and `v` (any value, including
//! undefined). `%%` is a literal percent sign.

use crate::val::{Slot, Value, quote, render_slot, slot_type_name};
use crate::vm::VmError;

/// Number of arguments a template consumes: every `%` that is not part of a
/// `%%` escape.
pub(super) fn count_placeholders(template: &str) -> usize {
    template.matches('%').count() - 2 * template.matches("%%").count()
}

#[derive(Default)]
struct Spec {
    left: bool,
    zero: bool,
    width: usize,
}

pub(super) fn render(template: &str, args: &[Slot]) -> Result<String, VmError> {
    let invalid = |reason: String| VmError::InvalidFormat {
        template: template.to_string(),
        reason,
    };

    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '0' => spec.zero = true,
                _ => break,
            }
            chars.next();
        }
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            spec.width = spec.width * 10 + digit as usize;
            chars.next();
        }

        let verb = chars.next().ok_or_else(|| invalid("placeholder without verb".to_string()))?;
        let arg = args
            .next()
            .ok_or_else(|| invalid(format!("missing argument for %{verb}")))?;
        let text = match verb {
            'd' => int_arg(arg)?.to_string(),
            'x' => format!("{:x}", int_arg(arg)?),
            'X' => format!("{:X}", int_arg(arg)?),
            's' => str_arg(arg)?.to_string(),
            'q' => quote(str_arg(arg)?),
            'v' => render_slot(arg),
            other => return Err(invalid(format!("unknown verb %{other}"))),
        };
        pad_into(&mut out, &text, &spec, matches!(verb, 'd' | 'x' | 'X'));
    }

    Ok(out)
}

fn int_arg(arg: &Slot) -> Result<i64, VmError> {
    match arg {
        Some(Value::Int(i)) => Ok(*i),
        _ => Err(VmError::TypeMismatch {
            expected: "int",
            found: slot_type_name(arg),
        }),
    }
}

fn str_arg(arg: &Slot) -> Result<&str, VmError> {
    match arg {
        Some(Value::Str(s)) => Ok(s),
        _ => Err(VmError::TypeMismatch {
            expected: "string",
            found: slot_type_name(arg),
        }),
    }
}

fn pad_into(out: &mut String, text: &str, spec: &Spec, numeric: bool) {
    let len = text.chars().count();
    if len >= spec.width {
        out.push_str(text);
        return;
    }
    let fill = spec.width - len;
    if spec.left {
        out.push_str(text);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero && numeric {
        // Zeros go between the sign and the digits.
        let (sign, digits) = text.strip_prefix('-').map_or(("", text), |rest| ("-", rest));
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(text);
    }
}
