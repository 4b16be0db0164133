use crate::val::{Slot, Value};
use crate::vm::{Stack, VmError};

use super::format::{count_placeholders, render};
use super::helpers::pop_strs;

/// Joins in pop order: `str a; str b; cat` pushes `b + a`.
pub(super) fn concat(stack: &mut Stack<Slot>) -> Result<(), VmError> {
    let [mut first, second] = pop_strs::<2>(stack)?;
    first.push_str(&second);
    stack.push(Some(Value::Str(first)));
    Ok(())
}

/// Length in UTF-8 bytes.
pub(super) fn length(stack: &mut Stack<Slot>) -> Result<(), VmError> {
    let [s] = pop_strs::<1>(stack)?;
    let len = i64::try_from(s.len()).unwrap_or(i64::MAX);
    stack.push(Some(Value::Int(len)));
    Ok(())
}

/// Drain one value per placeholder (first pop fills the first placeholder)
/// and push the rendered template.
pub(super) fn format(stack: &mut Stack<Slot>, template: &str) -> Result<(), VmError> {
    let argc = count_placeholders(template);
    let mut args = Vec::with_capacity(argc);
    if argc > 0 {
        stack.drain(|ordinal, item| {
            args.push(item);
            Ok(ordinal < argc)
        })?;
    }
    let text = render(template, &args)?;
    stack.push(Some(Value::Str(text)));
    Ok(())
}
