use crate::val::{Slot, Value};
use crate::vm::{Stack, VmError};

use super::helpers::pop_ints;

/// Pop the right operand, then the left one, and push `op(left, right)`.
///
/// For `psh a; psh b; <op>` this computes `op(a, b)`.
#[inline]
pub(super) fn int_binop<F>(stack: &mut Stack<Slot>, op: F) -> Result<(), VmError>
where
    F: FnOnce(i64, i64) -> Result<i64, VmError>,
{
    let [right, left] = pop_ints::<2>(stack)?;
    let result = op(left, right)?;
    stack.push(Some(Value::Int(result)));
    Ok(())
}

/// Value-and-type equality; never a type error.
pub(super) fn equal(stack: &mut Stack<Slot>) -> Result<(), VmError> {
    let right = stack.pop()?;
    let left = stack.pop()?;
    stack.push(Some(Value::from(left == right)));
    Ok(())
}
