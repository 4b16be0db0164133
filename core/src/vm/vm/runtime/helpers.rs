use crate::val::{Slot, Value};
use crate::vm::{Stack, VmError};

#[inline]
pub(super) fn expect_int(slot: Slot) -> Result<i64, VmError> {
    match slot {
        Some(Value::Int(i)) => Ok(i),
        other => Err(VmError::type_mismatch("int", &other)),
    }
}

#[inline]
pub(super) fn expect_str(slot: Slot) -> Result<String, VmError> {
    match slot {
        Some(Value::Str(s)) => Ok(s),
        other => Err(VmError::type_mismatch("string", &other)),
    }
}

/// Pop `N` integers; index 0 holds the first (topmost) value popped.
///
/// Values popped before a failure stay off the stack.
pub(super) fn pop_ints<const N: usize>(stack: &mut Stack<Slot>) -> Result<[i64; N], VmError> {
    let mut values = [0i64; N];
    if N == 0 {
        return Ok(values);
    }
    stack.drain(|ordinal, item| {
        values[ordinal - 1] = expect_int(item)?;
        Ok(ordinal < N)
    })?;
    Ok(values)
}

/// String counterpart of [`pop_ints`].
pub(super) fn pop_strs<const N: usize>(stack: &mut Stack<Slot>) -> Result<[String; N], VmError> {
    let mut values: [String; N] = std::array::from_fn(|_| String::new());
    if N == 0 {
        return Ok(values);
    }
    stack.drain(|ordinal, item| {
        values[ordinal - 1] = expect_str(item)?;
        Ok(ordinal < N)
    })?;
    Ok(values)
}

#[inline]
pub(super) fn int_to_bool(value: i64) -> bool {
    value != 0
}
