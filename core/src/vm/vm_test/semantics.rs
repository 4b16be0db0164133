use super::*;

fn int(i: i64) -> Slot {
    Some(Value::Int(i))
}

#[test]
fn arithmetic_uses_push_order() {
    // (b pushed first, a on top) computes b <op> a.
    let cases: &[(Instruction, i64, i64, i64)] = &[
        (Instruction::Add, 0, 0, 0),
        (Instruction::Add, 5, 8, 13),
        (Instruction::Add, -5, 15, 10),
        (Instruction::Subtract, 3, 10, 7),
        (Instruction::Subtract, 10, 3, -7),
        (Instruction::Multiply, 4, -20, -80),
        (Instruction::Divide, 2, 7, 3),
        (Instruction::Divide, -2, 7, -3),
        (Instruction::LessThan, 5, 6, 0),
        (Instruction::LessThan, 6, 5, 1),
        (Instruction::LessThan, 0, 0, 0),
        (Instruction::GreaterThan, 5, 6, 1),
        (Instruction::GreaterThan, -20, 4, 1),
        (Instruction::GreaterThan, 8, 8, 0),
    ];
    for (inst, a, b, expected) in cases {
        let mut h = Harness::with_operands(*a, *b);
        h.exec(inst).unwrap_or_else(|e| panic!("{inst} failed: {e}"));
        assert_eq!(h.top(), int(*expected), "{b} {inst} {a}");
        assert_eq!(h.stack.len(), 1);
    }
}

#[test]
fn arithmetic_rejects_strings() {
    for inst in [Instruction::Add, Instruction::Divide, Instruction::LessThan] {
        let mut h = Harness::with_operands(5i64, "y");
        assert!(matches!(h.exec(&inst), Err(VmError::TypeMismatch { .. })));
        let mut h = Harness::with_operands("z", 7i64);
        assert!(matches!(h.exec(&inst), Err(VmError::TypeMismatch { .. })));
    }
}

#[test]
fn arithmetic_underflows_with_one_operand() {
    let mut h = Harness::new();
    h.stack.push(int(1));
    assert_eq!(h.exec(&Instruction::Add), Err(VmError::StackUnderflow));
}

#[test]
fn divide_by_zero_is_reported() {
    let mut h = Harness::with_operands(0i64, 9i64);
    assert_eq!(h.exec(&Instruction::Divide), Err(VmError::DivisionByZero));
    assert!(h.stack.is_empty());
}

#[test]
fn division_truncates_toward_zero() {
    for (a, b) in [(7i64, 2i64), (-7, 2), (7, -2), (-7, -2), (0, 5), (i64::MAX, 3)] {
        let mut h = Harness::with_operands(b, a);
        h.exec(&Instruction::Divide).unwrap();
        assert_eq!(h.top(), int(a / b));
    }
}

#[test]
fn equal_compares_value_and_type() {
    let cases: Vec<(Value, Value, i64)> = vec![
        (Value::Int(0), Value::Int(0), 1),
        (Value::Int(0), Value::Int(1), 0),
        ("a".into(), "a".into(), 1),
        ("a".into(), "b".into(), 0),
        (Value::Int(5), "5".into(), 0),
    ];
    for (a, b, expected) in cases {
        let mut h = Harness::with_operands(a, b);
        h.exec(&Instruction::Equal).unwrap();
        assert_eq!(h.top(), int(expected));
    }
}

#[test]
fn equal_only_fails_on_underflow() {
    let mut h = Harness::new();
    h.stack.push(None);
    h.stack.push(None);
    h.exec(&Instruction::Equal).unwrap();
    assert_eq!(h.top(), int(1));

    let mut h = Harness::new();
    h.stack.push(int(1));
    assert_eq!(h.exec(&Instruction::Equal), Err(VmError::StackUnderflow));
}

#[test]
fn jumps_request_label() {
    let mut h = Harness::new();
    h.exec(&Instruction::Jump(5)).unwrap();
    assert_eq!(h.ctrl.jumped_to, Some(5));
}

#[test]
fn conditional_jumps_follow_condition() {
    for (cond, nonzero_jumps) in [(0, false), (1, true), (7, true), (-1, true)] {
        let mut h = Harness::new();
        h.stack.push(int(cond));
        h.exec(&Instruction::JumpIfNonZero(5)).unwrap();
        assert_eq!(h.ctrl.jumped_to.is_some(), nonzero_jumps, "jnz on {cond}");

        let mut h = Harness::new();
        h.stack.push(int(cond));
        h.exec(&Instruction::JumpIfZero(5)).unwrap();
        assert_eq!(h.ctrl.jumped_to.is_some(), !nonzero_jumps, "jez on {cond}");
    }
}

#[test]
fn conditional_jump_needs_int() {
    let mut h = Harness::new();
    h.stack.push(Some(Value::from("x")));
    assert!(matches!(
        h.exec(&Instruction::JumpIfNonZero(5)),
        Err(VmError::TypeMismatch { .. })
    ));
    assert_eq!(h.ctrl.jumped_to, None);

    let mut h = Harness::new();
    assert_eq!(h.exec(&Instruction::JumpIfZero(5)), Err(VmError::StackUnderflow));
}

#[test]
fn stop_and_label_do_not_touch_stack() {
    let mut h = Harness::with_operands(1i64, 2i64);
    h.exec(&Instruction::Label(3)).unwrap();
    h.exec(&Instruction::Stop).unwrap();
    assert!(h.ctrl.stopped);
    assert_eq!(h.stack.len(), 2);
}

#[test]
fn store_and_load_memory() {
    let mut h = Harness::with_operands(5i64, 7i64);
    h.exec(&Instruction::StoreMemory(5)).unwrap();
    assert_eq!(h.mem.load(5), int(5));
    assert_eq!(h.stack.len(), 1);

    h.exec(&Instruction::LoadMemory(5)).unwrap();
    assert_eq!(h.top(), int(5));

    h.exec(&Instruction::LoadMemory(99)).unwrap();
    assert_eq!(h.top(), None);
}

#[test]
fn store_on_empty_stack_fails() {
    let mut h = Harness::new();
    assert_eq!(h.exec(&Instruction::StoreMemory(1)), Err(VmError::StackUnderflow));
}

#[test]
fn output_renders_memory() {
    let mut h = Harness::new();
    h.mem.store(1, int(20));
    h.mem.store(2, Some(Value::from("hi")));
    for addr in [1, 2, 3] {
        h.exec(&Instruction::Output(addr)).unwrap();
    }
    assert_eq!(h.ctrl.emitted, vec!["20", "hi", "undefined"]);
    assert!(h.stack.is_empty());
}

#[test]
fn push_literals() {
    let mut h = Harness::new();
    h.exec(&Instruction::PushInt(-3)).unwrap();
    assert_eq!(h.top(), int(-3));
    h.exec(&Instruction::PushString(String::new())).unwrap();
    assert_eq!(h.top(), Some(Value::from("")));
}
