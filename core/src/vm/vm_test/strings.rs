use super::*;

fn s(text: &str) -> Slot {
    Some(Value::from(text))
}

#[test]
fn concat_joins_in_pop_order() {
    let (vm, _, result) = run_src("str \"a\"\nstr \"b\"\ncat");
    result.unwrap();
    assert_eq!(vm.stack().peek(), Ok(&s("ba")));
    assert_eq!(vm.stack().len(), 1);

    // First pop ("x", on top) goes in front of the second ("y").
    let mut h = Harness::with_operands("x", "y");
    h.exec(&Instruction::ConcatString).unwrap();
    assert_eq!(h.top(), s("xy"));

    let mut h = Harness::with_operands("", "a");
    h.exec(&Instruction::ConcatString).unwrap();
    assert_eq!(h.top(), s("a"));
}

#[test]
fn concat_requires_strings() {
    let mut h = Harness::with_operands("a", 5i64);
    assert!(matches!(
        h.exec(&Instruction::ConcatString),
        Err(VmError::TypeMismatch { .. })
    ));
}

#[test]
fn length_counts_utf8_bytes() {
    for (text, expected) in [("a", 1), ("", 0), ("héllo", 6), ("日本", 6)] {
        let mut h = Harness::new();
        h.stack.push(s(text));
        h.exec(&Instruction::StringLength).unwrap();
        assert_eq!(h.top(), Some(Value::Int(expected)));
    }

    let mut h = Harness::new();
    h.stack.push(Some(Value::Int(5)));
    assert!(matches!(
        h.exec(&Instruction::StringLength),
        Err(VmError::TypeMismatch { .. })
    ));
}

#[test]
fn format_fills_placeholders_in_pop_order() {
    // "a" on top is popped first and fills %s.
    let mut h = Harness::with_operands("a", 5i64);
    h.exec(&Instruction::FormatString("%s-%d".into())).unwrap();
    assert_eq!(h.top(), s("a-5"));
    assert_eq!(h.stack.len(), 1);

    let mut h = Harness::with_operands("a", "b");
    h.exec(&Instruction::FormatString("-%s-".into())).unwrap();
    assert_eq!(h.top(), s("-a-"));
    // Only one argument was consumed.
    assert_eq!(h.stack.len(), 2);
}

#[test]
fn format_kind_mismatch_fails() {
    // str "a"; psh 5 leaves 5 on top, which cannot fill %s.
    let (vm, _, result) = run_src("str \"a\"\npsh 5\nfmt \"%s-%d\"");
    assert!(matches!(result, Err(VmError::TypeMismatch { .. })));
    assert_eq!(vm.state(), RunState::Failed);
}

#[test]
fn format_without_placeholders_pops_nothing() {
    let mut h = Harness::with_operands(1i64, 2i64);
    h.exec(&Instruction::FormatString("100%%".into())).unwrap();
    assert_eq!(h.top(), s("100%"));
    assert_eq!(h.stack.len(), 3);
}

#[test]
fn format_underflow_keeps_popped_values_gone() {
    let mut h = Harness::new();
    h.stack.push(s("only"));
    assert_eq!(
        h.exec(&Instruction::FormatString("%s %s".into())),
        Err(VmError::StackUnderflow)
    );
    assert!(h.stack.is_empty());
}
