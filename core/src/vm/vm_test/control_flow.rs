use super::*;

const LESS_THAN_BRANCH: &str = "psh 6\npsh 5\nltt\njnz 1\npsh 20\njmp 2\nlab 1\npsh 10\nlab 2\nstm 1\nout 1\npsh 4\npsh 5\nadd";

#[test]
fn branch_program_takes_fallthrough_path() {
    let program = parse(LESS_THAN_BRANCH);
    assert_eq!(program.len(), 14);

    let mut vm = Vm::buffered();
    let mut mem = MapMemory::new();
    vm.run(&program, &mut mem).unwrap();

    assert_eq!(vm.state(), RunState::Halted);
    assert_eq!(mem.load(1), Some(Value::Int(20)));
    assert_eq!(vm.output(), ["20"]);
    assert_eq!(vm.stack().peek(), Ok(&Some(Value::Int(9))));
    assert_eq!(vm.stack().len(), 1);
    // lab 1, psh 10 and the jump target itself are never dispatched.
    assert_eq!(vm.steps(), 11);
}

#[test]
fn self_loop_resolves_and_hits_step_limit() {
    let program = parse("lab 1\njmp 1");
    let mut vm = Vm::buffered().with_config(VmConfig::with_max_steps(100));
    let mut mem = MapMemory::new();
    assert_eq!(vm.run(&program, &mut mem), Err(VmError::StepLimitExceeded(100)));
    assert_eq!(vm.steps(), 100);
    assert_eq!(vm.state(), RunState::Failed);
}

#[test]
fn missing_label_is_unresolved() {
    let (vm, _, result) = run_src("psh 1\njmp 99\nout 1");
    assert_eq!(result, Err(VmError::UnresolvedLabel(99)));
    assert_eq!(vm.state(), RunState::Failed);
    assert!(vm.output().is_empty());
}

#[test]
fn conditional_jump_to_missing_label_only_fails_when_taken() {
    let (_, _, result) = run_src("psh 0\njnz 99\npsh 1");
    result.unwrap();
    let (_, _, result) = run_src("psh 0\njez 99\npsh 1");
    assert_eq!(result, Err(VmError::UnresolvedLabel(99)));
}

#[test]
fn stop_ends_run_successfully() {
    let (vm, mem, result) = run_src("psh 1\nstm 1\nstop\npsh 2\nstm 1");
    result.unwrap();
    assert_eq!(vm.state(), RunState::Halted);
    assert_eq!(mem.load(1), Some(Value::Int(1)));
    assert!(vm.stack().is_empty());
    assert_eq!(vm.steps(), 3);
}

#[test]
fn duplicate_labels_resolve_to_first() {
    let (vm, _, result) = run_src("psh 1\njmp 7\nlab 7\npsh 2\nstop\nlab 7\npsh 3");
    result.unwrap();
    let items: Vec<_> = vm.stack().iter().cloned().collect();
    assert_eq!(items, vec![Some(Value::Int(1)), Some(Value::Int(2))]);
}

#[test]
fn jump_to_trailing_label_ends_program() {
    let (vm, _, result) = run_src("jmp 3\npsh 1\nlab 3");
    result.unwrap();
    assert!(vm.stack().is_empty());
    assert_eq!(vm.state(), RunState::Halted);
}

#[test]
fn backward_jump_counts_down() {
    let src = "psh 3\nstm 1\nlab 1\nldm 1\njez 2\nout 1\nldm 1\npsh 1\nmin\nstm 1\njmp 1\nlab 2";
    let (vm, mem, result) = run_src(src);
    result.unwrap();
    assert_eq!(vm.output(), ["3", "2", "1"]);
    assert_eq!(mem.load(1), Some(Value::Int(0)));
}

#[test]
fn failure_aborts_remaining_instructions() {
    let (vm, mem, result) = run_src("psh 9\npsh 0\ndiv\nstm 1\nout 1");
    assert_eq!(result, Err(VmError::DivisionByZero));
    assert!(vm.output().is_empty());
    assert!(mem.is_empty());
    assert_eq!(vm.steps(), 3);
}

#[test]
fn empty_program_halts_immediately() {
    let mut vm = Vm::buffered();
    assert_eq!(vm.state(), RunState::Ready);
    vm.run(&Program::new(), &mut MapMemory::new()).unwrap();
    assert_eq!(vm.state(), RunState::Halted);
    assert_eq!(vm.steps(), 0);
}

#[test]
fn rerun_is_deterministic() {
    let program = parse(LESS_THAN_BRANCH);
    let mut vm = Vm::buffered();
    for _ in 0..2 {
        let mut mem = MapMemory::new();
        vm.run(&program, &mut mem).unwrap();
        assert_eq!(vm.stack().len(), 1);
        assert_eq!(mem.load(1), Some(Value::Int(20)));
    }
    assert_eq!(vm.output(), ["20", "20"]);
}

#[test]
fn preloaded_memory_is_visible() {
    let program = parse("ldm 4\npsh 1\nadd\nstm 4\nout 4\nout 5");
    let mut mem = MapMemory::new();
    mem.store(4, Some(Value::Int(41)));
    let mut vm = Vm::buffered();
    vm.run(&program, &mut mem).unwrap();
    assert_eq!(vm.into_sink().take(), vec!["42".to_string(), "undefined".to_string()]);
}
