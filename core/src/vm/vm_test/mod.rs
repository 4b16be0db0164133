pub(super) use crate::{
    val::{Slot, Value},
    vm::{BufferSink, Control, Instruction, MapMemory, Memory, Program, RunState, Stack, Vm, VmConfig, VmError},
};

/// Records control requests instead of acting on them.
#[derive(Default)]
pub(super) struct MockControl {
    pub jumped_to: Option<i64>,
    pub stopped: bool,
    pub emitted: Vec<String>,
}

impl Control for MockControl {
    fn jump(&mut self, label: i64) -> Result<(), VmError> {
        self.jumped_to = Some(label);
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn emit(&mut self, text: &str) {
        self.emitted.push(text.to_string());
    }
}

/// Single-instruction harness: `a` is pushed last so it is popped first.
pub(super) struct Harness {
    pub ctrl: MockControl,
    pub stack: Stack<Slot>,
    pub mem: MapMemory,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            ctrl: MockControl::default(),
            stack: Stack::new(),
            mem: MapMemory::new(),
        }
    }

    pub fn with_operands(a: impl Into<Value>, b: impl Into<Value>) -> Self {
        let mut h = Self::new();
        h.stack.push(Some(b.into()));
        h.stack.push(Some(a.into()));
        h
    }

    pub fn exec(&mut self, inst: &Instruction) -> Result<(), VmError> {
        inst.exec(&mut self.ctrl, &mut self.stack, &mut self.mem)
    }

    pub fn top(&self) -> Slot {
        self.stack.peek().cloned().unwrap_or(None)
    }
}

pub(super) fn parse(src: &str) -> Program {
    crate::asm::parse_str(src).expect("assembly should parse").0
}

/// Run on a buffered VM and return it with its memory for inspection.
pub(super) fn run_src(src: &str) -> (Vm<BufferSink>, MapMemory, Result<(), VmError>) {
    let program = parse(src);
    let mut vm = Vm::buffered();
    let mut mem = MapMemory::new();
    let result = vm.run(&program, &mut mem);
    (vm, mem, result)
}

mod control_flow;
mod semantics;
mod strings;
