mod runtime;

use tracing::{debug, trace};

use crate::val::Slot;

use super::{BufferSink, MapMemory, Memory, OutputSink, Program, Stack, StdoutSink, VmConfig, VmError};

pub use runtime::Control;

/// Lifecycle of a [`Vm`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Ready,
    Running,
    /// Reached the end of the program or executed `stop`.
    Halted,
    /// An instruction failed; nothing after it ran.
    Failed,
}

/// Fetch/execute loop over a [`Program`].
///
/// The VM owns the value stack and the output sink; memory is supplied per
/// run so callers can pre-populate it. Every run starts from an empty stack.
pub struct Vm<S: OutputSink = StdoutSink> {
    stack: Stack<Slot>,
    sink: S,
    config: VmConfig,
    state: RunState,
    steps: u64,
}

impl Vm<StdoutSink> {
    pub fn new() -> Self {
        Self::with_sink(StdoutSink)
    }
}

impl Default for Vm<StdoutSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm<BufferSink> {
    /// VM that captures `out` lines instead of printing them.
    pub fn buffered() -> Self {
        Self::with_sink(BufferSink::new())
    }

    pub fn output(&self) -> &[String] {
        self.sink.lines()
    }
}

impl<S: OutputSink> Vm<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            stack: Stack::new(),
            sink,
            config: VmConfig::default(),
            state: RunState::Ready,
            steps: 0,
        }
    }

    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Instructions dispatched by the last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn stack(&self) -> &Stack<Slot> {
        &self.stack
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run `program` to completion, `stop`, or the first failing instruction.
    pub fn run(&mut self, program: &Program, memory: &mut dyn Memory) -> Result<(), VmError> {
        self.stack.clear();
        self.steps = 0;
        self.state = RunState::Running;
        debug!(target: "imp::vm", instructions = program.len(), "run start");

        let mut cursor = Cursor {
            program,
            pc: 0,
            halted: false,
            sink: &mut self.sink,
        };

        while !cursor.halted
            && let Some(inst) = program.get(cursor.pc)
        {
            if let Some(limit) = self.config.max_steps
                && self.steps >= limit
            {
                self.state = RunState::Failed;
                return Err(VmError::StepLimitExceeded(limit));
            }
            self.steps += 1;
            trace!(target: "imp::vm::dispatch", pc = cursor.pc, inst = %inst, depth = self.stack.len());

            if let Err(err) = inst.exec(&mut cursor, &mut self.stack, memory) {
                debug!(target: "imp::vm", pc = cursor.pc, inst = %inst, error = %err, "run failed");
                self.state = RunState::Failed;
                return Err(err);
            }
            cursor.pc += 1;
        }

        debug!(target: "imp::vm", steps = self.steps, stopped = cursor.halted, "run halted");
        self.state = RunState::Halted;
        Ok(())
    }
}

/// Control-unit view handed to instructions during a run.
struct Cursor<'a> {
    program: &'a Program,
    pc: usize,
    halted: bool,
    sink: &'a mut dyn OutputSink,
}

impl Control for Cursor<'_> {
    fn jump(&mut self, label: i64) -> Result<(), VmError> {
        // Land on the label itself; it is a no-op and the loop steps past it.
        match self.program.find_label(label) {
            Some(idx) => {
                debug!(target: "imp::vm", label, from = self.pc, to = idx, "jump");
                self.pc = idx;
                Ok(())
            }
            None => Err(VmError::UnresolvedLabel(label)),
        }
    }

    fn stop(&mut self) {
        self.halted = true;
    }

    fn emit(&mut self, text: &str) {
        self.sink.write_line(text);
    }
}

/// Run `program` on a fresh VM and memory, printing output to stdout.
pub fn run_program(program: &Program) -> Result<(), VmError> {
    let mut memory = MapMemory::new();
    Vm::new().run(program, &mut memory)
}
