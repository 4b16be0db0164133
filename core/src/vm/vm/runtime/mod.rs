mod exec;
mod format;
mod helpers;
mod math;
mod strings;

use crate::vm::VmError;

/// Runner operations an instruction may request while executing.
pub trait Control {
    /// Continue execution at the first `lab label` in the program.
    fn jump(&mut self, label: i64) -> Result<(), VmError>;
    /// Halt successfully once the current instruction returns.
    fn stop(&mut self);
    /// Emit one line of program output.
    fn emit(&mut self, text: &str);
}
