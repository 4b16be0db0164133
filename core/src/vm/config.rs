/// Runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VmConfig {
    /// Maximum number of instructions dispatched per run; `None` is unbounded.
    pub max_steps: Option<u64>,
}

impl VmConfig {
    pub fn with_max_steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}
