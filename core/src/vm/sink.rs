use std::io::{self, Write};

/// Destination of the `out` instruction.
pub trait OutputSink {
    fn write_line(&mut self, text: &str);
}

/// Writes each line to stdout, flushing immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            tracing::warn!(target: "imp::vm", error = %err, "failed to write program output");
        }
    }
}

/// Collects output lines in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write_line(&mut self, text: &str) {
        (**self).write_line(text);
    }
}
