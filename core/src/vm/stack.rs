use super::VmError;

/// Strictly LIFO value stack.
///
/// An empty stack is a valid state; only `pop`, `peek` and `drain` on it fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a stack whose topmost element is the first item yielded.
    pub fn from_top<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();
        items.reverse();
        Self { items }
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    pub fn pop(&mut self) -> Result<T, VmError> {
        self.items.pop().ok_or(VmError::StackUnderflow)
    }

    #[inline]
    pub fn peek(&self) -> Result<&T, VmError> {
        self.items.last().ok_or(VmError::StackUnderflow)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Items from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Pop items and hand each one, with its 1-based pop ordinal, to `step`
    /// until it returns `Ok(false)`.
    ///
    /// An empty stack fails with `StackUnderflow`; an error from `step` is
    /// returned as is. Popped items are never pushed back.
    pub fn drain<F>(&mut self, mut step: F) -> Result<(), VmError>
    where
        F: FnMut(usize, T) -> Result<bool, VmError>,
    {
        let mut ordinal = 0usize;
        loop {
            let item = self.pop()?;
            ordinal += 1;
            if !step(ordinal, item)? {
                return Ok(());
            }
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
