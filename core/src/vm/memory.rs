use rustc_hash::FxHashMap;

use crate::val::{Slot, Value};

/// Address-indexed storage. Conceptually infinite: loads never fail and an
/// address that was never written reads as the undefined marker (`None`).
pub trait Memory {
    fn load(&self, address: i64) -> Slot;
    /// Overwrite `address`. Storing `None` makes the address undefined again.
    fn store(&mut self, address: i64, value: Slot);
}

/// Sparse hash-map backed [`Memory`].
#[derive(Debug, Clone, Default)]
pub struct MapMemory {
    cells: FxHashMap<i64, Value>,
}

impl MapMemory {
    pub fn new() -> Self {
        Self {
            cells: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn get(&self, address: i64) -> Option<&Value> {
        self.cells.get(&address)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Memory for MapMemory {
    #[inline]
    fn load(&self, address: i64) -> Slot {
        self.cells.get(&address).cloned()
    }

    #[inline]
    fn store(&mut self, address: i64, value: Slot) {
        match value {
            Some(value) => {
                self.cells.insert(address, value);
            }
            None => {
                self.cells.remove(&address);
            }
        }
    }
}
