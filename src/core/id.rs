/// Stable handles for open documents
/// Tab order changes, handles do not: a buffer keeps its id from open to close
use std::fmt;

/// Unique identifier for a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub usize);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer({})", self.0)
    }
}

/// Monotonic allocator for buffer ids; ids are never reused within a session
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn alloc(&mut self) -> BufferId {
        let id = BufferId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_id() {
        let id1 = BufferId(0);
        let id2 = BufferId(1);
        assert_ne!(id1, id2);
        assert_eq!(id1.0, 0);
        assert_eq!(format!("{}", id1), "Buffer(0)");
    }

    #[test]
    fn test_allocator_never_reuses() {
        let mut ids = IdAllocator::new();
        let a = ids.alloc();
        let b = ids.alloc();
        let c = ids.alloc();
        assert_eq!((a.0, b.0, c.0), (0, 1, 2));
    }

    #[test]
    fn test_id_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        let id = BufferId(42);
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }
}
