//! Growable integer buffers backing the traversal frontier.
//!
//! Each accepted voxel schedules up to 14 neighbour visits, so the
//! frontier routinely holds tens of thousands of pending entries.
//! Capacity rounds up to the next power of two (at least 16) and grows
//! by doubling; entries are raw packed position words.
//!
//! [`FrontierStack`] (LIFO) drives the scanner. [`FrontierQueue`]
//! (FIFO, circular front index) yields the same final component
//! membership in a different discovery order and is kept as the
//! documented alternative.

/// Round a requested capacity up to the next power of two, floor 16.
fn round_capacity(requested: usize) -> usize {
    requested.max(16).next_power_of_two()
}

/// LIFO frontier buffer with amortized O(1) push/pop.
#[derive(Debug)]
pub struct FrontierStack {
    data: Vec<u32>,
}

impl FrontierStack {
    /// Create a stack with room for at least `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(round_capacity(capacity)),
        }
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the frontier is drained.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current capacity in entries.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Push one entry, doubling the backing storage when full.
    pub fn push(&mut self, value: u32) {
        if self.data.len() == self.data.capacity() {
            self.data.reserve_exact(self.data.capacity());
        }
        self.data.push(value);
    }

    /// Pop the most recently pushed entry.
    pub fn pop(&mut self) -> Option<u32> {
        self.data.pop()
    }
}

/// FIFO frontier buffer with a circular front index.
#[derive(Debug)]
pub struct FrontierQueue {
    data: Vec<u32>,
    front: usize,
    len: usize,
}

impl FrontierQueue {
    /// Create a queue with room for at least `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; round_capacity(capacity)],
            front: 0,
            len: 0,
        }
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the frontier is drained.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity in entries.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Enqueue one entry at the back, doubling the storage when full.
    pub fn enqueue(&mut self, value: u32) {
        if self.len == self.data.len() {
            self.grow();
        }
        let mut index = self.front + self.len;
        if index >= self.data.len() {
            index -= self.data.len();
        }
        self.data[index] = value;
        self.len += 1;
    }

    /// Dequeue the oldest entry.
    pub fn dequeue(&mut self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        let value = self.data[self.front];
        self.front += 1;
        if self.front == self.data.len() {
            self.front = 0;
        }
        self.len -= 1;
        Some(value)
    }

    /// Double the storage, linearizing wrapped contents so `front`
    /// returns to index 0. FIFO order is preserved across the wrap
    /// point.
    fn grow(&mut self) {
        let old_cap = self.data.len();
        let mut grown = Vec::with_capacity(old_cap * 2);
        grown.extend_from_slice(&self.data[self.front..]);
        grown.extend_from_slice(&self.data[..self.front]);
        grown.resize(old_cap * 2, 0);
        self.data = grown;
        self.front = 0;
    }
}
