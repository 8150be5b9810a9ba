//! FIFO tracker.

use crate::*;

/// Read/write pointers and occupancy of a circular buffer.
///
/// Equal pointers are ambiguous on their own; `count` tells empty from full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tracker {
    capacity: usize,
    count: usize,
    read: usize,
    write: usize,
}

impl Tracker {
    /// Creates a tracker for an empty buffer of `capacity` slots.
    pub fn new(capacity: usize) -> Self { Self { capacity, count: 0, read: 0, write: 0 } }

    /// Creates a tracker from raw parts, checking that they describe a reachable state.
    pub fn from_parts(capacity: usize, count: usize, read: usize, write: usize) -> Result<Self, ConfigError> {
        let inconsistent = |reason| Err(ConfigError::InconsistentState { unit: "fifo", reason });
        if count > capacity {
            return inconsistent("occupancy exceeds capacity");
        }
        if read >= capacity || write >= capacity {
            return inconsistent("pointer out of range");
        }
        if (read + count) % capacity != write {
            return inconsistent("pointers disagree with occupancy");
        }
        Ok(Self { capacity, count, read, write })
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize { self.capacity }

    /// Occupancy.
    pub fn count(&self) -> usize { self.count }

    /// Read pointer.
    pub fn read(&self) -> usize { self.read }

    /// Write pointer.
    pub fn write(&self) -> usize { self.write }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool { self.count == 0 }

    /// Returns true if the buffer is full.
    pub fn is_full(&self) -> bool { self.count == self.capacity }

    /// Next-state function.
    pub fn next(self, insert: bool, remove: bool) -> (Transition, Self) {
        let transition = Transition::classify(self.count, self.capacity, insert, remove);
        let next = Self {
            capacity: self.capacity,
            count: transition.apply(self.count),
            read: if transition.removes() { self.wrap_increment(self.read) } else { self.read },
            write: if transition.inserts() { self.wrap_increment(self.write) } else { self.write },
        };
        (transition, next)
    }

    fn wrap_increment(&self, ptr: usize) -> usize {
        if ptr + 1 == self.capacity {
            0
        } else {
            ptr + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointers_wrap() {
        let mut tracker = Tracker::new(3);
        for _ in 0..3 {
            tracker = tracker.next(true, false).1;
        }
        assert!(tracker.is_full());
        assert_eq!(tracker.write(), 0);

        let (transition, tracker) = tracker.next(false, true);
        assert_eq!(transition, Transition::Flush);
        assert_eq!(tracker.read(), 1);
        assert_eq!(tracker.count(), 2);
        assert_eq!(Tracker::from_parts(3, 2, 1, 0), Ok(tracker));
    }

    #[test]
    fn inconsistent_parts_are_rejected() {
        for (count, read, write) in [(4, 0, 1), (1, 3, 1), (1, 0, 3), (1, 0, 0), (2, 2, 2)] {
            assert!(
                matches!(Tracker::from_parts(3, count, read, write), Err(ConfigError::InconsistentState { .. })),
                "accepted count {count} read {read} write {write}"
            );
        }
    }

    #[test]
    fn flow_advances_both() {
        let tracker = Tracker::new(2).next(true, false).1;
        let (transition, tracker) = tracker.next(true, true);
        assert_eq!(transition, Transition::Flow);
        assert_eq!((tracker.read(), tracker.write(), tracker.count()), (1, 0, 1));
    }
}
