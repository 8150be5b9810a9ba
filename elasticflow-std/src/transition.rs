//! Occupancy transitions shared by slot buffers.

/// Named occupancy transition of a slot buffer in one step.
///
/// A buffer is `Empty`, `Busy` (neither empty nor full) or `Full`. The transition is named after the region before
/// the step and whether an item was inserted and/or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transition {
    /// No insert, no remove.
    #[default]
    Idle,
    /// Empty, insert only.
    Load,
    /// Insert and remove in the same step.
    Flow,
    /// Busy, insert only.
    Fill,
    /// Full, remove only.
    Flush,
    /// Busy, remove only.
    Unload,
}

impl Transition {
    /// Classifies a step of a buffer holding `count` of `capacity` items.
    ///
    /// Removing from an empty buffer, or inserting into a full one without removing, is a handshake violation.
    pub fn classify(count: usize, capacity: usize, insert: bool, remove: bool) -> Self {
        let empty = count == 0;
        let full = count == capacity;
        match (insert, remove) {
            (false, false) => Self::Idle,
            (true, true) => {
                debug_assert!(!empty, "remove from an empty buffer");
                Self::Flow
            }
            (true, false) => {
                debug_assert!(!full, "insert into a full buffer");
                if empty {
                    Self::Load
                } else {
                    Self::Fill
                }
            }
            (false, true) => {
                debug_assert!(!empty, "remove from an empty buffer");
                if full {
                    Self::Flush
                } else {
                    Self::Unload
                }
            }
        }
    }

    /// Returns true if an item is inserted.
    pub fn inserts(self) -> bool { matches!(self, Self::Load | Self::Flow | Self::Fill) }

    /// Returns true if an item is removed.
    pub fn removes(self) -> bool { matches!(self, Self::Flow | Self::Flush | Self::Unload) }

    /// Occupancy after the transition.
    pub fn apply(self, count: usize) -> usize {
        match self {
            Self::Load | Self::Fill => count + 1,
            Self::Flush | Self::Unload => count - 1,
            Self::Idle | Self::Flow => count,
        }
    }
}
