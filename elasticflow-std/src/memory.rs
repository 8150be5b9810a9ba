//! Fixed-size backing storage.

use crate::*;

/// Backing array of a slot buffer.
///
/// The number of slots is fixed at construction; slots are never allocated or freed afterwards. Every slot holds a
/// value at all times, the don't-care value until first written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory<V> {
    slots: Box<[V]>,
}

impl<V: Signal> Memory<V> {
    /// Creates a memory of `len` slots.
    pub fn new(len: usize) -> Self { Self { slots: (0..len).map(|_| V::default()).collect() } }

    /// Number of slots.
    pub fn len(&self) -> usize { self.slots.len() }

    /// Returns true if the memory has no slot.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Reads a slot.
    pub fn read(&self, addr: usize) -> &V { &self.slots[addr] }

    /// Writes a slot.
    pub fn write(&mut self, addr: usize, value: V) { self.slots[addr] = value; }

    /// Copies the slots out.
    pub fn to_vec(&self) -> Vec<V> { self.slots.to_vec() }

    /// Replaces the slots. The slot count must not change.
    pub fn load(&mut self, slots: Vec<V>) -> Result<(), ConfigError> {
        if slots.len() != self.slots.len() {
            return Err(ConfigError::InconsistentState { unit: "memory", reason: "slot count mismatch" });
        }
        self.slots = slots.into_boxed_slice();
        Ok(())
    }
}
