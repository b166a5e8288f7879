//! Slot storage that owns every node of a tree and hands out copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};

/// Default number of slots reserved each time the arena runs out of room.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A copyable reference to an occupied slot of an `Arena<T>`.
///
/// Handles carry no lifetime, so a node can point at its parent without owning it. A handle is
/// only meaningful for the arena that issued it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object backed by one `Vec`.
///
/// Freed slots are threaded onto a free list and reused by the next allocation. Capacity grows
/// `chunk_size` slots at a time.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    chunk_size: usize,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>` that grows by `chunk_size` slots at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: arena chunk size must be positive.");
        Arena {
            slots: Vec::new(),
            head: None,
            chunk_size,
            len: 0,
        }
    }

    /// Returns the number of slots each growth step reserves.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` in a vacant slot and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            Some(index) => {
                let vacant = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => self.head = next,
                    Slot::Occupied(_) => unreachable!(),
                }
                Handle(index)
            },
            None => {
                if self.slots.len() == self.slots.capacity() {
                    self.slots.reserve_exact(self.chunk_size);
                }
                self.slots.push(Slot::Occupied(value));
                Handle(self.slots.len() - 1)
            },
        }
    }

    /// Vacates the slot behind `handle` and returns the value it held.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of bounds or its slot is already vacant.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old = mem::replace(&mut self.slots[handle.0], Slot::Vacant(self.head));
        match old {
            Slot::Occupied(value) => {
                self.head = Some(handle.0);
                self.len -= 1;
                value
            },
            Slot::Vacant(next) => {
                self.slots[handle.0] = Slot::Vacant(next);
                panic!("Error: attempting to free vacant slot.");
            },
        }
    }

    /// Returns an immutable reference to the value behind `handle`, or `None` if the slot is
    /// out of bounds or vacant.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value behind `handle`, or `None` if the slot is out of
    /// bounds or vacant.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every value and forgets all handles. Reserved capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle refers to a vacant slot.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle refers to a vacant slot.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Handle};

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: Arena<u32> = Arena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: Arena<u32> = Arena::new(16);
        arena.free(Handle(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = Arena::new(16);
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate() {
        let mut arena = Arena::new(2);
        assert_eq!(arena.allocate(0), Handle(0));
        assert_eq!(arena.allocate(0), Handle(1));
        assert_eq!(arena.allocate(0), Handle(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::new(16);
        let first = arena.allocate(1);
        let second = arena.allocate(2);
        assert_eq!(arena.free(first), 1);
        assert_eq!(arena.free(second), 2);
        assert!(arena.is_empty());

        assert_eq!(arena.allocate(3), second);
        assert_eq!(arena.allocate(4), first);
        assert_eq!(arena.allocate(5), Handle(2));
    }

    #[test]
    fn test_get_vacant_slot() {
        let mut arena = Arena::new(16);
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get(Handle(7)), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = Arena::new(16);
        let handle = arena.allocate(0);
        arena[handle] += 2;
        assert_eq!(arena[handle], 2);
        assert_eq!(arena.get_mut(handle), Some(&mut 2));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new(16);
        arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(2), Handle(0));
    }
}
