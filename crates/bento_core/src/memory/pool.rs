//! # Slot Pool
//!
//! Fixed-capacity block storage for objects that are frequently allocated and freed.

/// A pool of fixed capacity.
///
/// The capacity is the hard ceiling on live objects: once every slot is taken,
/// [`SlotPool::allocate`] fails instead of growing. A capacity of zero is valid
/// and rejects every allocation.
///
/// Each slot carries a generation that advances on free, so a handle that
/// outlives its object resolves to nothing instead of aliasing the next
/// occupant. Freeing a stale handle is a no-op.
///
/// # Example
///
/// ```rust
/// use bento_core::SlotPool;
///
/// let mut pool: SlotPool<u32> = SlotPool::new(2);
/// let handle = pool.allocate(7).unwrap();
/// assert_eq!(pool.free(handle), Some(7));
/// assert_eq!(pool.free(handle), None);
/// ```
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    /// The storage array.
    slots: Box<[Slot<T>]>,
    /// Free list - indices of available slots.
    free_list: Vec<usize>,
    /// Number of allocated objects.
    allocated_count: usize,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Handle to an allocated object in a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolHandle {
    /// Index into the pool.
    index: u32,
    /// Generation of the slot at allocation time.
    generation: u32,
}

impl PoolHandle {
    /// Returns the slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the slot generation this handle was issued for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> SlotPool<T> {
    /// Creates a new pool with the specified capacity.
    ///
    /// All slots are pre-allocated upfront.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let slots: Vec<Slot<T>> = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                value: None,
            })
            .collect();

        // Lowest index is handed out first.
        let free_list: Vec<usize> = (0..capacity).rev().collect();

        Self {
            slots: slots.into_boxed_slice(),
            free_list,
            allocated_count: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently allocated objects.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.allocated_count
    }

    /// Returns true when nothing is allocated.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.allocated_count == 0
    }

    /// Returns true when every slot is taken.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Allocates a slot and stores the object.
    ///
    /// Returns `None` if the pool is full.
    pub fn allocate(&mut self, value: T) -> Option<PoolHandle> {
        let index = self.free_list.pop()?;
        let slot = &mut self.slots[index];
        slot.value = Some(value);
        self.allocated_count += 1;

        Some(PoolHandle {
            index: u32::try_from(index).ok()?,
            generation: slot.generation,
        })
    }

    /// Frees an allocated object.
    ///
    /// Returns the freed object, or `None` if the handle was stale or invalid.
    pub fn free(&mut self, handle: PoolHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index());
        self.allocated_count -= 1;

        Some(value)
    }

    /// Returns true if the handle still refers to a live object.
    #[must_use]
    pub fn contains(&self, handle: PoolHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Gets a reference to an allocated object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Gets a mutable reference to an allocated object.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Frees every object, returning them with their handles.
    pub fn drain(&mut self) -> Vec<(PoolHandle, T)> {
        let handles: Vec<PoolHandle> = self.iter().map(|(handle, _)| handle).collect();
        handles
            .into_iter()
            .filter_map(|handle| self.free(handle).map(|value| (handle, value)))
            .collect()
    }

    /// Iterates over all allocated objects.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((
                PoolHandle {
                    index,
                    generation: slot.generation,
                },
                value,
            ))
        })
    }

    /// Iterates mutably over all allocated objects.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            let value = slot.value.as_mut()?;
            let index = u32::try_from(index).ok()?;
            Some((PoolHandle { index, generation }, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_allocate_free() {
        let mut pool: SlotPool<u32> = SlotPool::new(10);

        let h1 = pool.allocate(42).unwrap();
        assert_eq!(*pool.get(h1).unwrap(), 42);
        assert_eq!(pool.len(), 1);

        let freed = pool.free(h1);
        assert_eq!(freed, Some(42));
        assert!(pool.get(h1).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_full() {
        let mut pool: SlotPool<u32> = SlotPool::new(2);

        assert!(pool.allocate(1).is_some());
        assert!(pool.allocate(2).is_some());
        assert!(pool.is_full());
        assert!(pool.allocate(3).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut pool: SlotPool<u32> = SlotPool::new(0);

        assert_eq!(pool.capacity(), 0);
        assert!(pool.allocate(1).is_none());
        assert!(pool.drain().is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_alias() {
        let mut pool: SlotPool<&str> = SlotPool::new(1);

        let old = pool.allocate("old").unwrap();
        pool.free(old);
        let new = pool.allocate("new").unwrap();

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(pool.get(old).is_none());
        assert_eq!(pool.free(old), None);
        assert_eq!(pool.get(new), Some(&"new"));
    }

    #[test]
    fn test_drain_empties_pool() {
        let mut pool: SlotPool<u32> = SlotPool::new(4);
        for i in 0..3 {
            pool.allocate(i);
        }

        let drained = pool.drain();
        assert_eq!(drained.len(), 3);
        assert!(pool.is_empty());
        assert_eq!(pool.iter().count(), 0);
    }
}
