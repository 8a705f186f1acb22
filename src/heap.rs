//! Fixed-capacity binary min-heap.
//!
//! # Overview
//! - Array-backed, no allocation. Storage is either borrowed from the caller
//!   (`&mut [HeapSlot<T, P>]`) or owned inline (`[HeapSlot<T, P>; N]`).
//! - 1-indexed: slot 0 is never occupied, so a backing array of `N` slots holds at most
//!   `N - 1` elements. Parent of `i` is `i / 2`, children are `2i` and `2i + 1`.
//! - Smallest priority is popped first. Equal priorities come out in no particular order.
//! - Push and pop are `O(log n)`; everything else is `O(1)`.
//!
//! # Failure
//! A push on a full heap returns [`QueueError::Full`], a pop or peek on an empty heap returns
//! [`QueueError::Empty`]. Neither touches the heap, which stays usable afterwards.
//!
//! # Concurrency
//! No internal locking. Mutating calls take `&mut self`; a queue shared between an
//! interrupt handler and the main loop must sit behind whatever exclusion the caller uses
//! (critical section, mutex, masked interrupts).
//!
//! # Payloads
//! The heap copies `T` in and out but never frees what it refers to. To keep the payload
//! in caller-owned memory, store `&T` or an index into a caller arena.

use crate::error::QueueError;
use crate::priority::Priority;

/// One slot of the backing array: a priority key and an optional payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapSlot<T, P = u16> {
    priority: P,
    data: Option<T>,
}

impl<T, P: Priority> HeapSlot<T, P> {
    /// Unoccupied slot, used to initialise backing arrays.
    pub const VACANT: Self = Self {
        priority: P::MIN,
        data: None,
    };

    #[inline]
    const fn occupied(priority: P, data: T) -> Self {
        Self {
            priority,
            data: Some(data),
        }
    }

    #[inline]
    pub fn priority(&self) -> P {
        self.priority
    }

    #[inline]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl<T, P: Priority> Default for HeapSlot<T, P> {
    fn default() -> Self {
        Self::VACANT
    }
}

/// Backing array of a [`PriorityQueue`].
///
/// Implementations must hand out the same slice length on every call.
pub trait Storage {
    type Item: Copy;
    type Priority: Priority;

    fn slots(&self) -> &[HeapSlot<Self::Item, Self::Priority>];
    fn slots_mut(&mut self) -> &mut [HeapSlot<Self::Item, Self::Priority>];
}

impl<T: Copy, P: Priority> Storage for &mut [HeapSlot<T, P>] {
    type Item = T;
    type Priority = P;

    #[inline]
    fn slots(&self) -> &[HeapSlot<T, P>] {
        self
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [HeapSlot<T, P>] {
        self
    }
}

impl<T: Copy, P: Priority, const N: usize> Storage for [HeapSlot<T, P>; N] {
    type Item = T;
    type Priority = P;

    #[inline]
    fn slots(&self) -> &[HeapSlot<T, P>] {
        self
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [HeapSlot<T, P>] {
        self
    }
}

/// Heap whose storage lives inside the queue.
pub type InlinePriorityQueue<T, const N: usize, P = u16> = PriorityQueue<[HeapSlot<T, P>; N]>;

/// Fixed-capacity min-heap over `S`.
#[derive(Debug)]
pub struct PriorityQueue<S> {
    storage: S,
    len: usize,
}

impl<T: Copy, P: Priority, const N: usize> PriorityQueue<[HeapSlot<T, P>; N]> {
    /// Empty heap with inline storage. Usable capacity is `N - 1`.
    pub const fn new_inline() -> Self {
        assert!(N > 0);
        Self {
            storage: [HeapSlot::VACANT; N],
            len: 0,
        }
    }
}

impl<T: Copy, P: Priority, const N: usize> Default for PriorityQueue<[HeapSlot<T, P>; N]> {
    fn default() -> Self {
        Self::new_inline()
    }
}

impl<S: Storage> PriorityQueue<S> {
    /// Bind `storage` and start empty. Usable capacity is one less than the slot count.
    ///
    /// # Panics
    /// If `storage` has no slots at all.
    pub fn new(storage: S) -> Self {
        assert!(!storage.slots().is_empty());
        Self { storage, len: 0 }
    }

    /// Number of elements currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements, i.e. slot count minus the unused root sentinel.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.slots().len() - 1
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Drop every element. Same effect as rebinding the storage.
    pub fn clear(&mut self) {
        let len = self.len;
        self.storage.slots_mut()[1..=len].fill(HeapSlot::VACANT);
        self.len = 0;
    }

    /// Insert `data` keyed by `priority`.
    ///
    /// Returns [`QueueError::Full`] without modifying the heap when no slot is free.
    pub fn push(&mut self, data: S::Item, priority: S::Priority) -> Result<(), QueueError> {
        if self.is_full() {
            trace!(
                "push rejected: priority {:?}, capacity {} reached",
                priority,
                self.capacity()
            );
            return Err(QueueError::Full);
        }

        self.len += 1;
        let slots = self.storage.slots_mut();
        slots[self.len] = HeapSlot::occupied(priority, data);
        sift_up(slots, self.len);
        Ok(())
    }

    /// Remove and return the payload with the smallest priority.
    pub fn pop(&mut self) -> Result<S::Item, QueueError> {
        self.pop_entry().map(|(_, data)| data)
    }

    /// Like [`pop`](Self::pop), also returning the priority the payload was queued with.
    pub fn pop_entry(&mut self) -> Result<(S::Priority, S::Item), QueueError> {
        if self.len == 0 {
            trace!("pop on empty queue");
            return Err(QueueError::Empty);
        }

        let last = self.len;
        let slots = self.storage.slots_mut();
        slots.swap(1, last);
        let top = core::mem::replace(&mut slots[last], HeapSlot::VACANT);
        self.len -= 1;
        sift_down(slots, 1, self.len);

        // Occupied slots always carry data; slots 1..=len are occupied.
        let data = top.data.ok_or(QueueError::Empty)?;
        Ok((top.priority, data))
    }

    /// Payload that the next [`pop`](Self::pop) would return.
    pub fn peek(&self) -> Result<&S::Item, QueueError> {
        if self.len == 0 {
            return Err(QueueError::Empty);
        }
        self.storage.slots()[1].data().ok_or(QueueError::Empty)
    }

    /// Priority of the next element to pop, if any.
    pub fn peek_priority(&self) -> Option<S::Priority> {
        if self.len == 0 {
            None
        } else {
            Some(self.storage.slots()[1].priority)
        }
    }

    /// Queued elements as `(priority, &payload)`, in storage order rather than priority order.
    pub fn iter(&self) -> impl Iterator<Item = (S::Priority, &S::Item)> + '_ {
        self.storage.slots()[1..=self.len]
            .iter()
            .filter_map(|slot| slot.data().map(|data| (slot.priority, data)))
    }

    /// Pop elements in priority order. Elements not yet yielded when the iterator is dropped
    /// stay queued.
    pub fn drain(&mut self) -> Drain<'_, S> {
        Drain { queue: self }
    }
}

/// Iterator returned by [`PriorityQueue::drain`].
#[derive(Debug)]
pub struct Drain<'q, S: Storage> {
    queue: &'q mut PriorityQueue<S>,
}

impl<S: Storage> Iterator for Drain<'_, S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<S: Storage> ExactSizeIterator for Drain<'_, S> {}

fn sift_up<T, P: Priority>(slots: &mut [HeapSlot<T, P>], mut idx: usize) {
    while idx > 1 {
        let parent = idx / 2;
        if slots[idx].priority >= slots[parent].priority {
            break;
        }
        slots.swap(idx, parent);
        idx = parent;
    }
}

fn sift_down<T, P: Priority>(slots: &mut [HeapSlot<T, P>], mut idx: usize, len: usize) {
    loop {
        let left = idx * 2;
        if left > len {
            break;
        }

        let right = left + 1;
        let child = if right <= len && slots[right].priority < slots[left].priority {
            right
        } else {
            left
        };

        if slots[child].priority >= slots[idx].priority {
            break;
        }
        slots.swap(idx, child);
        idx = child;
    }
}
