//! Outbound CAN message queue.
//!
//! Messages are keyed by identifier, so the queue hands them out in bus arbitration order:
//! the numerically smallest identifier first. Each slot holds the identifier together with a
//! copy of the message, so no separate free list or message pool is needed.

use crate::error::{MessageError, QueueError};
use crate::heap::{Drain, HeapSlot, InlinePriorityQueue};

/// Largest 11-bit standard identifier.
pub const MAX_STANDARD_ID: u16 = 0x7FF;

/// Classic CAN payload limit in bytes.
pub const MAX_PAYLOAD_LEN: usize = 8;

/// Slot count used when [`MessageQueue`] is named without an explicit size.
pub const DEFAULT_QUEUE_SLOTS: usize = 32;

/// A classic CAN frame with a standard identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanMessage {
    id: u16,
    data: [u8; MAX_PAYLOAD_LEN],
    dlc: u8,
}

impl CanMessage {
    /// Build a frame, copying `payload`.
    pub fn new(id: u16, payload: &[u8]) -> Result<Self, MessageError> {
        if id > MAX_STANDARD_ID {
            debug!("rejected message: identifier {:#x} out of range", id);
            return Err(MessageError::IdOutOfRange { id });
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            debug!("rejected message {:#x}: {} byte payload", id, payload.len());
            return Err(MessageError::PayloadTooLong { len: payload.len() });
        }

        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            dlc: payload.len() as u8,
        })
    }

    /// Identifier; lower values win arbitration.
    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.dlc)]
    }
}

/// Fixed-capacity transmit queue ordered by identifier.
///
/// Holds at most `N - 1` messages.
#[derive(Debug)]
pub struct MessageQueue<const N: usize = DEFAULT_QUEUE_SLOTS> {
    queue: InlinePriorityQueue<CanMessage, N>,
}

impl<const N: usize> MessageQueue<N> {
    pub const fn new() -> Self {
        Self {
            queue: InlinePriorityQueue::new_inline(),
        }
    }

    /// Copy `message` into the queue.
    ///
    /// Returns [`QueueError::Full`] when no slot is free; the queue is unchanged.
    #[inline]
    pub fn push(&mut self, message: &CanMessage) -> Result<(), QueueError> {
        self.queue.push(*message, message.id)
    }

    /// Remove the message with the lowest identifier.
    #[inline]
    pub fn pop(&mut self) -> Result<CanMessage, QueueError> {
        self.queue.pop()
    }

    #[inline]
    pub fn peek(&self) -> Result<&CanMessage, QueueError> {
        self.queue.peek()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Pop messages in identifier order.
    pub fn drain(&mut self) -> Drain<'_, [HeapSlot<CanMessage>; N]> {
        self.queue.drain()
    }
}

impl<const N: usize> Default for MessageQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CanMessage, DEFAULT_QUEUE_SLOTS, MAX_STANDARD_ID, MessageQueue};
    use crate::error::{MessageError, QueueError};
    use rstest::rstest;
    use std::vec::Vec;

    fn msg(id: u16, payload: &[u8]) -> CanMessage {
        CanMessage::new(id, payload).unwrap()
    }

    #[test]
    fn round_trip_copies_payload() {
        let mut queue: MessageQueue<4> = MessageQueue::new();
        let mut buf = [1u8, 2, 3, 4, 5];
        let original = msg(7, &buf);

        queue.push(&original).unwrap();
        buf.fill(0);

        let out = queue.pop().unwrap();
        assert_eq!(out.id(), 7);
        assert_eq!(out.dlc(), 5);
        assert_eq!(out.payload(), &[1, 2, 3, 4, 5]);
        assert_eq!(out, original);
        assert_eq!(queue.pop(), Err(QueueError::Empty));
    }

    #[test]
    fn pops_in_arbitration_order() {
        let mut queue: MessageQueue = MessageQueue::new();
        for id in [0x300u16, 0x010, 0x7FF, 0x001, 0x100] {
            queue.push(&msg(id, &[id as u8])).unwrap();
        }

        let ids: Vec<u16> = queue.drain().map(|m| m.id()).collect();
        assert_eq!(&ids[..], &[0x001, 0x010, 0x100, 0x300, 0x7FF]);
        assert!(queue.is_empty());
    }

    #[rstest]
    #[case(2)]
    #[case(8)]
    #[case(DEFAULT_QUEUE_SLOTS)]
    fn default_capacity(#[case] pushes: usize) {
        let mut queue = MessageQueue::<DEFAULT_QUEUE_SLOTS>::default();
        assert_eq!(queue.capacity(), DEFAULT_QUEUE_SLOTS - 1);

        for i in 0..pushes {
            let expected = if i < queue.capacity() {
                Ok(())
            } else {
                Err(QueueError::Full)
            };
            assert_eq!(queue.push(&msg(i as u16, &[])), expected);
        }
        assert_eq!(queue.len(), pushes.min(DEFAULT_QUEUE_SLOTS - 1));
    }

    #[test]
    fn full_queue_rejects_without_change() {
        let mut queue: MessageQueue<3> = MessageQueue::new();
        queue.push(&msg(0x20, &[0xAA])).unwrap();
        queue.push(&msg(0x10, &[0xBB])).unwrap();
        assert!(queue.is_full());

        assert_eq!(queue.push(&msg(0x00, &[])), Err(QueueError::Full));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().map(CanMessage::id), Ok(0x10));
        assert_eq!(queue.pop().unwrap().payload(), &[0xBB]);
        assert_eq!(queue.pop().unwrap().payload(), &[0xAA]);
    }

    #[test]
    fn empty_pop_keeps_queue_usable() {
        let mut queue: MessageQueue<4> = MessageQueue::new();
        assert_eq!(queue.pop(), Err(QueueError::Empty));
        assert_eq!(queue.peek(), Err(QueueError::Empty));
        assert_eq!(queue.len(), 0);

        queue.push(&msg(1, &[9])).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop().unwrap().id(), 1);
    }

    #[test]
    fn len_is_stable_between_calls() {
        let mut queue: MessageQueue<4> = MessageQueue::new();
        queue.push(&msg(3, &[])).unwrap();
        assert_eq!(queue.len(), queue.len());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_discards_everything() {
        let mut queue: MessageQueue<4> = MessageQueue::new();
        queue.push(&msg(3, &[])).unwrap();
        queue.push(&msg(2, &[])).unwrap();

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), Err(QueueError::Empty));
    }

    #[test]
    fn duplicate_ids_all_delivered() {
        let mut queue: MessageQueue<8> = MessageQueue::new();
        queue.push(&msg(5, &[1])).unwrap();
        queue.push(&msg(5, &[2])).unwrap();
        queue.push(&msg(4, &[3])).unwrap();

        assert_eq!(queue.pop().unwrap().payload(), &[3]);
        let mut rest: Vec<u8> = queue.drain().map(|m| m.payload()[0]).collect();
        rest.sort_unstable();
        assert_eq!(&rest[..], &[1, 2]);
    }

    #[test]
    fn rejects_invalid_frames() {
        assert_eq!(
            CanMessage::new(MAX_STANDARD_ID + 1, &[]),
            Err(MessageError::IdOutOfRange { id: 0x800 })
        );
        assert_eq!(
            CanMessage::new(1, &[0; 9]),
            Err(MessageError::PayloadTooLong { len: 9 })
        );
        assert!(CanMessage::new(MAX_STANDARD_ID, &[0; 8]).is_ok());
    }

    #[test]
    fn default_message_is_empty_frame() {
        let m = CanMessage::default();
        assert_eq!(m.id(), 0);
        assert!(m.payload().is_empty());
    }
}
