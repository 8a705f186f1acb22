//! Fixed-capacity priority queues for no-std embedded targets.
//!
//! # Highlights
//! - Array-backed binary min-heap, no allocation, no dynamic dispatch.
//! - Storage is caller-supplied (`&mut [HeapSlot]`) or inline (`[HeapSlot; N]`).
//! - CAN transmit queue that orders frames by identifier, matching bus arbitration.
//!
//! # Quick start
//! ```
//! use ph_prioq::{CanMessage, HeapSlot, MessageQueue, PriorityQueue, QueueError};
//!
//! let mut slots = [HeapSlot::<&str>::VACANT; 8];
//! let mut queue = PriorityQueue::new(&mut slots[..]);
//! queue.push("telemetry", 40).unwrap();
//! queue.push("heartbeat", 5).unwrap();
//! assert_eq!(queue.pop(), Ok("heartbeat"));
//!
//! let mut tx: MessageQueue<16> = MessageQueue::new();
//! tx.push(&CanMessage::new(0x120, &[1, 2]).unwrap()).unwrap();
//! tx.push(&CanMessage::new(0x012, &[3]).unwrap()).unwrap();
//! assert_eq!(tx.pop().map(|m| m.id()), Ok(0x012));
//! assert_eq!(tx.pop().map(|m| m.id()), Ok(0x120));
//! assert_eq!(tx.pop(), Err(QueueError::Empty));
//! ```
//!
//! # No-std
//! The crate is `#![no_std]`. Tests require `std`.
//!
//! # Capacity
//! The heap is 1-indexed and never uses slot 0, so `N` slots hold `N - 1` elements.
//!
//! # Concurrency
//! Nothing here locks. Every mutating call takes `&mut self`; callers sharing a queue between
//! an interrupt handler and the main loop must provide their own exclusion around each call.
//!
//! # Semantics
//! - `pop` returns the element with the smallest priority; equal priorities come out in any
//!   order.
//! - A failed `push` (`QueueError::Full`) or `pop` (`QueueError::Empty`) leaves the queue
//!   unchanged.
//! - Priorities are unsigned integers (`u16` unless chosen otherwise).
//!
//! # Features
//! - `log`: emit `trace`/`debug` records through the `log` facade.
//! - `defmt`: derive `defmt::Format` on messages and errors.
#![no_std]

#[macro_use]
mod macros;

pub mod can;
pub mod error;
pub mod heap;
pub mod priority;

pub use can::{CanMessage, DEFAULT_QUEUE_SLOTS, MAX_PAYLOAD_LEN, MAX_STANDARD_ID, MessageQueue};
pub use error::{MessageError, QueueError};
pub use heap::{Drain, HeapSlot, InlinePriorityQueue, PriorityQueue, Storage};
pub use priority::Priority;

#[cfg(test)]
#[macro_use]
extern crate std;
