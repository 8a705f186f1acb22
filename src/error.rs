//! Error types for queue and message operations.
//!
//! Every failure is local and leaves the queue exactly as it was; the caller decides whether
//! to drop, retry, or apply backpressure.

use thiserror::Error;

/// Failure of a queue operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Push attempted while every usable slot is occupied.
    #[error("queue is full")]
    Full,
    /// Pop or peek attempted on a queue holding no elements.
    #[error("queue is empty")]
    Empty,
}

/// Rejected [`CanMessage`](crate::CanMessage) construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    #[error("identifier {id:#x} exceeds the 11-bit standard range")]
    IdOutOfRange { id: u16 },
    #[error("payload of {len} bytes exceeds the 8-byte frame limit")]
    PayloadTooLong { len: usize },
}
