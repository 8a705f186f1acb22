//! Priority key types.

mod sealed {
    pub trait Sealed {}
}

/// Unsigned fixed-width integer usable as a heap key. Smaller values are served first.
///
/// Sealed: signed and floating-point keys are not supported, and the heap performs no
/// wraparound handling on the key itself.
pub trait Priority: sealed::Sealed + Copy + Ord + core::fmt::Debug {
    /// Most urgent value of the type. Also the key stored in vacant slots.
    const MIN: Self;
}

macro_rules! impl_priority {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Priority for $t {
                const MIN: Self = 0;
            }
        )*
    };
}

impl_priority!(u8, u16, u32, u64, usize);
