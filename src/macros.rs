// Logging shims. With the `log` feature they forward to the `log` crate; without it the
// arguments are still type-checked but nothing is emitted.

macro_rules! trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
        #[cfg(not(feature = "log"))]
        {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
        #[cfg(not(feature = "log"))]
        {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}
