//! Logging shims.
//!
//! The crate logs through `defmt` when the `defmt` feature is enabled, through
//! `log` when the `log` feature is enabled, and not at all otherwise. `defmt`
//! wins when both are on. Format strings must stick to `{}` placeholders so
//! they are valid for both backends.
#![allow(unused_macros)]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! trace {
            ($($arg:tt)*) => { ::defmt::trace!($($arg)*) };
        }
        macro_rules! debug {
            ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
        }
        macro_rules! info {
            ($($arg:tt)*) => { ::defmt::info!($($arg)*) };
        }
        macro_rules! warn {
            ($($arg:tt)*) => { ::defmt::warn!($($arg)*) };
        }
    } else if #[cfg(feature = "log")] {
        macro_rules! trace {
            ($($arg:tt)*) => { ::log::trace!($($arg)*) };
        }
        macro_rules! debug {
            ($($arg:tt)*) => { ::log::debug!($($arg)*) };
        }
        macro_rules! info {
            ($($arg:tt)*) => { ::log::info!($($arg)*) };
        }
        macro_rules! warn {
            ($($arg:tt)*) => { ::log::warn!($($arg)*) };
        }
    } else {
        // type-check the arguments without evaluating them
        macro_rules! trace {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ if false { $( let _ = &$arg; )* } }};
        }
        macro_rules! debug {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ if false { $( let _ = &$arg; )* } }};
        }
        macro_rules! info {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ if false { $( let _ = &$arg; )* } }};
        }
        macro_rules! warn {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ if false { $( let _ = &$arg; )* } }};
        }
    }
}
