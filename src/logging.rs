// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logging macros.
//!
//! - `defmt` feature: forwarded to `defmt` (RTT transport is set up by the firmware binary).
//! - Host tests: printed with `println!`.
//! - Otherwise: arguments are type-checked and dropped.
//!
//! Only use `{}` placeholders with primitive arguments so the same call site is valid for both
//! `defmt` and `core::fmt`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($defmt:ident, $tag:literal, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$defmt!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        println!("[{}] {}", $tag, format_args!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a trace message.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => { $crate::__log!(trace, "TRACE", $($arg)*) };
}

/// Log a debug message.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log!(debug, "DEBUG", $($arg)*) };
}

/// Log an informational message.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log!(info, "INFO", $($arg)*) };
}

/// Log a warning.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log!(warn, "WARN", $($arg)*) };
}

/// Log an error.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log!(error, "ERROR", $($arg)*) };
}
