// vim: tw=80
//! Internal logging macros
//!
//! Events go to the `understudy` target.  Without the `tracing` feature they
//! compile to nothing.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! log_trace {
            ($($arg:tt)+) => {
                ::tracing::trace!(target: "understudy", $($arg)+)
            }
        }

        macro_rules! log_debug {
            ($($arg:tt)+) => {
                ::tracing::debug!(target: "understudy", $($arg)+)
            }
        }
    } else {
        macro_rules! log_trace {
            ($($arg:tt)+) => {{}}
        }

        macro_rules! log_debug {
            ($($arg:tt)+) => {{}}
        }
    }
}
