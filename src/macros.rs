//! Internal logging helpers.

/// Emits a `tracing` event at `$level` when the `tracing` feature is enabled.
///
/// Without the feature the whole invocation, arguments included, compiles to
/// nothing.
///
/// ```ignore
/// heap_trace!(debug, len = self.len, "extract rolled back");
/// ```
macro_rules! heap_trace {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!($($arg)+);
        }
    };
}

pub(crate) use heap_trace;
