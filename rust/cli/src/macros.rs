//! Output helpers for functions that return an exit code instead of a
//! `Result`, such as [`run`](crate::run) and its parse-error banner.

/// `writeln!` to `$dest`, returning [`exit_code::ERROR`](crate::exit_code::ERROR)
/// from the enclosing function if the stream is closed.
///
/// ```ignore
/// write_or_exit!(err, "Usage: cribbage <command> [options]");
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
