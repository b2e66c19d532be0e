//! Debug-build logging shared by the coordinator and its workers.

use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

/// Print a timestamped message tagged with the current thread's name.
/// Compiled out of release builds.
pub fn dev_log(message: &str) {
    if !cfg!(debug_assertions) {
        return;
    }

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let current = thread::current();
    let thread_name = current.name().unwrap_or("main");
    println!("[{ts}ms][{thread_name}] {message}");
}

#[macro_export]
macro_rules! log_dev {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::logging::dev_log(&format!($($arg)*));
        }
    };
}
