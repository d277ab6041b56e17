//! Cross-target logging macros.
//!
//! Browser builds write to the devtools console; host builds (unit tests)
//! fall back to the standard streams.

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($arg:tt)*) => {
        web_sys::console::log_1(&format!($($arg)*).into())
    };
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($arg:tt)*) => {
        println!($($arg)*)
    };
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($arg:tt)*) => {
        web_sys::console::error_1(&format!($($arg)*).into())
    };
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

pub(crate) use {log_error, log_info};
