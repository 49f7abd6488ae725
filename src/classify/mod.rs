//! Layout and signal-type classification driven by ordered rule tables.

mod format;
mod signal;

pub use format::{detect_format, Detection};
pub use signal::resolve_signal_type;
