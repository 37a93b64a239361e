//! Global configuration for bedmerge runtime behavior.
//!
//! Switches here are set once at startup from the command line and read
//! when readers and writers are constructed, never inside the merge loop.
//! The I/O buffer sizes they select live here too.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for low-memory buffering.
///
/// When enabled, input and output buffers use the `LOW_MEMORY_*` sizes
/// instead of the defaults.
static LOW_MEMORY: AtomicBool = AtomicBool::new(false);

/// Enable or disable low-memory buffering.
///
/// # Example
///
/// ```
/// use bedmerge::config;
///
/// // Set at startup before any reader or writer is created
/// config::set_low_memory(true);
/// assert!(config::is_low_memory());
/// # config::set_low_memory(false);
/// ```
#[inline]
pub fn set_low_memory(enabled: bool) {
    LOW_MEMORY.store(enabled, Ordering::Release);
}

/// Check if low-memory buffering is enabled.
#[inline]
pub fn is_low_memory() -> bool {
    LOW_MEMORY.load(Ordering::Acquire)
}

/// Per-input read buffer (256 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Per-input read buffer with `--low-memory` (64 KB).
pub const LOW_MEMORY_INPUT_BUFFER: usize = 64 * 1024;

/// Output buffer (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Output buffer with `--low-memory` (256 KB).
pub const LOW_MEMORY_OUTPUT_BUFFER: usize = 256 * 1024;

/// Initial capacity of the reusable line buffer.
pub const DEFAULT_LINE_BUFFER: usize = 1024;

/// Read buffer size for the current memory setting.
#[inline]
pub fn input_buffer_size() -> usize {
    if is_low_memory() {
        LOW_MEMORY_INPUT_BUFFER
    } else {
        DEFAULT_INPUT_BUFFER
    }
}

/// Output buffer size for the current memory setting.
#[inline]
pub fn output_buffer_size() -> usize {
    if is_low_memory() {
        LOW_MEMORY_OUTPUT_BUFFER
    } else {
        DEFAULT_OUTPUT_BUFFER
    }
}
