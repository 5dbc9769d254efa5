//! Pointer interaction state machines.

mod longpress;

pub use longpress::{LongPress, LongPressDetector, DEFAULT_HOLD, DEFAULT_SLOP_PX};
